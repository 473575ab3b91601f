//! Error system shared by every endpoint
//!
//! - [`ErrorCode`]: stable numeric codes, grouped by range
//! - [`AppError`]: code + message + optional details
//! - [`ErrorBody`]: the JSON body clients receive
//!
//! ```
//! use shared::error::{AppError, ErrorBody};
//!
//! let err = AppError::validation("Missing required field").with_detail("field", "email");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 2);
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, ErrorBody};
