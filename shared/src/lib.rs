//! Shared types for the Employee API
//!
//! Error types, the employee entity and its request/response schemas,
//! and the validation helpers used by the HTTP layer.

pub mod error;
pub mod models;
pub mod serde_helpers;
pub mod validation;

pub use validation::{FieldErrors, Validate};
