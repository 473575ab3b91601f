//! Error codes
//!
//! - 0xxx: request errors
//! - 8xxx: employee errors
//! - 9xxx: server-side errors

use std::fmt;

/// Stable numeric code carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    /// Body, query or path failed to parse or validate
    ValidationFailed = 2,
    /// Write rejected by a unique or check constraint
    AlreadyExists = 4,

    EmployeeNotFound = 8001,
    /// Another employee already uses this email
    EmployeeEmailExists = 8002,

    InternalError = 9001,
    /// No pooled connection became free in time
    TimeoutError = 9004,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Server-side failure, logged at error level
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Default message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeEmailExists => "Employee email already exists",
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}
