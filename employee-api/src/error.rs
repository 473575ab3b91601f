//! Handler error type
//!
//! Handlers return [`ServiceResult`] and use `?` on pool, repository and
//! validation failures alike. Storage failures never reach the client
//! verbatim: they are logged and answered with a bare `InternalError`.

use axum::response::IntoResponse;
use shared::FieldErrors;
use shared::error::{AppError, ErrorCode};

use crate::db::RepoError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ServiceError {
    /// Unexpected database failure
    Storage(BoxError),
    /// Request refused with a client-visible reason
    Rejected(AppError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    fn into_app_error(self) -> AppError {
        match self {
            Self::Rejected(err) => err,
            Self::Storage(source) => {
                tracing::error!(error = %source, "Employee storage failed");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::PoolTimedOut = e {
            return Self::Rejected(AppError::timeout(
                "Database connection pool exhausted, try again later",
            ));
        }
        Self::Storage(e.into())
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        match e {
            // Lost a race with a concurrent write after the pre-check passed
            RepoError::ConstraintViolation {
                constraint,
                message,
            } => {
                tracing::warn!(%constraint, %message, "Employee write hit a constraint");
                Self::Rejected(
                    AppError::conflict(format!("Constraint violation: {constraint}"))
                        .with_detail("constraint", constraint),
                )
            }
            RepoError::Database(source) => source.into(),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        Self::Rejected(e)
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(e: FieldErrors) -> Self {
        Self::Rejected(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        e.into_app_error()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        self.into_app_error().into_response()
    }
}
