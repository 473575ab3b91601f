//! Database access layer
//!
//! Repositories borrow a single checked-out connection for the duration
//! of a request; the pool itself is created here at startup.

pub mod employee;

pub use employee::EmployeeRepository;

use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use crate::config::Config;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// Unique or check constraint rejected the write
    #[error("Constraint violation on {constraint}: {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation | ErrorKind::CheckViolation
            )
        {
            return RepoError::ConstraintViolation {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                message: db_err.message().to_string(),
            };
        }
        RepoError::Database(err)
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Pool sizing shared by the server and tests
pub fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .min_connections(config.pool_size.min(config.max_connections()))
        .max_connections(config.max_connections())
        .acquire_timeout(config.acquire_timeout)
        .test_before_acquire(true)
}

/// Open the pool and make sure the schema exists
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = pool_options(config)
        .connect_with(config.connect_options())
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
