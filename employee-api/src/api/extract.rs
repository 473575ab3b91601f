//! Validating extractors
//!
//! Wrap axum's `Json`, `Query` and `Path` so that every rejection, and every
//! field-level failure reported by [`Validate`], becomes an `AppError` with
//! the unified error body instead of axum's plain-text responses.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::Json;
use http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::error::AppError;
use shared::{FieldErrors, Validate};

/// JSON body that has been deserialized and validated
///
/// Syntax errors keep axum's message. A well-formed body that does not fit
/// `T` is reported under `details.fields`, keyed by the offending field.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        let value: T = serde_path_to_error::deserialize(raw).map_err(shape_error)?;
        value.validate()?;
        Ok(Self(value))
    }
}

fn shape_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let reason = err.inner().to_string();
    let path = err.path().to_string();
    // Missing fields are reported against the enclosing object
    let field = if path == "." {
        missing_field(&reason).unwrap_or("body").to_string()
    } else {
        path
    };

    let mut errors = FieldErrors::new();
    errors.add(field, reason);
    errors.into()
}

fn missing_field(reason: &str) -> Option<&str> {
    reason.strip_prefix("missing field `")?.split('`').next()
}

/// Query string that has been deserialized and validated
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Path parameters; a malformed segment is a validation error
#[derive(Debug)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
