//! Input validation helpers
//!
//! Field length limits mirror the column sizes of the `employees` table.
//! Validators collect every offending field instead of stopping at the
//! first one, so a client gets the full list in a single 422 response.

use std::collections::BTreeMap;

use validator::ValidateEmail;

use crate::error::AppError;
use crate::serde_helpers::parse_timestamp;

// ── Text length limits ──────────────────────────────────────────────

/// First and last names
pub const MAX_NAME_LEN: usize = 50;

/// Email addresses (column size)
pub const MAX_EMAIL_LEN: usize = 100;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 20;

/// Position and department
pub const MAX_ORG_TEXT_LEN: usize = 100;

// ── Field error accumulator ─────────────────────────────────────────

/// Field name → reason, ordered by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

#[cfg(test)]
impl FieldErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        let names: Vec<&str> = errors.fields().collect();
        let message = format!("Validation failed: {}", names.join(", "));
        let fields: serde_json::Map<String, serde_json::Value> = errors
            .0
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        AppError::validation(message).with_detail("fields", fields)
    }
}

/// Types that can check their own field constraints after deserialization
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

// ── Validation helpers ──────────────────────────────────────────────

/// Required string: non-empty and within `max_len` characters.
/// Whitespace counts as content.
pub fn validate_required_text(errors: &mut FieldErrors, field: &str, value: &str, max_len: usize) {
    if value.is_empty() {
        errors.add(field, format!("{field} must not be empty"));
        return;
    }
    let len = value.chars().count();
    if len > max_len {
        errors.add(field, format!("{field} is too long ({len} chars, max {max_len})"));
    }
}

/// Optional string: if present, within `max_len` characters.
pub fn validate_optional_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    max_len: usize,
) {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            errors.add(field, format!("{field} is too long ({len} chars, max {max_len})"));
        }
    }
}

/// Email: syntactically valid and within the column size.
pub fn validate_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.to_owned().validate_email() {
        errors.add(field, format!("{field} is not a valid email address"));
        return;
    }
    validate_required_text(errors, field, value, MAX_EMAIL_LEN);
}

/// Strictly positive, finite number.
pub fn validate_positive(errors: &mut FieldErrors, field: &str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        errors.add(field, format!("{field} must be greater than 0"));
    }
}

/// Timestamp in one of the shapes `parse_timestamp` accepts
pub fn validate_timestamp(errors: &mut FieldErrors, field: &str, value: &str) {
    if parse_timestamp(value).is_none() {
        errors.add(field, "invalid datetime");
    }
}
