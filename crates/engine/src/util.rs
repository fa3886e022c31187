//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

pub(crate) const MAX_WALLET_NAME_LENGTH: usize = 200;
pub(crate) const MAX_CATEGORY_LENGTH: usize = 100;

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::KeyNotFound(format!("invalid {label} id")))
}

/// Trim a required free-text field and check its length (in characters).
///
/// `invalid` picks the error variant, e.g. [`EngineError::InvalidName`] for
/// wallet names or [`EngineError::InvalidCategory`] for categories.
pub(crate) fn normalize_required_text(
    value: &str,
    label: &str,
    max_length: usize,
    invalid: fn(String) -> EngineError,
) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(format!("{label} must not be empty")));
    }
    if trimmed.chars().count() > max_length {
        return Err(invalid(format!(
            "{label} must be at most {max_length} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional note; missing notes are stored as an empty string.
pub(crate) fn normalize_note(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

/// `true` when the store rejected a write because of a unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
