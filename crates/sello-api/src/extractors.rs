//! # Request Extraction
//!
//! Validated JSON extraction: parse failures become structured 400s,
//! semantic failures become structured 422s, both before any handler
//! logic runs.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Request types that carry their own semantic validation.
pub trait Validate {
    /// Check field-level constraints. Returns a human-readable reason on
    /// failure.
    fn validate(&self) -> Result<(), String>;
}

/// Unwrap a JSON body, mapping parse rejections to 400 and validation
/// failures to 422.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let Json(value) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    value.validate().map_err(AppError::Validation)?;
    Ok(value)
}
