//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from the gateway, generator, and stores to HTTP
//! status codes with machine-readable error codes. Lifecycle failures
//! (revoked, expired) map to 410 so clients can distinguish "once
//! existed" from 404. Internal details are never exposed to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use sello_gateway::{IssueError, VerifyError};
use sello_proof::GenerateError;
use sello_store::StoreError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "PROOF_REVOKED", "TOKEN_EXPIRED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`].
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource never existed (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Resource existed but is no longer acceptable (410).
    #[error("gone: {1}")]
    Gone(&'static str, String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Conflict with current resource state (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The blocking wallet step did not complete in time (408).
    #[error("timeout: {0}")]
    Timeout(String),

    /// A required collaborator is down (503).
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// Internal server error (500). Message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Gone(code, _) => (StatusCode::GONE, code),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Timeout(_) => (StatusCode::REQUEST_TIMEOUT, "SIGNATURE_TIMEOUT"),
            Self::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Gone(_, message) => message.clone(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<VerifyError> for AppError {
    fn from(err: VerifyError) -> Self {
        match &err {
            VerifyError::InvalidInput(_) => Self::Validation(err.to_string()),
            VerifyError::TokenNotFound | VerifyError::ProofNotFound => {
                Self::NotFound(err.to_string())
            }
            VerifyError::TokenExpired { .. } => Self::Gone("TOKEN_EXPIRED", err.to_string()),
            VerifyError::ProofExpired { .. } => Self::Gone("PROOF_EXPIRED", err.to_string()),
            VerifyError::ProofRevoked => Self::Gone("PROOF_REVOKED", err.to_string()),
            VerifyError::StoreUnavailable(_) | VerifyError::LedgerUnavailable(_) => {
                Self::Unavailable(err.to_string())
            }
        }
    }
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match &err {
            GenerateError::NotAuthenticated => Self::Unauthorized(err.to_string()),
            GenerateError::WrongLedgerContext { .. } => Self::Conflict(err.to_string()),
            GenerateError::ProofIdCollision { .. } => Self::Conflict(err.to_string()),
            GenerateError::UserCancelledOrTimedOut => Self::Timeout(err.to_string()),
            GenerateError::Oracle(_) | GenerateError::Commitment(_) => {
                Self::Internal(err.to_string())
            }
            GenerateError::AnchoringFailed(_) => Self::Unavailable(err.to_string()),
        }
    }
}

impl From<IssueError> for AppError {
    fn from(err: IssueError) -> Self {
        match &err {
            IssueError::ProofNotFound => Self::NotFound(err.to_string()),
            IssueError::Store(inner) => StoreError::clone(inner).into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::DuplicateId { .. } => Self::Conflict(err.to_string()),
            StoreError::NotFound(_) => Self::NotFound(err.to_string()),
            StoreError::NotAuthorized { .. } => Self::Forbidden(err.to_string()),
            StoreError::Backend(_) => Self::Internal(err.to_string()),
        }
    }
}

impl From<sello_core::ValidationError> for AppError {
    fn from(err: sello_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_errors_are_gone_not_not_found() {
        let revoked: AppError = VerifyError::ProofRevoked.into();
        let (status, code) = revoked.status_and_code();
        assert_eq!(status, StatusCode::GONE);
        assert_eq!(code, "PROOF_REVOKED");

        let missing: AppError = VerifyError::ProofNotFound.into();
        assert_eq!(missing.status_and_code().0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn collision_maps_to_conflict() {
        let err: AppError = GenerateError::ProofIdCollision {
            id: sello_core::ProofId::from_bytes([1; 32]),
        }
        .into();
        assert_eq!(err.status_and_code().0, StatusCode::CONFLICT);
    }

    #[test]
    fn timeout_maps_to_408() {
        let err: AppError = GenerateError::UserCancelledOrTimedOut.into();
        assert_eq!(err.status_and_code().0, StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn degraded_collaborators_map_to_503() {
        let err: AppError = VerifyError::LedgerUnavailable("rpc down".to_string()).into();
        assert_eq!(err.status_and_code().0, StatusCode::SERVICE_UNAVAILABLE);
    }
}
