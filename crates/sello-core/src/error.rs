//! # Validation Errors
//!
//! Construction-time validation failures for the core domain primitives.
//! Each variant carries the offending input so operators can diagnose
//! malformed data without guesswork.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A ledger band code outside `{0, 1, 2}`.
    #[error("invalid band code: {0} (expected 0, 1, or 2)")]
    InvalidBandCode(u8),

    /// A proof id that is not 32 bytes of hex.
    #[error("invalid proof id format: \"{0}\" (expected 0x-prefixed 64 hex characters)")]
    InvalidProofId(String),

    /// A commitment that is not 32 bytes of hex.
    #[error("invalid commitment format: \"{0}\" (expected 0x-prefixed 64 hex characters)")]
    InvalidCommitment(String),

    /// A wallet address that is not 20 bytes of hex.
    #[error("invalid wallet address: \"{0}\" (expected 0x-prefixed 40 hex characters)")]
    InvalidAddress(String),

    /// A transaction hash that is not 32 bytes of hex.
    #[error("invalid transaction hash: \"{0}\" (expected 0x-prefixed 64 hex characters)")]
    InvalidTxHash(String),

    /// A share token that does not match the issued token shape.
    #[error("invalid share token: \"{0}\" (expected proof_ prefix followed by alphanumerics)")]
    InvalidShareToken(String),
}
