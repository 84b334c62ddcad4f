//! Crypto-layer error type.

use thiserror::Error;

/// Errors from commitment derivation.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Canonical serialization of the commitment pre-image failed.
    #[error("canonical serialization failed: {0}")]
    Canonicalization(#[from] serde_json::Error),
}
