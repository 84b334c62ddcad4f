//! Gateway error types.
//!
//! Lookup failures ("never existed") are deliberately distinct from
//! lifecycle failures ("existed, no longer acceptable") — the two imply
//! different remediation for the verifier.

use thiserror::Error;

use sello_core::{Timestamp, ValidationError};
use sello_store::StoreError;

/// Errors from the two verification paths.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The input is not a proof id or share token at all.
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    /// No share row matches the token.
    #[error("share token not found")]
    TokenNotFound,

    /// The token existed but its window has closed. Terminal: the holder
    /// must issue a new token.
    #[error("share token expired at {expired_at}")]
    TokenExpired {
        /// When the token stopped resolving.
        expired_at: Timestamp,
    },

    /// No proof exists for the id.
    #[error("proof not found")]
    ProofNotFound,

    /// The proof exists but was revoked by its authority.
    #[error("proof revoked")]
    ProofRevoked,

    /// The proof exists but its validity window has closed.
    #[error("proof expired at {expired_at}")]
    ProofExpired {
        /// When the proof stopped being acceptable.
        expired_at: Timestamp,
    },

    /// The primary record store could not be reached. Only raised when
    /// the path's authoritative backing fails — secondary cross-checks
    /// degrade instead.
    #[error("record store unavailable: {0}")]
    StoreUnavailable(StoreError),

    /// The ledger could not be reached on the path where it is the
    /// primary backing (Path A).
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),
}

/// Errors from share issuance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IssueError {
    /// No off-chain record exists for the proof id.
    #[error("proof not found")]
    ProofNotFound,

    /// The store rejected the write.
    #[error(transparent)]
    Store(#[from] StoreError),
}
