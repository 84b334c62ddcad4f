//! Store-layer error type.

use thiserror::Error;

use sello_core::ProofId;

/// Errors surfaced by an off-chain store backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this proof id already exists.
    #[error("duplicate proof record: {id}")]
    DuplicateId {
        /// The colliding proof id.
        id: ProofId,
    },

    /// No record matched the lookup key.
    #[error("record not found: {0}")]
    NotFound(String),

    /// The caller does not own the record it tried to mutate.
    #[error("caller {caller} is not authorized for this record")]
    NotAuthorized {
        /// The rejected caller address.
        caller: String,
    },

    /// The backend could not be reached or returned malformed data.
    #[error("store backend error: {0}")]
    Backend(String),
}
