//! Ledger and wallet error types.

use thiserror::Error;

use sello_core::{ChainId, ProofId};

/// Errors surfaced by a [`crate::CreditLedger`] backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A proof with this id is already anchored. Never silently
    /// overwritten — the caller must regenerate with a new nonce.
    #[error("proof id collision: {id} is already anchored")]
    DuplicateId {
        /// The colliding proof id.
        id: ProofId,
    },

    /// No proof with this id exists on the ledger.
    #[error("proof not found: {id}")]
    NotFound {
        /// The unknown proof id.
        id: ProofId,
    },

    /// The caller is neither the proof owner nor the ledger admin.
    #[error("caller {caller} is not authorized to revoke {id}")]
    NotAuthorized {
        /// The rejected caller address.
        caller: String,
        /// The target proof id.
        id: ProofId,
    },

    /// The operation targeted a different chain than the ledger lives on.
    #[error("wrong ledger context: expected chain {expected}, got {actual}")]
    WrongLedgerContext {
        /// The chain the ledger lives on.
        expected: ChainId,
        /// The chain the caller is connected to.
        actual: ChainId,
    },

    /// The backend could not be reached or rejected the request
    /// transiently. Read paths degrade on this; write paths surface it.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by a [`crate::WalletSession`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// No account is connected.
    #[error("no wallet account connected")]
    NotConnected,

    /// The wallet refused to switch to the requested network.
    #[error("wallet cannot switch to chain {0}")]
    UnsupportedChain(ChainId),
}
