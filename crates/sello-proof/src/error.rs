//! Generation-flow error types.

use thiserror::Error;

use sello_core::{ChainId, ProofId};
use sello_crypto::CryptoError;

/// Errors from factor attestation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The attestation source could not produce bands.
    #[error("factor attestation failed: {0}")]
    AttestationFailed(String),
}

/// Errors from one proof-generation attempt.
///
/// Each variant has a distinct remediation, so callers must not collapse
/// them: precondition failures are fixable before retry, a collision
/// requires a fresh nonce, a timeout means the holder never approved.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// No wallet account is connected.
    #[error("not authenticated: connect a wallet before generating")]
    NotAuthenticated,

    /// The wallet is pointed at a different chain than the ledger.
    #[error("wrong ledger context: expected chain {expected}, connected to {actual}")]
    WrongLedgerContext {
        /// The chain the ledger lives on.
        expected: ChainId,
        /// The chain the wallet is connected to.
        actual: ChainId,
    },

    /// Factor attestation failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Commitment derivation failed.
    #[error(transparent)]
    Commitment(#[from] CryptoError),

    /// The derived proof id is already anchored. Retry with a new nonce,
    /// never with the same id.
    #[error("proof id collision: {id}")]
    ProofIdCollision {
        /// The colliding id.
        id: ProofId,
    },

    /// The ledger rejected or could not complete the anchoring write.
    #[error("anchoring failed: {0}")]
    AnchoringFailed(String),

    /// The holder did not approve the signature within the deadline.
    #[error("wallet signature was cancelled or timed out")]
    UserCancelledOrTimedOut,
}
