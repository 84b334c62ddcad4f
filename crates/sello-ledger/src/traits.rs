//! # Ledger Trait
//!
//! Defines the abstract interface of the on-chain proof ledger. All
//! implementations (in-memory reference, RPC-backed) must satisfy this
//! trait, keeping them interchangeable at compile time.
//!
//! Reads are public. Writes carry the caller's wallet address and are
//! owner/admin-gated by the backend; a backend must never let a write
//! silently overwrite an anchored proof.

use serde::{Deserialize, Serialize};

use sello_core::{ChainId, Commitment, Epoch, FactorSet, ProofId, Timestamp, TxHash, WalletAddress};

use crate::error::LedgerError;

/// The public summary the ledger stores per proof id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerProof {
    /// The wallet the proof is bound to.
    pub owner: WalletAddress,
    /// The epoch bucket the proof was generated in.
    pub epoch: Epoch,
    /// The opaque factor commitment.
    pub commitment: Commitment,
    /// The disclosed factor bands.
    pub factors: FactorSet,
    /// False once revoked. Monotonic.
    pub valid: bool,
    /// Anchoring time, per the ledger's clock.
    pub created_at: Timestamp,
}

/// Abstract interface of the on-chain credit-proof ledger.
#[allow(async_fn_in_trait)]
pub trait CreditLedger: Send + Sync {
    /// The chain this ledger lives on. Callers preflight their connected
    /// chain against this before attempting any write.
    fn chain_id(&self) -> ChainId;

    /// Anchor a proof. Fails with [`LedgerError::DuplicateId`] if the id
    /// is already anchored; the first record is left unchanged.
    async fn submit_proof(
        &self,
        caller: &WalletAddress,
        id: ProofId,
        epoch: Epoch,
        commitment: Commitment,
        factors: FactorSet,
    ) -> Result<TxHash, LedgerError>;

    /// Public read of a proof summary. `Ok(None)` when the id is unknown.
    async fn get_proof_summary(&self, id: ProofId) -> Result<Option<LedgerProof>, LedgerError>;

    /// Permanently mark a proof invalid. Owner- or admin-gated. Once
    /// false, `valid` never returns to true.
    async fn revoke_proof(&self, caller: &WalletAddress, id: ProofId) -> Result<(), LedgerError>;

    /// Threshold verification entry point: true iff the proof exists, is
    /// valid, and every factor meets its respective minimum.
    async fn verify_bands(&self, id: ProofId, minimums: FactorSet) -> Result<bool, LedgerError>;
}
