//! # Off-Chain Row Types
//!
//! Mirrors of the hosted database tables. The proof row keeps both
//! identifiers: the surrogate `record_id` that keys the table and the
//! anchored `proof_id` that the ledger knows — the latter is the only one
//! a verifier can resolve on-chain.

use serde::{Deserialize, Serialize};

use sello_core::{
    Commitment, Epoch, FactorSet, Outcome, ProofId, RecordId, Timestamp, TxHash, UserId,
    WalletAddress,
};

/// One row of the `proofs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// Surrogate table key.
    pub record_id: RecordId,
    /// The anchored identifier; what verifiers resolve.
    pub proof_id: ProofId,
    /// The holder's wallet.
    pub owner: WalletAddress,
    /// Aggregated outcome, derived from `factors` at creation.
    pub status: Outcome,
    /// Disclosed factor bands (kept for display; not derivable from the
    /// commitment).
    pub factors: FactorSet,
    /// The opaque factor commitment, as anchored.
    pub commitment: Commitment,
    /// The epoch bucket of generation.
    pub epoch: Epoch,
    /// Mirror of the ledger validity flag.
    pub valid: bool,
    /// The anchoring transaction, when one exists.
    pub tx_hash: Option<TxHash>,
    /// Creation time.
    pub created_at: Timestamp,
    /// End of the proof's validity window.
    pub expires_at: Timestamp,
}

/// One row of the `shares` table: a capability token bound 1:1 to a proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareRecord {
    /// The opaque token; the table key.
    pub token: String,
    /// The proof the token resolves to.
    pub proof_id: ProofId,
    /// Issuance time.
    pub created_at: Timestamp,
    /// Token expiry — strictly bounded by the proof's own window.
    pub expires_at: Timestamp,
}

/// One row of the `users` table: owner id to wallet mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The owner's surrogate id.
    pub user_id: UserId,
    /// The wallet bound to this owner.
    pub wallet: WalletAddress,
    /// Registration time.
    pub created_at: Timestamp,
}

/// Status of a regeneration reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    /// Not yet delivered.
    Pending,
    /// Delivered or dismissed.
    Done,
}

/// One row of the `reminders` table. Scheduling only — not part of the
/// proof protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRecord {
    /// Table key.
    pub reminder_id: RecordId,
    /// The holder who asked to be reminded.
    pub owner: WalletAddress,
    /// When to fire.
    pub remind_at: Timestamp,
    /// Delivery status.
    pub status: ReminderStatus,
    /// Creation time.
    pub created_at: Timestamp,
}
