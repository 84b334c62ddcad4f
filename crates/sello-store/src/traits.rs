//! # Store Traits
//!
//! One contract per table. Every backend — in-memory, Postgres, hosted
//! REST — satisfies the same traits, keeping them interchangeable at the
//! call sites that orchestrate generation and verification.

use sello_core::{ProofId, RecordId, Timestamp, WalletAddress};

use crate::error::StoreError;
use crate::records::{ProofRecord, ReminderRecord, ShareRecord, UserRecord};

/// The `proofs` table.
#[allow(async_fn_in_trait)]
pub trait ProofStore: Send + Sync {
    /// Insert a new proof row. Fails with [`StoreError::DuplicateId`] if
    /// the proof id already has a row.
    async fn put_proof(&self, record: ProofRecord) -> Result<(), StoreError>;

    /// Look up a proof row by its anchored id.
    async fn get_proof(&self, id: ProofId) -> Result<Option<ProofRecord>, StoreError>;

    /// All proof rows for one holder, newest first.
    async fn proofs_for_owner(&self, owner: &WalletAddress)
        -> Result<Vec<ProofRecord>, StoreError>;

    /// Mirror a revocation: set `valid = false` permanently. Owner-gated.
    async fn revoke_proof(&self, id: ProofId, authority: &WalletAddress)
        -> Result<(), StoreError>;
}

/// The `shares` table.
#[allow(async_fn_in_trait)]
pub trait ShareStore: Send + Sync {
    /// Persist a newly issued token.
    async fn put_share(&self, record: ShareRecord) -> Result<(), StoreError>;

    /// Resolve a token to its share row. `Ok(None)` when unknown.
    async fn get_share(&self, token: &str) -> Result<Option<ShareRecord>, StoreError>;

    /// Every live token issued for one proof. Lets holders audit their
    /// exposure surface.
    async fn shares_for_proof(&self, id: ProofId) -> Result<Vec<ShareRecord>, StoreError>;

    /// Delete a token. Returns true if a row was removed.
    async fn delete_share(&self, token: &str) -> Result<bool, StoreError>;
}

/// The `users` table.
#[allow(async_fn_in_trait)]
pub trait UserStore: Send + Sync {
    /// Register a wallet, or return the existing row for it.
    async fn upsert_user(&self, wallet: &WalletAddress) -> Result<UserRecord, StoreError>;

    /// Look up the owner row for a wallet.
    async fn get_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<UserRecord>, StoreError>;
}

/// The `reminders` table.
#[allow(async_fn_in_trait)]
pub trait ReminderStore: Send + Sync {
    /// Schedule a reminder.
    async fn put_reminder(&self, record: ReminderRecord) -> Result<(), StoreError>;

    /// All reminders for one holder, soonest first.
    async fn reminders_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ReminderRecord>, StoreError>;

    /// Reminders due at or before `now` that are still pending.
    async fn due_reminders(&self, now: &Timestamp) -> Result<Vec<ReminderRecord>, StoreError>;

    /// Mark a reminder delivered.
    async fn complete_reminder(&self, id: RecordId) -> Result<(), StoreError>;
}
