//! # In-Memory Store
//!
//! Reference backend for the demo service, the CLI, and tests. All maps
//! sit behind `parking_lot` locks that are never held across an await
//! point.
//!
//! Share-token lookup deliberately scans with a constant-time comparison
//! instead of hashing the caller's input into a map key: the token is the
//! secret, and the scan must not leak prefix-match timing.

use std::collections::HashMap;

use parking_lot::RwLock;

use sello_core::{ProofId, RecordId, Timestamp, UserId, WalletAddress};
use sello_crypto::tokens_match;

use crate::error::StoreError;
use crate::records::{ProofRecord, ReminderRecord, ReminderStatus, ShareRecord, UserRecord};
use crate::traits::{ProofStore, ReminderStore, ShareStore, UserStore};

/// In-memory implementation of all four store traits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    proofs: RwLock<HashMap<ProofId, ProofRecord>>,
    shares: RwLock<Vec<ShareRecord>>,
    users: RwLock<HashMap<WalletAddress, UserRecord>>,
    reminders: RwLock<HashMap<RecordId, ReminderRecord>>,
}

/// Serializable dump of a [`MemoryStore`], for file-backed demo state.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StoreSnapshot {
    pub proofs: Vec<ProofRecord>,
    pub shares: Vec<ShareRecord>,
    pub users: Vec<UserRecord>,
    pub reminders: Vec<ReminderRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            proofs: RwLock::new(
                snapshot
                    .proofs
                    .into_iter()
                    .map(|r| (r.proof_id, r))
                    .collect(),
            ),
            shares: RwLock::new(snapshot.shares),
            users: RwLock::new(
                snapshot
                    .users
                    .into_iter()
                    .map(|u| (u.wallet.clone(), u))
                    .collect(),
            ),
            reminders: RwLock::new(
                snapshot
                    .reminders
                    .into_iter()
                    .map(|r| (r.reminder_id, r))
                    .collect(),
            ),
        }
    }

    /// Dump every table.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            proofs: self.proofs.read().values().cloned().collect(),
            shares: self.shares.read().clone(),
            users: self.users.read().values().cloned().collect(),
            reminders: self.reminders.read().values().cloned().collect(),
        }
    }
}

impl ProofStore for MemoryStore {
    async fn put_proof(&self, record: ProofRecord) -> Result<(), StoreError> {
        let mut proofs = self.proofs.write();
        if proofs.contains_key(&record.proof_id) {
            return Err(StoreError::DuplicateId {
                id: record.proof_id,
            });
        }
        proofs.insert(record.proof_id, record);
        Ok(())
    }

    async fn get_proof(&self, id: ProofId) -> Result<Option<ProofRecord>, StoreError> {
        Ok(self.proofs.read().get(&id).cloned())
    }

    async fn proofs_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ProofRecord>, StoreError> {
        let mut rows: Vec<ProofRecord> = self
            .proofs
            .read()
            .values()
            .filter(|r| r.owner == *owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn revoke_proof(
        &self,
        id: ProofId,
        authority: &WalletAddress,
    ) -> Result<(), StoreError> {
        let mut proofs = self.proofs.write();
        let record = proofs
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if record.owner != *authority {
            return Err(StoreError::NotAuthorized {
                caller: authority.to_string(),
            });
        }
        record.valid = false;
        Ok(())
    }
}

impl ShareStore for MemoryStore {
    async fn put_share(&self, record: ShareRecord) -> Result<(), StoreError> {
        self.shares.write().push(record);
        Ok(())
    }

    async fn get_share(&self, token: &str) -> Result<Option<ShareRecord>, StoreError> {
        Ok(self
            .shares
            .read()
            .iter()
            .find(|s| tokens_match(&s.token, token))
            .cloned())
    }

    async fn shares_for_proof(&self, id: ProofId) -> Result<Vec<ShareRecord>, StoreError> {
        Ok(self
            .shares
            .read()
            .iter()
            .filter(|s| s.proof_id == id)
            .cloned()
            .collect())
    }

    async fn delete_share(&self, token: &str) -> Result<bool, StoreError> {
        let mut shares = self.shares.write();
        let before = shares.len();
        shares.retain(|s| !tokens_match(&s.token, token));
        Ok(shares.len() < before)
    }
}

impl UserStore for MemoryStore {
    async fn upsert_user(&self, wallet: &WalletAddress) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write();
        if let Some(existing) = users.get(wallet) {
            return Ok(existing.clone());
        }
        let record = UserRecord {
            user_id: UserId::new(),
            wallet: wallet.clone(),
            created_at: Timestamp::now(),
        };
        users.insert(wallet.clone(), record.clone());
        Ok(record)
    }

    async fn get_user_by_wallet(
        &self,
        wallet: &WalletAddress,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().get(wallet).cloned())
    }
}

impl ReminderStore for MemoryStore {
    async fn put_reminder(&self, record: ReminderRecord) -> Result<(), StoreError> {
        self.reminders.write().insert(record.reminder_id, record);
        Ok(())
    }

    async fn reminders_for_owner(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<ReminderRecord>, StoreError> {
        let mut rows: Vec<ReminderRecord> = self
            .reminders
            .read()
            .values()
            .filter(|r| r.owner == *owner)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.remind_at.cmp(&b.remind_at));
        Ok(rows)
    }

    async fn due_reminders(&self, now: &Timestamp) -> Result<Vec<ReminderRecord>, StoreError> {
        Ok(self
            .reminders
            .read()
            .values()
            .filter(|r| r.status == ReminderStatus::Pending && r.remind_at <= *now)
            .cloned()
            .collect())
    }

    async fn complete_reminder(&self, id: RecordId) -> Result<(), StoreError> {
        let mut reminders = self.reminders.write();
        let record = reminders
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        record.status = ReminderStatus::Done;
        Ok(())
    }
}
