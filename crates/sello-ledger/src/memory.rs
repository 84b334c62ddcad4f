//! # In-Memory Reference Ledger
//!
//! The ledger backing used by the demo service, the CLI, and tests.
//! Behaviorally equivalent to the deployed contract: duplicate ids
//! revert, revocation is owner/admin-gated and monotonic, reads are
//! public.
//!
//! All operations are synchronous under a `parking_lot` lock (never held
//! across an await point); the async trait surface exists for backends
//! that really do go over the wire.

use std::collections::HashMap;

use parking_lot::RwLock;
use sha2::{Digest, Sha256};

use sello_core::{ChainId, Commitment, Epoch, FactorSet, ProofId, Timestamp, TxHash, WalletAddress};

use crate::error::LedgerError;
use crate::traits::{CreditLedger, LedgerProof};

/// In-memory [`CreditLedger`] implementation.
#[derive(Debug)]
pub struct InMemoryLedger {
    chain_id: ChainId,
    /// The contract deployer; may revoke any proof.
    admin: WalletAddress,
    proofs: RwLock<HashMap<ProofId, LedgerProof>>,
}

impl InMemoryLedger {
    /// Create an empty ledger on the given chain with the given admin.
    pub fn new(chain_id: ChainId, admin: WalletAddress) -> Self {
        Self {
            chain_id,
            admin,
            proofs: RwLock::new(HashMap::new()),
        }
    }

    /// Rebuild a ledger from previously exported entries.
    pub fn with_entries(
        chain_id: ChainId,
        admin: WalletAddress,
        entries: impl IntoIterator<Item = (ProofId, LedgerProof)>,
    ) -> Self {
        Self {
            chain_id,
            admin,
            proofs: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Export every anchored entry, for file-backed demo state.
    pub fn entries(&self) -> Vec<(ProofId, LedgerProof)> {
        self.proofs
            .read()
            .iter()
            .map(|(id, entry)| (*id, entry.clone()))
            .collect()
    }

    /// Number of anchored proofs.
    pub fn len(&self) -> usize {
        self.proofs.read().len()
    }

    /// True when nothing has been anchored yet.
    pub fn is_empty(&self) -> bool {
        self.proofs.read().is_empty()
    }

    /// Synthesize a transaction hash for an accepted write.
    fn tx_hash(id: &ProofId, nonce: u64) -> TxHash {
        let mut hasher = Sha256::new();
        hasher.update(b"tx");
        hasher.update(id.as_bytes());
        hasher.update(nonce.to_be_bytes());
        let digest: [u8; 32] = hasher.finalize().into();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        TxHash::new(format!("0x{hex}")).expect("synthesized hash is well-formed")
    }
}

impl CreditLedger for InMemoryLedger {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn submit_proof(
        &self,
        caller: &WalletAddress,
        id: ProofId,
        epoch: Epoch,
        commitment: Commitment,
        factors: FactorSet,
    ) -> Result<TxHash, LedgerError> {
        let mut proofs = self.proofs.write();
        if proofs.contains_key(&id) {
            return Err(LedgerError::DuplicateId { id });
        }
        let entry = LedgerProof {
            owner: caller.clone(),
            epoch,
            commitment,
            factors,
            valid: true,
            created_at: Timestamp::now(),
        };
        let tx = Self::tx_hash(&id, proofs.len() as u64);
        proofs.insert(id, entry);
        tracing::debug!(proof_id = %id, epoch = %epoch, "proof anchored");
        Ok(tx)
    }

    async fn get_proof_summary(&self, id: ProofId) -> Result<Option<LedgerProof>, LedgerError> {
        Ok(self.proofs.read().get(&id).cloned())
    }

    async fn revoke_proof(&self, caller: &WalletAddress, id: ProofId) -> Result<(), LedgerError> {
        let mut proofs = self.proofs.write();
        let entry = proofs.get_mut(&id).ok_or(LedgerError::NotFound { id })?;
        if entry.owner != *caller && self.admin != *caller {
            return Err(LedgerError::NotAuthorized {
                caller: caller.to_string(),
                id,
            });
        }
        // Monotonic: revoking twice is a no-op, never a resurrection.
        entry.valid = false;
        tracing::info!(proof_id = %id, caller = %caller, "proof revoked");
        Ok(())
    }

    async fn verify_bands(&self, id: ProofId, minimums: FactorSet) -> Result<bool, LedgerError> {
        let proofs = self.proofs.read();
        let Some(entry) = proofs.get(&id) else {
            return Ok(false);
        };
        Ok(entry.valid && entry.factors.meets_minimums(&minimums))
    }
}
