//! # Generation Flow
//!
//! One logical transaction from the holder's point of view:
//!
//! 1. Resolve the connected wallet (`NotAuthenticated` if none).
//! 2. Preflight the chain id against the ledger (`WrongLedgerContext`).
//! 3. Attest factor bands through the oracle.
//! 4. Derive `(proof_id, commitment)` with a fresh nonce.
//! 5. Anchor on the ledger, bounded by the signature timeout.
//! 6. Mirror the record off-chain.
//!
//! The ledger is the source of truth for validity. The mirror write runs
//! only after the anchor is confirmed, so an unanchored record can never
//! resolve as valid; a failed mirror write leaves the proof valid but
//! unshared, and that asymmetry is reported explicitly in
//! [`MirrorStatus`].

use std::time::Duration;

use sello_core::{Epoch, FactorSet, ProofId, RecordId, Timestamp, TxHash, WalletAddress};
use sello_crypto::{derive_commitment, derive_proof_id, FreshnessNonce};
use sello_ledger::{CreditLedger, LedgerError, WalletError, WalletSession};
use sello_store::{ProofRecord, ProofStore, StoreError, UserStore};

use crate::error::GenerateError;
use crate::oracle::FactorOracle;

/// Tunables for the generation flow.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Proof validity window from creation.
    pub proof_ttl_days: i64,
    /// Upper bound on the wallet approval + submission step.
    pub signature_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            proof_ttl_days: 30,
            signature_timeout: Duration::from_secs(120),
        }
    }
}

/// Whether the off-chain mirror write succeeded.
#[derive(Debug)]
pub enum MirrorStatus {
    /// The record is stored and shareable.
    Stored,
    /// The anchor succeeded but the mirror write failed: the proof is
    /// valid, sharing and display are degraded until re-mirrored.
    Degraded(StoreError),
}

/// The outcome of a successful generation attempt.
#[derive(Debug)]
pub struct GeneratedProof {
    /// The off-chain record as written (or as it would have been written,
    /// when the mirror degraded).
    pub record: ProofRecord,
    /// Mirror write outcome.
    pub mirror: MirrorStatus,
}

/// Runs generation attempts against a wallet, an oracle, a ledger, and an
/// off-chain store.
pub struct ProofGenerator<'a, W, O, L, S> {
    wallet: &'a W,
    oracle: &'a O,
    ledger: &'a L,
    store: &'a S,
    config: GeneratorConfig,
}

impl<'a, W, O, L, S> ProofGenerator<'a, W, O, L, S>
where
    W: WalletSession,
    O: FactorOracle,
    L: CreditLedger,
    S: ProofStore + UserStore,
{
    /// Wire up a generator with default tunables.
    pub fn new(wallet: &'a W, oracle: &'a O, ledger: &'a L, store: &'a S) -> Self {
        Self {
            wallet,
            oracle,
            ledger,
            store,
            config: GeneratorConfig::default(),
        }
    }

    /// Override the tunables.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Run one generation attempt.
    pub async fn generate(&self) -> Result<GeneratedProof, GenerateError> {
        let owner = match self.wallet.current_address().await {
            Ok(addr) => addr,
            Err(WalletError::NotConnected) => return Err(GenerateError::NotAuthenticated),
            Err(e) => return Err(GenerateError::AnchoringFailed(e.to_string())),
        };

        let connected = self
            .wallet
            .current_chain_id()
            .await
            .map_err(|e| GenerateError::AnchoringFailed(e.to_string()))?;
        let expected = self.ledger.chain_id();
        if connected != expected {
            return Err(GenerateError::WrongLedgerContext {
                expected,
                actual: connected,
            });
        }

        let now = Timestamp::now();
        let epoch = Epoch::containing(&now);
        let factors = self.oracle.attest(&owner, epoch).await?;

        let nonce = FreshnessNonce::generate();
        let proof_id = derive_proof_id(&owner, epoch, nonce);
        let commitment = derive_commitment(&factors, nonce)?;

        tracing::debug!(proof_id = %proof_id, epoch = %epoch, "anchoring proof");
        let tx_hash = self
            .anchor(&owner, proof_id, epoch, commitment, factors)
            .await?;

        let record = ProofRecord {
            record_id: RecordId::new(),
            proof_id,
            owner: owner.clone(),
            status: factors.aggregate(),
            factors,
            commitment,
            epoch,
            valid: true,
            tx_hash: Some(tx_hash),
            created_at: now,
            expires_at: now.plus_days(self.config.proof_ttl_days),
        };

        let mirror = self.mirror(&owner, record.clone()).await;
        Ok(GeneratedProof { record, mirror })
    }

    async fn anchor(
        &self,
        owner: &WalletAddress,
        proof_id: ProofId,
        epoch: Epoch,
        commitment: sello_core::Commitment,
        factors: FactorSet,
    ) -> Result<TxHash, GenerateError> {
        let submit = self
            .ledger
            .submit_proof(owner, proof_id, epoch, commitment, factors);
        match tokio::time::timeout(self.config.signature_timeout, submit).await {
            Ok(Ok(tx)) => Ok(tx),
            Ok(Err(LedgerError::DuplicateId { id })) => {
                Err(GenerateError::ProofIdCollision { id })
            }
            Ok(Err(e)) => Err(GenerateError::AnchoringFailed(e.to_string())),
            Err(_) => Err(GenerateError::UserCancelledOrTimedOut),
        }
    }

    async fn mirror(&self, owner: &WalletAddress, record: ProofRecord) -> MirrorStatus {
        if let Err(e) = self.store.upsert_user(owner).await {
            tracing::warn!(error = %e, "user row write failed; proof remains valid on-chain");
            return MirrorStatus::Degraded(e);
        }
        match self.store.put_proof(record).await {
            Ok(()) => MirrorStatus::Stored,
            Err(e) => {
                tracing::warn!(error = %e, "mirror write failed; proof remains valid on-chain");
                MirrorStatus::Degraded(e)
            }
        }
    }
}
