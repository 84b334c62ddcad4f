//! Degraded-collaborator behavior: ledger outages during verification,
//! mirror-store failures during generation, and the wallet-approval
//! timeout. In every case the failure mode must be the one the protocol
//! promises — degrade, never silently succeed or misreport.

use std::time::Duration;

use sello_core::{
    Band, ChainId, Commitment, Epoch, FactorSet, ProofId, Timestamp, TxHash, WalletAddress,
};
use sello_gateway::{issue_share, verify_by_token, IssueConfig, OnChainValidity};
use sello_ledger::{CreditLedger, InMemoryLedger, LedgerError, LedgerProof, MockWallet};
use sello_proof::{
    FixedFactorOracle, GenerateError, GeneratorConfig, MirrorStatus, ProofGenerator,
};
use sello_store::{MemoryStore, ProofRecord, ProofStore, StoreError, UserRecord, UserStore};

const CHAIN: u64 = 534_351;

fn addr(n: u8) -> WalletAddress {
    WalletAddress::new(format!("0x{:040x}", n)).unwrap()
}

// -------------------------------------------------------------------------
// Test doubles
// -------------------------------------------------------------------------

/// A ledger that is down for reads and writes.
struct OfflineLedger;

impl CreditLedger for OfflineLedger {
    fn chain_id(&self) -> ChainId {
        ChainId::new(CHAIN)
    }

    async fn submit_proof(
        &self,
        _caller: &WalletAddress,
        _id: ProofId,
        _epoch: Epoch,
        _commitment: Commitment,
        _factors: FactorSet,
    ) -> Result<TxHash, LedgerError> {
        Err(LedgerError::Unavailable("rpc timeout".to_string()))
    }

    async fn get_proof_summary(&self, _id: ProofId) -> Result<Option<LedgerProof>, LedgerError> {
        Err(LedgerError::Unavailable("rpc timeout".to_string()))
    }

    async fn revoke_proof(&self, _caller: &WalletAddress, _id: ProofId) -> Result<(), LedgerError> {
        Err(LedgerError::Unavailable("rpc timeout".to_string()))
    }

    async fn verify_bands(
        &self,
        _id: ProofId,
        _minimums: FactorSet,
    ) -> Result<bool, LedgerError> {
        Err(LedgerError::Unavailable("rpc timeout".to_string()))
    }
}

/// A ledger whose writes hang past any reasonable approval window.
struct HungWalletLedger;

impl CreditLedger for HungWalletLedger {
    fn chain_id(&self) -> ChainId {
        ChainId::new(CHAIN)
    }

    async fn submit_proof(
        &self,
        _caller: &WalletAddress,
        _id: ProofId,
        _epoch: Epoch,
        _commitment: Commitment,
        _factors: FactorSet,
    ) -> Result<TxHash, LedgerError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(LedgerError::Unavailable("unreachable".to_string()))
    }

    async fn get_proof_summary(&self, _id: ProofId) -> Result<Option<LedgerProof>, LedgerError> {
        Ok(None)
    }

    async fn revoke_proof(&self, _caller: &WalletAddress, _id: ProofId) -> Result<(), LedgerError> {
        Ok(())
    }

    async fn verify_bands(
        &self,
        _id: ProofId,
        _minimums: FactorSet,
    ) -> Result<bool, LedgerError> {
        Ok(false)
    }
}

/// A store whose writes always fail.
struct BrokenStore;

impl ProofStore for BrokenStore {
    async fn put_proof(&self, _record: ProofRecord) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }

    async fn get_proof(&self, _id: ProofId) -> Result<Option<ProofRecord>, StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }

    async fn proofs_for_owner(
        &self,
        _owner: &WalletAddress,
    ) -> Result<Vec<ProofRecord>, StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }

    async fn revoke_proof(
        &self,
        _id: ProofId,
        _authority: &WalletAddress,
    ) -> Result<(), StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }
}

impl UserStore for BrokenStore {
    async fn upsert_user(&self, _wallet: &WalletAddress) -> Result<UserRecord, StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }

    async fn get_user_by_wallet(
        &self,
        _wallet: &WalletAddress,
    ) -> Result<Option<UserRecord>, StoreError> {
        Err(StoreError::Backend("disk full".to_string()))
    }
}

// -------------------------------------------------------------------------
// Path B degradation
// -------------------------------------------------------------------------

#[tokio::test]
async fn ledger_outage_degrades_path_b_to_unknown() {
    // Anchor and mirror against a healthy world first.
    let healthy = InMemoryLedger::new(ChainId::new(CHAIN), addr(0xad));
    let store = MemoryStore::new();
    let wallet = MockWallet::connected(addr(1), ChainId::new(CHAIN));
    let oracle = FixedFactorOracle::new(FactorSet::new(Band::A, Band::A, Band::A));
    let generated = ProofGenerator::new(&wallet, &oracle, &healthy, &store)
        .generate()
        .await
        .unwrap();

    let share = issue_share(
        &store,
        generated.record.proof_id,
        Timestamp::now(),
        &IssueConfig::default(),
    )
    .await
    .unwrap();

    // Verify with the ledger down: degraded, not failed.
    let report = verify_by_token(&OfflineLedger, &store, &share.token, Timestamp::now())
        .await
        .unwrap();
    assert_eq!(report.on_chain, OnChainValidity::Unknown);
    assert_eq!(report.proof.proof_id, generated.record.proof_id);
    assert_eq!(report.proof.factors, generated.record.factors);
}

// -------------------------------------------------------------------------
// Mirror asymmetry
// -------------------------------------------------------------------------

#[tokio::test]
async fn mirror_failure_leaves_proof_valid_on_chain() {
    let ledger = InMemoryLedger::new(ChainId::new(CHAIN), addr(0xad));
    let wallet = MockWallet::connected(addr(2), ChainId::new(CHAIN));
    let oracle = FixedFactorOracle::new(FactorSet::new(Band::A, Band::A, Band::A));

    let generated = ProofGenerator::new(&wallet, &oracle, &ledger, &BrokenStore)
        .generate()
        .await
        .unwrap();

    assert!(matches!(generated.mirror, MirrorStatus::Degraded(_)));
    // The anchor is authoritative and present.
    let summary = ledger
        .get_proof_summary(generated.record.proof_id)
        .await
        .unwrap()
        .unwrap();
    assert!(summary.valid);
}

// -------------------------------------------------------------------------
// Wallet approval timeout
// -------------------------------------------------------------------------

#[tokio::test]
async fn hung_signature_prompt_times_out_distinctly() {
    let wallet = MockWallet::connected(addr(3), ChainId::new(CHAIN));
    let oracle = FixedFactorOracle::new(FactorSet::new(Band::A, Band::A, Band::A));
    let store = MemoryStore::new();

    let config = GeneratorConfig {
        proof_ttl_days: 30,
        signature_timeout: Duration::from_millis(50),
    };
    let err = ProofGenerator::new(&wallet, &oracle, &HungWalletLedger, &store)
        .with_config(config)
        .generate()
        .await
        .unwrap_err();

    assert!(matches!(err, GenerateError::UserCancelledOrTimedOut));
    // Nothing was mirrored for a proof that never anchored.
    assert!(store.snapshot().proofs.is_empty());
}

// -------------------------------------------------------------------------
// Anchoring outage is not a timeout
// -------------------------------------------------------------------------

#[tokio::test]
async fn ledger_rejection_is_anchoring_failed() {
    let wallet = MockWallet::connected(addr(4), ChainId::new(CHAIN));
    let oracle = FixedFactorOracle::new(FactorSet::new(Band::B, Band::B, Band::C));
    let store = MemoryStore::new();

    let err = ProofGenerator::new(&wallet, &oracle, &OfflineLedger, &store)
        .generate()
        .await
        .unwrap_err();
    assert!(matches!(err, GenerateError::AnchoringFailed(_)));
}
