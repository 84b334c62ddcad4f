//! End-to-end protocol scenarios: generation through verification,
//! across both paths, with revocation, expiry, and collision coverage.

use sello_core::{
    Acceptability, Band, ChainId, Commitment, Epoch, FactorSet, Outcome, ProofId, Timestamp,
    WalletAddress,
};
use sello_gateway::{
    issue_share, verify_by_proof_id, verify_by_token, IssueConfig, OnChainValidity, VerifyError,
};
use sello_ledger::{CreditLedger, InMemoryLedger, LedgerError, MockWallet};
use sello_proof::{FixedFactorOracle, GeneratedProof, ProofGenerator};
use sello_store::{MemoryStore, ProofStore, ShareStore};

const CHAIN: u64 = 534_351;

fn addr(n: u8) -> WalletAddress {
    WalletAddress::new(format!("0x{:040x}", n)).unwrap()
}

fn world() -> (InMemoryLedger, MemoryStore) {
    (
        InMemoryLedger::new(ChainId::new(CHAIN), addr(0xad)),
        MemoryStore::new(),
    )
}

async fn generate(
    ledger: &InMemoryLedger,
    store: &MemoryStore,
    owner: u8,
    factors: FactorSet,
) -> GeneratedProof {
    let wallet = MockWallet::connected(addr(owner), ChainId::new(CHAIN));
    let oracle = FixedFactorOracle::new(factors);
    ProofGenerator::new(&wallet, &oracle, ledger, store)
        .generate()
        .await
        .unwrap()
}

// -------------------------------------------------------------------------
// Scenario 1: all-A factors → apto → Path A verifies with full bands.
// -------------------------------------------------------------------------

#[tokio::test]
async fn apto_proof_verifies_on_path_a() {
    let (ledger, store) = world();
    let all_a = FactorSet::new(Band::A, Band::A, Band::A);
    let generated = generate(&ledger, &store, 1, all_a).await;

    assert_eq!(generated.record.status, Outcome::Apto);

    let report = verify_by_proof_id(&ledger, &store, generated.record.proof_id, Timestamp::now())
        .await
        .unwrap();
    assert!(report.summary.valid);
    assert_eq!(report.summary.factors, all_a);
    assert_eq!(report.summary.owner, addr(1));

    // The threshold entry point agrees.
    assert!(ledger
        .verify_bands(generated.record.proof_id, all_a)
        .await
        .unwrap());
}

// -------------------------------------------------------------------------
// Scenario 2: near-pass factors → casi → token expires after 72h.
// -------------------------------------------------------------------------

#[tokio::test]
async fn casi_share_token_dies_after_72_hours() {
    let (ledger, store) = world();
    let generated = generate(&ledger, &store, 2, FactorSet::new(Band::B, Band::B, Band::C)).await;
    assert_eq!(generated.record.status, Outcome::Casi);

    let issued_at = generated.record.created_at;
    let share = issue_share(&store, generated.record.proof_id, issued_at, &IssueConfig::default())
        .await
        .unwrap();

    // Inside the window the token resolves with full bands.
    let report = verify_by_token(&ledger, &store, &share.token, issued_at.plus_hours(71))
        .await
        .unwrap();
    assert_eq!(report.proof.status, Outcome::Casi);
    assert_eq!(report.on_chain, OnChainValidity::Valid);

    // Past the window the token is dead even though the proof is not.
    let err = verify_by_token(&ledger, &store, &share.token, issued_at.plus_hours(73))
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::TokenExpired { .. }));

    verify_by_proof_id(&ledger, &store, generated.record.proof_id, issued_at.plus_hours(73))
        .await
        .unwrap();
}

// -------------------------------------------------------------------------
// Scenario 3: revocation by the owner flips both paths and verify_bands.
// -------------------------------------------------------------------------

#[tokio::test]
async fn revocation_propagates_to_every_read_path() {
    let (ledger, store) = world();
    let all_a = FactorSet::new(Band::A, Band::A, Band::A);
    let generated = generate(&ledger, &store, 3, all_a).await;
    let id = generated.record.proof_id;

    ledger.revoke_proof(&addr(3), id).await.unwrap();

    let err = verify_by_proof_id(&ledger, &store, id, Timestamp::now())
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::ProofRevoked));

    assert!(!ledger.verify_bands(id, all_a).await.unwrap());

    // A token issued after revocation still resolves, reporting revoked.
    let share = issue_share(&store, id, Timestamp::now(), &IssueConfig::default())
        .await
        .unwrap();
    let report = verify_by_token(&ledger, &store, &share.token, Timestamp::now())
        .await
        .unwrap();
    assert_eq!(report.on_chain, OnChainValidity::Revoked);
    assert_eq!(report.acceptability(Timestamp::now()), Acceptability::Revoked);
}

// -------------------------------------------------------------------------
// Scenario 4: duplicate submission fails, first record unchanged.
// -------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_anchor_never_overwrites() {
    let (ledger, _store) = world();
    let id = ProofId::from_bytes([0x77; 32]);
    let first_commitment = Commitment::from_bytes([1; 32]);

    ledger
        .submit_proof(
            &addr(4),
            id,
            Epoch::new(100),
            first_commitment,
            FactorSet::new(Band::A, Band::A, Band::A),
        )
        .await
        .unwrap();

    let second = ledger
        .submit_proof(
            &addr(5),
            id,
            Epoch::new(101),
            Commitment::from_bytes([2; 32]),
            FactorSet::new(Band::C, Band::C, Band::C),
        )
        .await;
    assert!(matches!(second, Err(LedgerError::DuplicateId { .. })));

    let summary = ledger.get_proof_summary(id).await.unwrap().unwrap();
    assert_eq!(summary.owner, addr(4));
    assert_eq!(summary.commitment, first_commitment);
    assert_eq!(summary.epoch, Epoch::new(100));
}

// -------------------------------------------------------------------------
// Expiry axis: an expired proof is a lifecycle error, not a lookup miss.
// -------------------------------------------------------------------------

#[tokio::test]
async fn expired_proof_reports_expiry_not_not_found() {
    let (ledger, store) = world();
    let generated = generate(&ledger, &store, 6, FactorSet::new(Band::A, Band::A, Band::A)).await;

    let past_window = generated.record.expires_at.plus_days(1);
    let err = verify_by_proof_id(&ledger, &store, generated.record.proof_id, past_window)
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::ProofExpired { .. }));

    // On-chain the flag still reads valid; only the freshness axis failed.
    let summary = ledger
        .get_proof_summary(generated.record.proof_id)
        .await
        .unwrap()
        .unwrap();
    assert!(summary.valid);
}

// -------------------------------------------------------------------------
// Concurrency: verification paths are pure reads and run in parallel.
// -------------------------------------------------------------------------

#[tokio::test]
async fn concurrent_verifications_do_not_interfere() {
    let (ledger, store) = world();
    let generated = generate(&ledger, &store, 7, FactorSet::new(Band::A, Band::A, Band::A)).await;
    let id = generated.record.proof_id;
    let share = issue_share(&store, id, Timestamp::now(), &IssueConfig::default())
        .await
        .unwrap();

    let ledger = std::sync::Arc::new(ledger);
    let store = std::sync::Arc::new(store);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let (ledger, store, token) = (ledger.clone(), store.clone(), share.token.clone());
        handles.push(tokio::spawn(async move {
            let a = verify_by_proof_id(&*ledger, &*store, id, Timestamp::now()).await;
            let b = verify_by_token(&*ledger, &*store, &token, Timestamp::now()).await;
            a.is_ok() && b.is_ok()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }
}

// -------------------------------------------------------------------------
// Share audit: re-issuance grows the exposure surface; revoke shrinks it.
// -------------------------------------------------------------------------

#[tokio::test]
async fn share_audit_and_explicit_revoke() {
    let (ledger, store) = world();
    let generated = generate(&ledger, &store, 8, FactorSet::new(Band::B, Band::B, Band::C)).await;
    let id = generated.record.proof_id;
    let now = Timestamp::now();
    let config = IssueConfig::default();

    let first = issue_share(&store, id, now, &config).await.unwrap();
    let second = issue_share(&store, id, now, &config).await.unwrap();
    assert_eq!(store.shares_for_proof(id).await.unwrap().len(), 2);

    assert!(store.delete_share(&first.token).await.unwrap());
    // The surviving token still verifies.
    verify_by_token(&ledger, &store, &second.token, now)
        .await
        .unwrap();
    let err = verify_by_token(&ledger, &store, &first.token, now)
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::TokenNotFound));
}

// -------------------------------------------------------------------------
// Record fidelity: the mirror row carries both identifiers.
// -------------------------------------------------------------------------

#[tokio::test]
async fn mirror_retains_surrogate_and_anchored_ids() {
    let (ledger, store) = world();
    let generated = generate(&ledger, &store, 9, FactorSet::new(Band::A, Band::A, Band::A)).await;

    let row = store
        .get_proof(generated.record.proof_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.record_id, generated.record.record_id);
    assert_eq!(row.proof_id, generated.record.proof_id);
    assert!(row.tx_hash.is_some());

    let json = serde_json::to_value(&row).unwrap();
    assert!(json["proof_id"].as_str().unwrap().starts_with("0x"));
    assert_eq!(json["status"], "apto");
}
