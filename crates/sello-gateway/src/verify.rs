//! # Verification Paths
//!
//! **Path A** resolves a proof id directly against the ledger. The ledger
//! anchors no expiry field, so freshness on this path comes from the
//! off-chain mirror when one exists and is otherwise unknown.
//!
//! **Path B** resolves a share token against the off-chain store, then
//! cross-checks the ledger best-effort: a transient ledger failure
//! degrades the cross-check to [`OnChainValidity::Unknown`] rather than
//! failing the verification, because the off-chain record is the primary
//! backing on this path.
//!
//! Both paths are pure reads and safe to issue concurrently.

use serde::{Deserialize, Serialize};

use sello_core::{lifecycle, Acceptability, ProofId, Timestamp};
use sello_crypto::validate_token_shape;
use sello_ledger::{CreditLedger, LedgerProof};
use sello_store::{ProofRecord, ProofStore, ShareRecord, ShareStore};

use crate::error::VerifyError;
use crate::issue::extract_token;

/// Outcome of the best-effort ledger cross-check on Path B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnChainValidity {
    /// The ledger confirms the proof is anchored and valid.
    Valid,
    /// The ledger reports the proof revoked.
    Revoked,
    /// The ledger could not be consulted; verification is pending.
    Unknown,
}

/// Result of a Path A verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathAReport {
    /// The anchored summary.
    pub summary: LedgerProof,
    /// Expiry from the off-chain mirror, when one was found.
    /// Informational: the ledger itself anchors no expiry.
    pub expires_at: Option<Timestamp>,
}

/// Result of a Path B verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathBReport {
    /// The off-chain proof record.
    pub proof: ProofRecord,
    /// The share row the token resolved to.
    pub share: ShareRecord,
    /// Best-effort ledger cross-check.
    pub on_chain: OnChainValidity,
}

/// **Path A** — direct ledger lookup by proof id.
///
/// Lifecycle failures are distinct from lookup failures: a revoked or
/// expired proof existed and was once acceptable.
pub async fn verify_by_proof_id<L, S>(
    ledger: &L,
    store: &S,
    id: ProofId,
    now: Timestamp,
) -> Result<PathAReport, VerifyError>
where
    L: CreditLedger,
    S: ProofStore,
{
    let summary = ledger
        .get_proof_summary(id)
        .await
        .map_err(|e| VerifyError::LedgerUnavailable(e.to_string()))?
        .ok_or(VerifyError::ProofNotFound)?;

    if !summary.valid {
        return Err(VerifyError::ProofRevoked);
    }

    // The mirror's expiry is informational on this path; a store outage
    // must not fail a successful ledger read.
    let expires_at = match store.get_proof(id).await {
        Ok(record) => record.map(|r| r.expires_at),
        Err(e) => {
            tracing::warn!(proof_id = %id, error = %e, "mirror lookup failed; expiry unknown");
            None
        }
    };

    if let Some(expires_at) = expires_at {
        if lifecycle::acceptability(true, &now, &expires_at) == Acceptability::Expired {
            return Err(VerifyError::ProofExpired { expired_at: expires_at });
        }
    }

    Ok(PathAReport { summary, expires_at })
}

/// **Path B** — off-chain share-token lookup.
///
/// `input` may be a bare token or a full share URL. Token expiry is
/// terminal: a new token must be issued by the holder. A token issued
/// after revocation still resolves, reporting
/// [`OnChainValidity::Revoked`].
pub async fn verify_by_token<L, S>(
    ledger: &L,
    store: &S,
    input: &str,
    now: Timestamp,
) -> Result<PathBReport, VerifyError>
where
    L: CreditLedger,
    S: ProofStore + ShareStore,
{
    let token = extract_token(input);
    validate_token_shape(token)?;

    let share = store
        .get_share(token)
        .await
        .map_err(VerifyError::StoreUnavailable)?
        .ok_or(VerifyError::TokenNotFound)?;

    if now > share.expires_at {
        return Err(VerifyError::TokenExpired {
            expired_at: share.expires_at,
        });
    }

    let proof = store
        .get_proof(share.proof_id)
        .await
        .map_err(VerifyError::StoreUnavailable)?
        .ok_or(VerifyError::ProofNotFound)?;

    let on_chain = match ledger.get_proof_summary(share.proof_id).await {
        Ok(Some(summary)) if summary.valid => OnChainValidity::Valid,
        Ok(Some(_)) => OnChainValidity::Revoked,
        Ok(None) => {
            tracing::warn!(proof_id = %share.proof_id, "record claims an anchor the ledger does not have");
            OnChainValidity::Unknown
        }
        Err(e) => {
            tracing::warn!(proof_id = %share.proof_id, error = %e, "ledger cross-check failed; degrading");
            OnChainValidity::Unknown
        }
    };

    Ok(PathBReport {
        proof,
        share,
        on_chain,
    })
}

impl PathBReport {
    /// The verifier-facing verdict, combining the record's validity, the
    /// ledger cross-check, and the proof's freshness at `now`.
    pub fn acceptability(&self, now: Timestamp) -> Acceptability {
        let valid = self.proof.valid && self.on_chain != OnChainValidity::Revoked;
        lifecycle::acceptability(valid, &now, &self.proof.expires_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{issue_share, IssueConfig};
    use sello_core::{
        Band, ChainId, Commitment, Epoch, FactorSet, Outcome, RecordId, WalletAddress,
    };
    use sello_ledger::{InMemoryLedger, LedgerError};
    use sello_store::MemoryStore;

    fn addr(n: u8) -> WalletAddress {
        WalletAddress::new(format!("0x{:040x}", n)).unwrap()
    }

    fn ledger() -> InMemoryLedger {
        InMemoryLedger::new(ChainId::new(534_351), addr(0xad))
    }

    fn base_now() -> Timestamp {
        Timestamp::from_unix_seconds(1_700_000_000)
    }

    async fn seed(
        ledger: &InMemoryLedger,
        store: &MemoryStore,
        factors: FactorSet,
    ) -> ProofRecord {
        let now = base_now();
        let proof_id = ProofId::from_bytes([0x11; 32]);
        let commitment = Commitment::from_bytes([0x22; 32]);
        let epoch = Epoch::new(19_676);
        let tx = ledger
            .submit_proof(&addr(1), proof_id, epoch, commitment, factors)
            .await
            .unwrap();
        let record = ProofRecord {
            record_id: RecordId::new(),
            proof_id,
            owner: addr(1),
            status: factors.aggregate(),
            factors,
            commitment,
            epoch,
            valid: true,
            tx_hash: Some(tx),
            created_at: now,
            expires_at: now.plus_days(30),
        };
        store.put_proof(record.clone()).await.unwrap();
        record
    }

    /// A ledger whose reads always fail transiently.
    struct OfflineLedger;

    impl CreditLedger for OfflineLedger {
        fn chain_id(&self) -> ChainId {
            ChainId::new(534_351)
        }

        async fn submit_proof(
            &self,
            _caller: &WalletAddress,
            _id: ProofId,
            _epoch: Epoch,
            _commitment: Commitment,
            _factors: FactorSet,
        ) -> Result<sello_core::TxHash, LedgerError> {
            Err(LedgerError::Unavailable("offline".to_string()))
        }

        async fn get_proof_summary(
            &self,
            _id: ProofId,
        ) -> Result<Option<LedgerProof>, LedgerError> {
            Err(LedgerError::Unavailable("offline".to_string()))
        }

        async fn revoke_proof(
            &self,
            _caller: &WalletAddress,
            _id: ProofId,
        ) -> Result<(), LedgerError> {
            Err(LedgerError::Unavailable("offline".to_string()))
        }

        async fn verify_bands(
            &self,
            _id: ProofId,
            _minimums: FactorSet,
        ) -> Result<bool, LedgerError> {
            Err(LedgerError::Unavailable("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn path_a_returns_summary_for_valid_fresh_proof() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;

        let report = verify_by_proof_id(&ledger, &store, record.proof_id, base_now())
            .await
            .unwrap();
        assert_eq!(report.summary.factors, record.factors);
        assert_eq!(report.expires_at, Some(record.expires_at));
    }

    #[tokio::test]
    async fn path_a_unknown_id_is_not_found() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let err = verify_by_proof_id(&ledger, &store, ProofId::from_bytes([9; 32]), base_now())
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ProofNotFound));
    }

    #[tokio::test]
    async fn path_a_revoked_is_a_lifecycle_error_not_a_lookup_error() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;
        ledger.revoke_proof(&addr(1), record.proof_id).await.unwrap();

        let err = verify_by_proof_id(&ledger, &store, record.proof_id, base_now())
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ProofRevoked));
    }

    #[tokio::test]
    async fn path_a_expired_proof_reports_expiry() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;

        let after_window = base_now().plus_days(31);
        let err = verify_by_proof_id(&ledger, &store, record.proof_id, after_window)
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::ProofExpired { .. }));
    }

    #[tokio::test]
    async fn path_b_happy_flow() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::B, Band::B, Band::C)).await;
        let share = issue_share(&store, record.proof_id, base_now(), &IssueConfig::default())
            .await
            .unwrap();

        let report = verify_by_token(&ledger, &store, &share.token, base_now())
            .await
            .unwrap();
        assert_eq!(report.proof.status, Outcome::Casi);
        assert_eq!(report.on_chain, OnChainValidity::Valid);
        assert_eq!(report.acceptability(base_now()), Acceptability::Acceptable);
    }

    #[tokio::test]
    async fn path_b_accepts_full_share_urls() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;
        let share = issue_share(&store, record.proof_id, base_now(), &IssueConfig::default())
            .await
            .unwrap();

        let url = format!("https://app.sello.dev/verify/{}", share.token);
        let report = verify_by_token(&ledger, &store, &url, base_now()).await.unwrap();
        assert_eq!(report.share.token, share.token);
    }

    #[tokio::test]
    async fn path_b_expired_token_is_terminal_even_for_a_live_proof() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;
        let share = issue_share(&store, record.proof_id, base_now(), &IssueConfig::default())
            .await
            .unwrap();

        let after_72h = base_now().plus_hours(73);
        let err = verify_by_token(&ledger, &store, &share.token, after_72h)
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::TokenExpired { .. }));

        // The proof itself still verifies on Path A.
        verify_by_proof_id(&ledger, &store, record.proof_id, after_72h.plus_days(-10))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn path_b_unknown_token_is_not_found() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let err = verify_by_token(&ledger, &store, "proof_doesnotexist1234", base_now())
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::TokenNotFound));
    }

    #[tokio::test]
    async fn path_b_rejects_malformed_input_before_lookup() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let err = verify_by_token(&ledger, &store, "not a token", base_now())
            .await
            .unwrap_err();
        assert!(matches!(err, VerifyError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn path_b_degrades_when_ledger_is_offline() {
        let (anchor_ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&anchor_ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;
        let share = issue_share(&store, record.proof_id, base_now(), &IssueConfig::default())
            .await
            .unwrap();

        let report = verify_by_token(&OfflineLedger, &store, &share.token, base_now())
            .await
            .unwrap();
        assert_eq!(report.on_chain, OnChainValidity::Unknown);
        // Degraded, not rejected: the off-chain summary still came back.
        assert_eq!(report.proof.proof_id, record.proof_id);
    }

    #[tokio::test]
    async fn path_b_token_issued_after_revocation_still_resolves() {
        let (ledger, store) = (ledger(), MemoryStore::new());
        let record = seed(&ledger, &store, FactorSet::new(Band::A, Band::A, Band::A)).await;
        ledger.revoke_proof(&addr(1), record.proof_id).await.unwrap();

        let share = issue_share(&store, record.proof_id, base_now(), &IssueConfig::default())
            .await
            .unwrap();
        let report = verify_by_token(&ledger, &store, &share.token, base_now())
            .await
            .unwrap();
        assert_eq!(report.on_chain, OnChainValidity::Revoked);
        assert_eq!(report.acceptability(base_now()), Acceptability::Revoked);
    }
}
