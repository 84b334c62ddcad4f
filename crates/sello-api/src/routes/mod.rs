//! # Route Modules
//!
//! One module per resource, plus the JSON view types shared between them.
//! Views flatten the domain newtypes into plain strings so the wire
//! format stays stable regardless of internal representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use sello_core::FactorSet;
use sello_ledger::LedgerProof;
use sello_store::{ProofRecord, ShareRecord};

pub mod proofs;
pub mod shares;
pub mod verify;

/// The three factor bands, as letters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FactorsView {
    pub stability: String,
    pub inflows: String,
    pub risk: String,
}

impl From<FactorSet> for FactorsView {
    fn from(factors: FactorSet) -> Self {
        Self {
            stability: factors.stability.to_string(),
            inflows: factors.inflows.to_string(),
            risk: factors.risk.to_string(),
        }
    }
}

/// Wire view of an off-chain proof record.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProofView {
    pub proof_id: String,
    pub owner: String,
    pub status: String,
    pub factors: FactorsView,
    pub commitment: String,
    pub epoch: u64,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub created_at: String,
    pub expires_at: String,
}

impl From<&ProofRecord> for ProofView {
    fn from(record: &ProofRecord) -> Self {
        Self {
            proof_id: record.proof_id.to_hex(),
            owner: record.owner.to_string(),
            status: record.status.to_string(),
            factors: record.factors.into(),
            commitment: record.commitment.to_hex(),
            epoch: record.epoch.as_u64(),
            valid: record.valid,
            tx_hash: record.tx_hash.as_ref().map(|t| t.to_string()),
            created_at: record.created_at.to_string(),
            expires_at: record.expires_at.to_string(),
        }
    }
}

/// Wire view of an anchored ledger summary.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LedgerProofView {
    pub owner: String,
    pub epoch: u64,
    pub commitment: String,
    pub factors: FactorsView,
    pub valid: bool,
    pub created_at: String,
}

impl From<&LedgerProof> for LedgerProofView {
    fn from(summary: &LedgerProof) -> Self {
        Self {
            owner: summary.owner.to_string(),
            epoch: summary.epoch.as_u64(),
            commitment: summary.commitment.to_hex(),
            factors: summary.factors.into(),
            valid: summary.valid,
            created_at: summary.created_at.to_string(),
        }
    }
}

/// Wire view of a share token row.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ShareView {
    pub token: String,
    pub proof_id: String,
    pub url: String,
    pub created_at: String,
    pub expires_at: String,
}

impl ShareView {
    /// Render a share row with its verifier-facing URL.
    pub fn render(record: &ShareRecord, base: &url::Url) -> Self {
        let url = sello_gateway::share_url(base, &record.token)
            .map(|u| u.to_string())
            .unwrap_or_default();
        Self {
            token: record.token.clone(),
            proof_id: record.proof_id.to_hex(),
            url,
            created_at: record.created_at.to_string(),
            expires_at: record.expires_at.to_string(),
        }
    }
}
