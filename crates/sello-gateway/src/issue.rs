//! # Share Issuance
//!
//! Holder-initiated: mint an unguessable token bound 1:1 to a proof id,
//! persist it with its own expiry, and hand back a shareable URL.
//!
//! Re-issuing for the same proof creates an additional independent token;
//! old tokens stay live. `shares_for_proof` and `revoke_share` exist so a
//! holder can audit and shrink that exposure surface.

use url::Url;

use sello_core::{ProofId, Timestamp};
use sello_crypto::generate_share_token;
use sello_store::{ProofStore, ShareRecord, ShareStore};

use crate::error::IssueError;

/// Path segment share URLs carry the token under.
const VERIFY_SEGMENT: &str = "/verify/";

/// Issuance tunables.
#[derive(Debug, Clone)]
pub struct IssueConfig {
    /// Token lifetime from issuance.
    pub ttl_hours: i64,
}

impl Default for IssueConfig {
    fn default() -> Self {
        Self { ttl_hours: 72 }
    }
}

/// Mint and persist a new share token for `proof_id`.
///
/// The token's expiry is clamped to the proof's own validity window: a
/// token never outlives the proof it resolves.
pub async fn issue_share<S: ProofStore + ShareStore>(
    store: &S,
    proof_id: ProofId,
    now: Timestamp,
    config: &IssueConfig,
) -> Result<ShareRecord, IssueError> {
    let proof = store
        .get_proof(proof_id)
        .await?
        .ok_or(IssueError::ProofNotFound)?;

    let expires_at = now.plus_hours(config.ttl_hours).min(proof.expires_at);
    let record = ShareRecord {
        token: generate_share_token(),
        proof_id,
        created_at: now,
        expires_at,
    };
    store.put_share(record.clone()).await?;
    tracing::info!(proof_id = %proof_id, expires_at = %record.expires_at, "share token issued");
    Ok(record)
}

/// Every live token issued for one proof.
pub async fn shares_for_proof<S: ShareStore>(
    store: &S,
    proof_id: ProofId,
) -> Result<Vec<ShareRecord>, IssueError> {
    Ok(store.shares_for_proof(proof_id).await?)
}

/// Delete one issued token. Returns true if it existed.
pub async fn revoke_share<S: ShareStore>(store: &S, token: &str) -> Result<bool, IssueError> {
    Ok(store.delete_share(token).await?)
}

/// The URL a holder hands to a verifier: `{base}/verify/{token}`.
pub fn share_url(base: &Url, token: &str) -> Result<Url, url::ParseError> {
    base.join(&format!("verify/{token}"))
}

/// Accept either a bare token or a full share URL and return the token.
pub fn extract_token(input: &str) -> &str {
    match input.find(VERIFY_SEGMENT) {
        Some(pos) => {
            let rest = &input[pos + VERIFY_SEGMENT.len()..];
            rest.split(['?', '#']).next().unwrap_or(rest).trim()
        }
        None => input.trim(),
    }
}
