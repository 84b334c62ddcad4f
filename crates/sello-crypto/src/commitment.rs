//! # Commitment Derivation
//!
//! Binds a holder, an epoch bucket, and a factor set into two opaque
//! 32-byte values:
//!
//! - `proof_id = SHA256(0x49 || owner_bytes || epoch_be || nonce_be)`
//! - `commitment = SHA256(0x43 || canonical_json(factors) || nonce_be)`
//!
//! ## Hashing (Domain Separation)
//!
//! The two derivations use distinct single-byte domain prefixes so that a
//! proof id can never collide with a commitment over related inputs.
//!
//! ## Freshness
//!
//! The nonce is unique per generation attempt. Two generations in the same
//! epoch for the same holder produce distinct proof ids, and identical
//! factor sets produce unlinkable commitments.

use sha2::{Digest, Sha256};

use sello_core::{Commitment, Epoch, FactorSet, ProofId, WalletAddress};

use crate::error::CryptoError;

/// Domain prefix for proof-id derivation.
const DOMAIN_PROOF_ID: u8 = 0x49;
/// Domain prefix for factor commitments.
const DOMAIN_COMMITMENT: u8 = 0x43;

/// A per-attempt freshness value bound into both derivations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessNonce(u128);

impl FreshnessNonce {
    /// Draw a fresh nonce: the wall clock in nanoseconds mixed with a
    /// random draw, so a frozen or coarse clock still yields unique values.
    pub fn generate() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        Self(nanos ^ rand::random::<u128>())
    }

    /// Wrap a fixed nonce. Tests use this for determinism checks.
    pub fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Big-endian wire bytes.
    pub fn to_be_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

fn sha256_raw(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Derive the anchored proof id for one generation attempt.
///
/// Deterministic in `(owner, epoch, nonce)`; the nonce makes repeat
/// attempts within an epoch collision-free.
pub fn derive_proof_id(owner: &WalletAddress, epoch: Epoch, nonce: FreshnessNonce) -> ProofId {
    let digest = sha256_raw(&[
        &[DOMAIN_PROOF_ID],
        &owner.to_bytes(),
        &epoch.to_be_bytes(),
        &nonce.to_be_bytes(),
    ]);
    ProofId::from_bytes(digest)
}

/// Derive the factor commitment for one generation attempt.
///
/// The pre-image is the canonical JSON form of the factor set (fixed field
/// order: `stability`, `inflows`, `risk`) followed by the nonce. Without
/// the exact pre-image the factor set is not recoverable from the output.
pub fn derive_commitment(
    factors: &FactorSet,
    nonce: FreshnessNonce,
) -> Result<Commitment, CryptoError> {
    let canonical = serde_json::to_vec(factors)?;
    let digest = sha256_raw(&[&[DOMAIN_COMMITMENT], &canonical, &nonce.to_be_bytes()]);
    Ok(Commitment::from_bytes(digest))
}
