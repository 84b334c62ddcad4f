//! # sello-crypto — Commitment Primitives
//!
//! The cryptographic building blocks of the sealed-proof protocol:
//!
//! - **Commitments** (`commitment.rs`): domain-separated SHA-256 derivation
//!   of proof ids and factor commitments from a holder, an epoch bucket,
//!   and a freshness nonce.
//! - **Tokens** (`token.rs`): share-token generation with enough entropy to
//!   be unguessable, plus constant-time token comparison.
//!
//! ## Crate Policy
//!
//! - Depends only on `sello-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   SHA-256 and real OS randomness.

pub mod commitment;
pub mod error;
pub mod token;

pub use commitment::{derive_commitment, derive_proof_id, FreshnessNonce};
pub use error::CryptoError;
pub use token::{generate_share_token, tokens_match, validate_token_shape, TOKEN_PREFIX};
