//! # sello-gateway — Share & Verification Gateway
//!
//! The verifier-facing surface of the protocol. Two independent paths
//! resolve a sealed proof:
//!
//! - **Path A** (`verify.rs`): direct ledger lookup by proof id. Public,
//!   trustless reads; no token involved.
//! - **Path B** (`verify.rs`): off-chain share-token lookup, with a
//!   best-effort ledger cross-check that degrades to "pending" on
//!   transient failure instead of failing the request.
//!
//! Issuance (`issue.rs`) is holder-initiated and independent of
//! verification: tokens are unguessable, short-lived, clamped to the
//! proof's own validity window, and auditable per proof.

pub mod error;
pub mod issue;
pub mod verify;

pub use error::{IssueError, VerifyError};
pub use issue::{extract_token, issue_share, revoke_share, share_url, shares_for_proof, IssueConfig};
pub use verify::{
    verify_by_proof_id, verify_by_token, OnChainValidity, PathAReport, PathBReport,
};
