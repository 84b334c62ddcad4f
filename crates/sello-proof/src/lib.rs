//! # sello-proof — Proof Generation
//!
//! Orchestrates one generation attempt: authenticate the holder, preflight
//! the ledger context, attest the factor bands, derive the commitment
//! pair, anchor on the ledger, and mirror the record off-chain.
//!
//! ## Architecture
//!
//! - **Oracle** (`oracle.rs`): the [`FactorOracle`] trait is the seam where
//!   a real attested computation would plug in. The shipped
//!   [`MockFactorOracle`] draws bands at random — it provides no genuine
//!   credit signal and exists so the rest of the protocol is exercisable
//!   end to end.
//! - **Generate** (`generate.rs`): [`ProofGenerator`] runs the flow and
//!   owns the write-ordering rule: ledger first (authoritative), mirror
//!   second, and a mirror failure degrades sharing instead of invalidating
//!   the proof.

pub mod error;
pub mod generate;
pub mod oracle;

pub use error::{GenerateError, OracleError};
pub use generate::{GeneratedProof, GeneratorConfig, MirrorStatus, ProofGenerator};
pub use oracle::{FactorOracle, FixedFactorOracle, MockFactorOracle};
