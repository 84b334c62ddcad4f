//! # sello-core — Core Domain Types
//!
//! Foundation crate for the Sello stack. Defines the credit band model,
//! proof identifiers, temporal types, and the proof lifecycle axes that
//! every other crate builds on.
//!
//! ## Architecture
//!
//! - **Bands** (`band.rs`): the three-valued ordinal credit scale, factor
//!   sets, and the all-or-nothing outcome aggregation rule.
//! - **Identity** (`identity.rs`): newtype identifiers — proof ids,
//!   commitments, wallet addresses, surrogate record ids. Format is
//!   validated at construction time.
//! - **Temporal** (`temporal.rs`): UTC-only timestamps and day-granular
//!   epochs.
//! - **Lifecycle** (`lifecycle.rs`): the two independent axes (validity,
//!   freshness) that decide whether a verifier may accept a proof.
//!
//! ## Crate Policy
//!
//! - No I/O, no async, no global state. Everything here is a value type.
//! - No `unwrap()` outside tests; all fallible constructors return
//!   [`ValidationError`].

pub mod band;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod temporal;

pub use band::{Band, FactorSet, Outcome};
pub use error::ValidationError;
pub use identity::{ChainId, Commitment, ProofId, RecordId, TxHash, UserId, WalletAddress};
pub use lifecycle::{Acceptability, Freshness};
pub use temporal::{Epoch, Timestamp};
