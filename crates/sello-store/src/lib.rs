//! # sello-store — Off-Chain Record Store
//!
//! The relational collaborator: proofs (mirroring the anchored entity plus
//! display data), shares (capability tokens), users (wallet mapping), and
//! reminders (regeneration scheduling).
//!
//! ## Architecture
//!
//! - **Records** (`records.rs`): the row types.
//! - **Traits** (`traits.rs`): one contract per table, satisfied by every
//!   backend.
//! - **Memory** (`memory.rs`): `parking_lot`-backed reference store.
//! - **Postgres** (`postgres.rs`): `sqlx` backend with runtime-bound
//!   queries.
//! - **REST** (`rest.rs`): typed `reqwest` client for a hosted
//!   PostgREST-style database, the backing the original deployment used.
//!
//! The ledger, not this store, is authoritative for validity: a proof
//! whose mirror write failed is still valid, it merely cannot be shared
//! or displayed until re-mirrored.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod records;
pub mod rest;
pub mod traits;

pub use error::StoreError;
pub use memory::{MemoryStore, StoreSnapshot};
pub use postgres::PgStore;
pub use records::{ProofRecord, ReminderRecord, ReminderStatus, ShareRecord, UserRecord};
pub use rest::{RestStore, RestStoreConfig};
pub use traits::{ProofStore, ReminderStore, ShareStore, UserStore};
