//! # sello-ledger — Ledger Collaborator Contract
//!
//! The on-chain ledger is an external collaborator: an append-only
//! key-value store of proof summaries keyed by proof id. This crate owns
//! the seam:
//!
//! - **Traits** (`traits.rs`): [`CreditLedger`] is the compile-time
//!   contract every ledger backing must satisfy. Reads are public; writes
//!   carry the caller identity and are owner/admin-gated by the backend.
//! - **Memory** (`memory.rs`): [`InMemoryLedger`], the reference
//!   implementation used by the demo service, the CLI, and tests.
//! - **Wallet** (`wallet.rs`): [`WalletSession`], the external
//!   wallet/chain collaborator (current address, chain id, network
//!   switching), plus a configurable mock.
//!
//! Transaction submission is folded into [`CreditLedger::submit_proof`]:
//! the write takes the caller identity and the backend signs/submits
//! however it must. The generation flow bounds that call with an explicit
//! timeout since it blocks on user approval in real backends.

pub mod error;
pub mod memory;
pub mod traits;
pub mod wallet;

pub use error::{LedgerError, WalletError};
pub use memory::InMemoryLedger;
pub use traits::{CreditLedger, LedgerProof};
pub use wallet::{MockWallet, WalletSession};
