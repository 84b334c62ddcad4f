//! # sello-cli — Command-Line Driver
//!
//! Drives the sealed-proof protocol against a file-backed demo state:
//! a JSON dump of the in-memory ledger and store, loaded at startup and
//! rewritten after every mutating command.
//!
//! One module per subcommand, each exposing an `Args` struct and a
//! `run_*` function returning a process exit code.

pub mod generate;
pub mod proofs;
pub mod remind;
pub mod revoke;
pub mod share;
pub mod statefile;
pub mod verify;
