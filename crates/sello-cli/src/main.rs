//! # sello CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; all commands operate on a JSON-backed demo
//! world selected with `--state`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sello_cli::generate::{run_generate, GenerateArgs};
use sello_cli::proofs::{run_proofs, ProofsArgs};
use sello_cli::remind::{run_remind, RemindArgs};
use sello_cli::revoke::{run_revoke, RevokeArgs};
use sello_cli::share::{run_share, ShareArgs};
use sello_cli::verify::{run_verify, VerifyArgs};

/// Sello CLI
///
/// Drives the sealed credit-proof protocol end to end: generate and
/// anchor a proof, issue share tokens, verify as a third party, revoke,
/// and schedule regeneration reminders.
#[derive(Parser, Debug)]
#[command(name = "sello", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the demo state file.
    #[arg(long, global = true, default_value = "sello-state.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate and anchor a sealed proof.
    Generate(GenerateArgs),

    /// Verify a proof by share token (Path B) or proof id (Path A).
    Verify(VerifyArgs),

    /// List a holder's proofs.
    Proofs(ProofsArgs),

    /// Issue, list, or revoke share tokens.
    Share(ShareArgs),

    /// Revoke a proof.
    Revoke(RevokeArgs),

    /// Schedule and list regeneration reminders.
    Remind(RemindArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => run_generate(&args, &cli.state).await,
        Commands::Verify(args) => run_verify(&args, &cli.state).await,
        Commands::Proofs(args) => run_proofs(&args, &cli.state).await,
        Commands::Share(args) => run_share(&args, &cli.state).await,
        Commands::Revoke(args) => run_revoke(&args, &cli.state).await,
        Commands::Remind(args) => run_remind(&args, &cli.state).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
