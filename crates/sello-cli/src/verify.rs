//! `sello verify` — resolve a proof as a third-party verifier would.
//!
//! Exit codes: 0 acceptable, 2 lifecycle failure (revoked/expired),
//! 3 not found, 1 anything else.

use std::path::Path;

use clap::Args;

use sello_core::{ProofId, Timestamp};
use sello_gateway::{verify_by_proof_id, verify_by_token, VerifyError};

use crate::statefile;

/// Arguments for `sello verify`.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// A share token or full share URL (Path B).
    #[arg(long, conflicts_with = "proof_id")]
    pub token: Option<String>,

    /// A 0x-prefixed proof id for direct ledger lookup (Path A).
    #[arg(long)]
    pub proof_id: Option<String>,
}

/// Run `sello verify`.
pub async fn run_verify(args: &VerifyArgs, state_path: &Path) -> anyhow::Result<u8> {
    let world = statefile::load(state_path)?;
    let now = Timestamp::now();

    match (&args.token, &args.proof_id) {
        (Some(token), None) => {
            match verify_by_token(&world.ledger, &world.store, token, now).await {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    println!("acceptability: {:?}", report.acceptability(now));
                    Ok(0)
                }
                Err(e) => Ok(verify_exit(&e)),
            }
        }
        (None, Some(raw_id)) => {
            let id = ProofId::from_hex(raw_id)?;
            match verify_by_proof_id(&world.ledger, &world.store, id, now).await {
                Ok(report) => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                    Ok(0)
                }
                Err(e) => Ok(verify_exit(&e)),
            }
        }
        _ => {
            eprintln!("pass exactly one of --token or --proof-id");
            Ok(1)
        }
    }
}

fn verify_exit(err: &VerifyError) -> u8 {
    eprintln!("verification failed: {err}");
    match err {
        VerifyError::ProofRevoked
        | VerifyError::ProofExpired { .. }
        | VerifyError::TokenExpired { .. } => 2,
        VerifyError::ProofNotFound | VerifyError::TokenNotFound => 3,
        _ => 1,
    }
}
