//! `sello share` — issue, list, and revoke share tokens.

use std::path::Path;

use clap::{Args, Subcommand};
use url::Url;

use sello_core::{ProofId, Timestamp};
use sello_gateway::{issue_share, revoke_share, share_url, shares_for_proof, IssueConfig};

use crate::statefile;

/// Arguments for `sello share`.
#[derive(Args, Debug)]
pub struct ShareArgs {
    #[command(subcommand)]
    pub action: ShareAction,
}

/// Share-token operations.
#[derive(Subcommand, Debug)]
pub enum ShareAction {
    /// Issue a new token for a proof.
    Issue {
        /// 0x-prefixed proof id.
        #[arg(long)]
        proof_id: String,
        /// Token lifetime in hours.
        #[arg(long, default_value_t = 72)]
        ttl_hours: i64,
        /// Base URL for the rendered share link.
        #[arg(long, default_value = "https://app.sello.dev/")]
        base_url: String,
    },
    /// List every live token for a proof.
    List {
        /// 0x-prefixed proof id.
        #[arg(long)]
        proof_id: String,
    },
    /// Delete one issued token.
    Revoke {
        /// The token to delete.
        #[arg(long)]
        token: String,
    },
}

/// Run `sello share`.
pub async fn run_share(args: &ShareArgs, state_path: &Path) -> anyhow::Result<u8> {
    let world = statefile::load(state_path)?;

    match &args.action {
        ShareAction::Issue {
            proof_id,
            ttl_hours,
            base_url,
        } => {
            let id = ProofId::from_hex(proof_id)?;
            let config = IssueConfig {
                ttl_hours: *ttl_hours,
            };
            let record = match issue_share(&world.store, id, Timestamp::now(), &config).await {
                Ok(record) => record,
                Err(e) => {
                    eprintln!("issuance failed: {e}");
                    return Ok(1);
                }
            };
            statefile::save(state_path, &world)?;

            let base = Url::parse(base_url)?;
            println!("{}", share_url(&base, &record.token)?);
            tracing::info!(expires_at = %record.expires_at, "share token issued");
            Ok(0)
        }
        ShareAction::List { proof_id } => {
            let id = ProofId::from_hex(proof_id)?;
            let records = shares_for_proof(&world.store, id).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(0)
        }
        ShareAction::Revoke { token } => {
            if revoke_share(&world.store, token).await? {
                statefile::save(state_path, &world)?;
                tracing::info!("share token revoked");
                Ok(0)
            } else {
                eprintln!("no such token");
                Ok(3)
            }
        }
    }
}
