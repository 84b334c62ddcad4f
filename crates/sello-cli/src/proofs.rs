//! `sello proofs` — list a holder's proofs and registration.

use std::path::Path;

use clap::Args;

use sello_core::WalletAddress;
use sello_store::{ProofStore, UserStore};

use crate::statefile;

/// Arguments for `sello proofs`.
#[derive(Args, Debug)]
pub struct ProofsArgs {
    /// Holder wallet address.
    #[arg(long)]
    pub owner: String,
}

/// Run `sello proofs`.
pub async fn run_proofs(args: &ProofsArgs, state_path: &Path) -> anyhow::Result<u8> {
    let world = statefile::load(state_path)?;
    let owner = WalletAddress::new(args.owner.clone())?;

    if let Some(user) = world.store.get_user_by_wallet(&owner).await? {
        tracing::info!(user_id = %user.user_id, "registered holder");
    }

    let records = world.store.proofs_for_owner(&owner).await?;
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(0)
}
