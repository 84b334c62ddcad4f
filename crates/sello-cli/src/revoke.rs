//! `sello revoke` — revoke a proof on the ledger and mirror the flag.

use std::path::Path;

use clap::Args;

use sello_core::{ProofId, WalletAddress};
use sello_ledger::{CreditLedger, LedgerError};
use sello_store::ProofStore;

use crate::statefile;

/// Arguments for `sello revoke`.
#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// 0x-prefixed proof id.
    #[arg(long)]
    pub proof_id: String,

    /// The caller claiming authority (proof owner or ledger admin).
    #[arg(long)]
    pub caller: String,
}

/// Run `sello revoke`.
pub async fn run_revoke(args: &RevokeArgs, state_path: &Path) -> anyhow::Result<u8> {
    let world = statefile::load(state_path)?;
    let id = ProofId::from_hex(&args.proof_id)?;
    let caller = WalletAddress::new(args.caller.clone())?;

    match world.ledger.revoke_proof(&caller, id).await {
        Ok(()) => {}
        Err(LedgerError::NotFound { .. }) => {
            eprintln!("no such proof");
            return Ok(3);
        }
        Err(LedgerError::NotAuthorized { .. }) => {
            eprintln!("caller is not the owner or admin");
            return Ok(2);
        }
        Err(e) => {
            eprintln!("revocation failed: {e}");
            return Ok(1);
        }
    }

    if let Err(e) = world.store.revoke_proof(id, &caller).await {
        tracing::warn!(error = %e, "mirror revocation failed; ledger is authoritative");
    }
    statefile::save(state_path, &world)?;
    tracing::info!(proof_id = %id, "proof revoked");
    Ok(0)
}
