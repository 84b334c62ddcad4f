//! `sello generate` — run one generation attempt and anchor the result.

use std::path::Path;

use clap::Args;

use sello_core::{Band, ChainId, FactorSet, WalletAddress};
use sello_proof::{FactorOracle, FixedFactorOracle, MockFactorOracle, ProofGenerator};
use sello_ledger::MockWallet;

use crate::statefile::{self, DemoWorld};

/// Arguments for `sello generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Holder wallet address (0x-prefixed).
    #[arg(long)]
    pub owner: String,

    /// Chain the holder's wallet is connected to. Defaults to the demo
    /// ledger's chain; pass a different value to exercise the wrong-chain
    /// preflight.
    #[arg(long)]
    pub chain_id: Option<u64>,

    /// Fix the attested bands, e.g. `A,A,A` or `B,B,C`. Random when
    /// omitted, like the hosted demo.
    #[arg(long)]
    pub factors: Option<String>,
}

fn parse_band(letter: &str) -> anyhow::Result<Band> {
    match letter.trim() {
        "A" | "a" => Ok(Band::A),
        "B" | "b" => Ok(Band::B),
        "C" | "c" => Ok(Band::C),
        other => anyhow::bail!("unknown band letter: {other:?} (expected A, B, or C)"),
    }
}

fn parse_factors(raw: &str) -> anyhow::Result<FactorSet> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 3 {
        anyhow::bail!("--factors takes exactly three letters, e.g. A,B,C");
    }
    Ok(FactorSet::new(
        parse_band(parts[0])?,
        parse_band(parts[1])?,
        parse_band(parts[2])?,
    ))
}

/// Run `sello generate`.
pub async fn run_generate(args: &GenerateArgs, state_path: &Path) -> anyhow::Result<u8> {
    let world = statefile::load(state_path)?;
    let owner = WalletAddress::new(args.owner.clone())?;
    let chain = args.chain_id.map(ChainId::new).unwrap_or(world.chain_id);
    let wallet = MockWallet::connected(owner, chain);

    let outcome = match &args.factors {
        Some(raw) => {
            let oracle = FixedFactorOracle::new(parse_factors(raw)?);
            run_with(&oracle, &wallet, &world).await
        }
        None => run_with(&MockFactorOracle, &wallet, &world).await,
    };

    match outcome {
        Ok(generated) => {
            statefile::save(state_path, &world)?;
            println!("{}", serde_json::to_string_pretty(&generated.record)?);
            tracing::info!(
                proof_id = %generated.record.proof_id,
                status = %generated.record.status,
                "proof anchored"
            );
            Ok(0)
        }
        Err(e) => {
            eprintln!("generation failed: {e}");
            Ok(1)
        }
    }
}

async fn run_with<O: FactorOracle>(
    oracle: &O,
    wallet: &MockWallet,
    world: &DemoWorld,
) -> Result<sello_proof::GeneratedProof, sello_proof::GenerateError> {
    ProofGenerator::new(wallet, oracle, &world.ledger, &world.store)
        .generate()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_parsing() {
        let set = parse_factors("A,b,C").unwrap();
        assert_eq!(set, FactorSet::new(Band::A, Band::B, Band::C));
        assert!(parse_factors("A,B").is_err());
        assert!(parse_factors("A,B,X").is_err());
    }
}
