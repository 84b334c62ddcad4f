//! # File-Backed Demo State
//!
//! The CLI persists the whole demo world — ledger entries plus every
//! off-chain table — as one JSON document. Absent file means a fresh
//! world on the default chain.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use sello_core::{ChainId, ProofId, WalletAddress};
use sello_ledger::{InMemoryLedger, LedgerProof};
use sello_store::{MemoryStore, StoreSnapshot};

/// Default chain for fresh demo state (Scroll Sepolia).
const DEFAULT_CHAIN_ID: u64 = 534_351;

/// Serialized demo world.
#[derive(Debug, Serialize, Deserialize)]
pub struct DemoState {
    pub chain_id: u64,
    pub admin: String,
    pub ledger: Vec<(ProofId, LedgerProof)>,
    pub store: StoreSnapshot,
}

impl DemoState {
    fn fresh() -> anyhow::Result<Self> {
        Ok(Self {
            chain_id: DEFAULT_CHAIN_ID,
            admin: format!("0x{:040x}", 0xad),
            ledger: Vec::new(),
            store: StoreSnapshot::default(),
        })
    }
}

/// The live demo world, ready for protocol operations.
pub struct DemoWorld {
    pub ledger: InMemoryLedger,
    pub store: MemoryStore,
    pub chain_id: ChainId,
    pub admin: WalletAddress,
}

/// Load the demo world from `path`, or start fresh if the file is absent.
pub fn load(path: &Path) -> anyhow::Result<DemoWorld> {
    let state = if path.exists() {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading state file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing state file {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "no state file; starting fresh");
        DemoState::fresh()?
    };

    let chain_id = ChainId::new(state.chain_id);
    let admin = WalletAddress::new(state.admin).context("state file admin address")?;
    Ok(DemoWorld {
        ledger: InMemoryLedger::with_entries(chain_id, admin.clone(), state.ledger),
        store: MemoryStore::from_snapshot(state.store),
        chain_id,
        admin,
    })
}

/// Rewrite `path` with the world's current contents.
pub fn save(path: &Path, world: &DemoWorld) -> anyhow::Result<()> {
    let state = DemoState {
        chain_id: world.chain_id.as_u64(),
        admin: world.admin.to_string(),
        ledger: world.ledger.entries(),
        store: world.store.snapshot(),
    };
    let raw = serde_json::to_string_pretty(&state)?;
    std::fs::write(path, raw)
        .with_context(|| format!("writing state file {}", path.display()))?;
    Ok(())
}
