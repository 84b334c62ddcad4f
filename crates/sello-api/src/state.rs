//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The demo service runs against the in-memory ledger and store; both
//! are `Arc`-shared and internally locked, so handlers stay `Clone`-cheap
//! and verification reads never block each other.

use std::sync::Arc;

use url::Url;

use sello_core::{ChainId, WalletAddress};
use sello_gateway::IssueConfig;
use sello_ledger::InMemoryLedger;
use sello_proof::{GeneratorConfig, MockFactorOracle};
use sello_store::MemoryStore;

use crate::middleware::metrics::ApiMetrics;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The on-chain collaborator.
    pub ledger: Arc<InMemoryLedger>,
    /// The off-chain record store.
    pub store: Arc<MemoryStore>,
    /// The factor source for demo generation.
    pub oracle: Arc<MockFactorOracle>,
    /// Base URL used to render share links.
    pub share_base_url: Url,
    /// Generation tunables.
    pub generator: GeneratorConfig,
    /// Issuance tunables.
    pub issue: IssueConfig,
    /// Prometheus registry and HTTP counters.
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Build demo state: empty ledger on `chain_id` administered by
    /// `admin`, empty store, default tunables.
    pub fn new(chain_id: ChainId, admin: WalletAddress, share_base_url: Url) -> Self {
        Self {
            ledger: Arc::new(InMemoryLedger::new(chain_id, admin)),
            store: Arc::new(MemoryStore::new()),
            oracle: Arc::new(MockFactorOracle),
            share_base_url,
            generator: GeneratorConfig::default(),
            issue: IssueConfig::default(),
            metrics: ApiMetrics::new(),
        }
    }
}
