//! # sello-api entry point
//!
//! Binds the demo service: in-memory ledger and store, mock oracle,
//! tracing to stdout, Prometheus at `/metrics`.

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;
use url::Url;

use sello_api::state::AppState;
use sello_core::{ChainId, WalletAddress};

/// Default chain the demo ledger lives on (Scroll Sepolia).
const DEFAULT_CHAIN_ID: u64 = 534_351;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let chain_id = std::env::var("SELLO_CHAIN_ID")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(ChainId::new)
        .unwrap_or(ChainId::new(DEFAULT_CHAIN_ID));

    let admin = match std::env::var("SELLO_ADMIN_ADDRESS") {
        Ok(raw) => WalletAddress::new(raw)?,
        Err(_) => WalletAddress::new(format!("0x{:040x}", 0xad))?,
    };

    let share_base_url = std::env::var("SELLO_SHARE_BASE_URL")
        .ok()
        .and_then(|v| Url::parse(&v).ok())
        .unwrap_or_else(|| Url::parse("http://localhost:8080/").expect("static url"));

    let addr: SocketAddr = std::env::var("SELLO_API_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()?;

    let state = AppState::new(chain_id, admin, share_base_url);
    let app = sello_api::app(state);

    tracing::info!(%addr, chain = %chain_id, "sello-api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
