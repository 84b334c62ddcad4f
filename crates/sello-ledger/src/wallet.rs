//! # Wallet Session
//!
//! The external wallet/chain collaborator: who is connected, to which
//! chain, and network switching. The proof-generation flow preflights
//! the connected chain against the ledger's before attempting any write.

use parking_lot::RwLock;

use sello_core::{ChainId, WalletAddress};

use crate::error::WalletError;

/// Abstract interface of a connected wallet.
#[allow(async_fn_in_trait)]
pub trait WalletSession: Send + Sync {
    /// The connected account, or [`WalletError::NotConnected`].
    async fn current_address(&self) -> Result<WalletAddress, WalletError>;

    /// The chain the wallet is currently pointed at.
    async fn current_chain_id(&self) -> Result<ChainId, WalletError>;

    /// Ask the wallet to switch networks.
    async fn switch_network(&self, target: ChainId) -> Result<(), WalletError>;
}

/// A configurable mock wallet for the demo service, the CLI, and tests.
#[derive(Debug)]
pub struct MockWallet {
    state: RwLock<MockWalletState>,
    /// Chains the mock will agree to switch to.
    supported: Vec<ChainId>,
}

#[derive(Debug)]
struct MockWalletState {
    account: Option<WalletAddress>,
    chain_id: ChainId,
}

impl MockWallet {
    /// A wallet connected as `account` on `chain_id`.
    pub fn connected(account: WalletAddress, chain_id: ChainId) -> Self {
        Self {
            state: RwLock::new(MockWalletState {
                account: Some(account),
                chain_id,
            }),
            supported: vec![chain_id],
        }
    }

    /// A wallet with no connected account.
    pub fn disconnected(chain_id: ChainId) -> Self {
        Self {
            state: RwLock::new(MockWalletState {
                account: None,
                chain_id,
            }),
            supported: vec![chain_id],
        }
    }

    /// Extend the set of chains the mock will switch to.
    pub fn with_supported_chain(mut self, chain_id: ChainId) -> Self {
        self.supported.push(chain_id);
        self
    }
}

impl WalletSession for MockWallet {
    async fn current_address(&self) -> Result<WalletAddress, WalletError> {
        self.state
            .read()
            .account
            .clone()
            .ok_or(WalletError::NotConnected)
    }

    async fn current_chain_id(&self) -> Result<ChainId, WalletError> {
        Ok(self.state.read().chain_id)
    }

    async fn switch_network(&self, target: ChainId) -> Result<(), WalletError> {
        if !self.supported.contains(&target) {
            return Err(WalletError::UnsupportedChain(target));
        }
        self.state.write().chain_id = target;
        Ok(())
    }
}
