//! Collaborators shared by every workflow.

use std::sync::Arc;

use tondns_client::{ChainApi, Notice, Notifier, WalletConnector, WalletSession};
use tondns_core::{Address, Config, Network, NetworkProfile};

use crate::error::{DnsError, DnsResult};

/// Wallet, chain API, notifier and configuration, injected into workflows.
#[derive(Clone)]
pub struct DnsContext {
    pub wallet: Arc<dyn WalletConnector>,
    pub chain: Arc<dyn ChainApi>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<Config>,
}

impl DnsContext {
    pub fn new(
        wallet: Arc<dyn WalletConnector>,
        chain: Arc<dyn ChainApi>,
        notifier: Arc<dyn Notifier>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            wallet,
            chain,
            notifier,
            config,
        }
    }

    /// Header view of the wallet.
    pub fn session(&self) -> WalletSession {
        WalletSession::new(self.wallet.clone())
    }

    /// Network of the connected wallet, mainnet when disconnected.
    pub fn network(&self) -> Network {
        self.wallet.network().unwrap_or_default()
    }

    /// Constants for the current network.
    pub fn profile(&self) -> &NetworkProfile {
        self.config.profile(self.network())
    }

    /// Connected wallet address.
    pub fn wallet_address(&self) -> DnsResult<Address> {
        self.wallet.address().ok_or(DnsError::WalletNotConnected)
    }

    /// Optional delay between sequential verification reads.
    pub async fn pace(&self) {
        if let Some(delay) = self.config.verification.pacing() {
            tokio::time::sleep(delay).await;
        }
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.notify(notice);
    }

    /// Show an error to the user and pass it through.
    pub fn report<T>(&self, result: DnsResult<T>) -> DnsResult<T> {
        if let Err(err) = &result {
            tracing::debug!(error = %err, "Action failed");
            self.notifier.notify(Notice::error(err.to_string()));
        }
        result
    }
}
