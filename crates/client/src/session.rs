//! Wallet session as seen by the app header.

use std::sync::Arc;

use tondns_core::{shorten, Address, AddressFlags, Network};

use crate::error::{ClientError, ClientResult};
use crate::wallet::WalletConnector;

/// Connection state and header actions for the connected wallet.
#[derive(Clone)]
pub struct WalletSession {
    wallet: Arc<dyn WalletConnector>,
}

impl WalletSession {
    pub fn new(wallet: Arc<dyn WalletConnector>) -> Self {
        Self { wallet }
    }

    /// Underlying connector.
    pub fn wallet(&self) -> &Arc<dyn WalletConnector> {
        &self.wallet
    }

    /// Network of the connected wallet; mainnet when disconnected.
    pub fn network(&self) -> Network {
        self.wallet.network().unwrap_or_default()
    }

    /// Whether the testnet banner should be shown.
    pub fn is_testnet(&self) -> bool {
        self.network().is_testnet()
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_connected()
    }

    /// Connected address or [`ClientError::NotConnected`].
    pub fn require_address(&self) -> ClientResult<Address> {
        self.wallet.address().ok_or(ClientError::NotConnected)
    }

    /// Header button label: the shortened wallet-style address, in its
    /// test-only form on testnet.
    pub fn header_label(&self) -> Option<String> {
        let flags = AddressFlags {
            test_only: self.is_testnet(),
            ..AddressFlags::WALLET
        };
        self.wallet
            .address()
            .map(|address| shorten(&address.to_friendly(flags)))
    }

    /// Open the connect modal unless already connected.
    pub async fn connect(&self) -> ClientResult<()> {
        if self.wallet.is_connected() {
            tracing::debug!("Wallet already connected");
            return Ok(());
        }
        self.wallet.open_modal().await
    }

    /// Disconnect the wallet.
    pub async fn disconnect(&self) -> ClientResult<()> {
        self.wallet.disconnect().await?;
        tracing::info!("Wallet disconnected");
        Ok(())
    }
}
