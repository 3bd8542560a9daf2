//! Wallet connector interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tondns_core::{Address, Network};

use crate::error::ClientResult;

/// Transaction-ready payload produced by a builder.
///
/// The bytes are serialized cells; this crate never looks inside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxPayload {
    /// Message body
    pub body: Vec<u8>,
    /// State init for contract deployment
    pub state_init: Option<Vec<u8>>,
    /// Attached value in nanotons
    pub amount_nano: u64,
}

impl TxPayload {
    /// Payload with a body and attached value only.
    pub fn new(body: Vec<u8>, amount_nano: u64) -> Self {
        Self {
            body,
            state_init: None,
            amount_nano,
        }
    }

    /// Attach a state init.
    pub fn with_state_init(mut self, state_init: Vec<u8>) -> Self {
        self.state_init = Some(state_init);
        self
    }
}

/// A TON Connect style wallet.
///
/// `send_transaction` resolves once the wallet has signed and broadcast the
/// message; it says nothing about on-chain finality.
#[async_trait]
pub trait WalletConnector: Send + Sync {
    /// Connected account, if any.
    fn address(&self) -> Option<Address>;

    /// Network of the connected account, if any.
    fn network(&self) -> Option<Network>;

    /// Whether an account is connected.
    fn is_connected(&self) -> bool {
        self.address().is_some()
    }

    /// Show the wallet selection modal.
    async fn open_modal(&self) -> ClientResult<()>;

    /// Drop the current connection.
    async fn disconnect(&self) -> ClientResult<()>;

    /// Sign and send one message.
    async fn send_transaction(&self, destination: &Address, payload: TxPayload) -> ClientResult<()>;
}
