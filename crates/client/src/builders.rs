//! Payload builder interfaces.
//!
//! Builders own all cell encoding. They return transaction-ready payloads or a
//! [`FormatError`] when the input cannot be encoded.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tondns_core::{Address, FormatError, RecordChange, SubdomainName};

use crate::error::ClientResult;
use crate::wallet::TxPayload;

/// Encodes resolver record updates (set site/storage/wallet/resolver, delete).
pub trait RecordBodyBuilder: Send + Sync {
    /// Payload to send to the resolver for this change.
    fn record_payload(&self, change: &RecordChange) -> Result<TxPayload, FormatError>;
}

/// Parameters of a subdomain collection deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionParams {
    /// Future collection owner, the connected wallet
    pub owner: Address,
    /// Royalty recipient for the network
    pub royalty: Address,
    /// Domain name without the `.ton` suffix
    pub domain_title: String,
    /// Address of the domain NFT
    pub domain_address: Address,
}

/// A message that deploys a new contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    /// Address the contract will live at
    pub destination: Address,
    /// Message carrying the state init
    pub payload: TxPayload,
}

/// Encodes subdomain collection deployments.
pub trait CollectionBuilder: Send + Sync {
    /// Deployment message for a collection.
    fn deploy_collection(&self, params: &CollectionParams) -> Result<Deployment, FormatError>;
}

/// Derives item addresses and encodes subdomain mints.
#[async_trait]
pub trait SubdomainBuilder: Send + Sync {
    /// Address the item for `name` has (or would have) in `collection`.
    async fn item_address(
        &self,
        collection: &Address,
        name: &SubdomainName,
    ) -> ClientResult<Address>;

    /// Payload to send to `collection` to mint `name`.
    fn deploy_subdomain(
        &self,
        collection: &Address,
        name: &SubdomainName,
    ) -> Result<TxPayload, FormatError>;
}
