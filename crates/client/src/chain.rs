//! Read-only chain API interface.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use tondns_core::{Address, NftEntity};

use crate::error::ClientResult;

/// Argument to a get-method call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StackEntry {
    /// Integer
    Num(i64),
    /// Serialized slice
    Slice(Vec<u8>),
    /// Serialized cell
    Cell(Vec<u8>),
}

/// Result of a get-method call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMethodOutcome {
    /// TVM exit code
    pub exit_code: i32,
    /// Returned stack, left undecoded
    #[serde(default)]
    pub stack: Vec<serde_json::Value>,
}

impl GetMethodOutcome {
    /// TVM treats exit codes 0 and 1 as success.
    pub fn success(&self) -> bool {
        matches!(self.exit_code, 0 | 1)
    }
}

/// TON HTTP API operations the workflows rely on.
///
/// `Ok(None)` means the API answered but knows no such entity.
#[async_trait]
pub trait ChainApi: Send + Sync {
    /// Fetch NFT item metadata.
    async fn nft_item(&self, address: &Address) -> ClientResult<Option<NftEntity>>;

    /// Fetch NFT collection metadata.
    async fn nft_collection(&self, address: &Address) -> ClientResult<Option<NftEntity>>;

    /// Fetch a domain item, only if it belongs to `collection`.
    async fn domain_item(
        &self,
        item: &Address,
        collection: &Address,
    ) -> ClientResult<Option<NftEntity>>;

    /// Run a get-method on a contract.
    async fn run_get_method(
        &self,
        address: &Address,
        method: &str,
        args: &[StackEntry],
    ) -> ClientResult<GetMethodOutcome>;

    /// Base64 hash of the contract code, `None` for uninitialized accounts.
    async fn code_hash(&self, address: &Address) -> ClientResult<Option<String>>;
}
