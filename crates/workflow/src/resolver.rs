//! Address and resolver validation.
//!
//! A target is accepted when its address parses and its `dnsresolve`
//! get-method runs successfully. Display metadata is then looked up, trying
//! the NFT item API, then the collection API, and finally falling back to a
//! placeholder built from the address. Metadata lookups never fail the
//! validation.

use serde::{Deserialize, Serialize};

use tondns_core::{Address, DisplayEntity};

use crate::context::DnsContext;
use crate::error::{DnsError, DnsResult, ValidationError};

/// Get-method every DNS resolver contract implements.
pub const DNSRESOLVE_METHOD: &str = "dnsresolve";

/// A resolver that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedResolver {
    pub address: Address,
    pub display: DisplayEntity,
}

/// Validates user-entered resolver addresses.
#[derive(Clone)]
pub struct ResolverValidator {
    ctx: DnsContext,
}

impl ResolverValidator {
    pub fn new(ctx: DnsContext) -> Self {
        Self { ctx }
    }

    /// Parse `raw`, require a working `dnsresolve`, then resolve display data.
    pub async fn validate(&self, raw: &str) -> DnsResult<VerifiedResolver> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty("a DNS address").into());
        }
        let address = Address::parse(raw)?;

        tracing::info!(address = %address, "Probing resolver");
        let outcome = self
            .ctx
            .chain
            .run_get_method(&address, DNSRESOLVE_METHOD, &[])
            .await?;
        if !outcome.success() {
            tracing::info!(address = %address, exit_code = outcome.exit_code, "dnsresolve failed");
            return Err(DnsError::NotAResolver { address });
        }

        let display = self.display_entity(&address).await;
        Ok(VerifiedResolver { address, display })
    }

    /// Item metadata, else collection metadata, else a placeholder.
    pub async fn display_entity(&self, address: &Address) -> DisplayEntity {
        match self.ctx.chain.nft_item(address).await {
            Ok(Some(item)) if item.has_title() => return DisplayEntity::from_nft(item, address),
            Ok(_) => {}
            Err(err) => tracing::warn!(address = %address, error = %err, "NFT item lookup failed"),
        }

        self.ctx.pace().await;

        match self.ctx.chain.nft_collection(address).await {
            Ok(Some(collection)) if collection.has_title() => {
                return DisplayEntity::from_nft(collection, address)
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(address = %address, error = %err, "NFT collection lookup failed")
            }
        }

        tracing::debug!(address = %address, "No NFT metadata, using placeholder");
        DisplayEntity::placeholder(address)
    }
}
