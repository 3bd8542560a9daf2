//! Subdomain allocator.
//!
//! # State Transitions
//!
//! ```text
//! CollectionUnset
//!     ↓ (check_collection)
//! CollectionChecking
//!     ↓ (known code hash, exists, owned)
//! CollectionSet
//!     ↓ (check_name)
//! NameChecking
//!     ↓ (item has no metadata)
//! NameAvailable
//!     ↓ (deploy)
//! Deploying
//!     ↓ (wallet accepted)
//! Deployed ── name reset, collection stays verified
//! ```
//!
//! Changing the collection input drops both verifications. A failed deploy
//! leaves everything as it was.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use tondns_client::{Notice, SubdomainBuilder};
use tondns_core::{Address, SubdomainName};

use crate::context::DnsContext;
use crate::error::{DnsError, DnsResult, ValidationError};
use crate::ownership::ensure_owned;
use crate::record_editor::SENT_MESSAGE;
use crate::verification::{CheckTicket, Verification, VerificationState};

/// A subdomain collection owned by the connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedCollection {
    pub address: Address,
    pub title: String,
    /// Parent domain label used for preview images
    pub domain: String,
    pub image: String,
}

/// A free subdomain name within a verified collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableName {
    pub name: SubdomainName,
    pub item_address: Address,
    pub preview_image: String,
}

/// A subdomain whose deploy transaction the wallet accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedSubdomain {
    pub collection: Address,
    pub name: SubdomainName,
    pub item_address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocatorPhase {
    CollectionUnset,
    CollectionChecking,
    CollectionSet,
    NameChecking,
    NameAvailable,
    Deploying,
    Deployed,
}

#[derive(Debug, Default)]
struct AllocatorState {
    collection: Verification<VerifiedCollection>,
    name: Verification<AvailableName>,
    deploying: bool,
    last_deployed: Option<DeployedSubdomain>,
}

/// Mints subdomains in a collection the wallet owns.
pub struct SubdomainAllocator {
    ctx: DnsContext,
    builder: Arc<dyn SubdomainBuilder>,
    state: Mutex<AllocatorState>,
}

impl SubdomainAllocator {
    pub fn new(ctx: DnsContext, builder: Arc<dyn SubdomainBuilder>) -> Self {
        Self {
            ctx,
            builder,
            state: Mutex::new(AllocatorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, AllocatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> AllocatorPhase {
        let state = self.lock();
        if state.deploying {
            return AllocatorPhase::Deploying;
        }
        match state.collection.state() {
            VerificationState::Checking => return AllocatorPhase::CollectionChecking,
            VerificationState::Valid(_) => {}
            _ => return AllocatorPhase::CollectionUnset,
        }
        match state.name.state() {
            VerificationState::Checking => AllocatorPhase::NameChecking,
            VerificationState::Valid(_) => AllocatorPhase::NameAvailable,
            VerificationState::Unchecked
                if state.name.input().is_empty() && state.last_deployed.is_some() =>
            {
                AllocatorPhase::Deployed
            }
            _ => AllocatorPhase::CollectionSet,
        }
    }

    pub fn collection_input(&self) -> String {
        self.lock().collection.input().to_string()
    }

    pub fn set_collection_input(&self, input: impl Into<String>) {
        let mut state = self.lock();
        let before = state.collection.input().to_string();
        state.collection.set_input(input);
        if state.collection.input() != before {
            state.name.invalidate();
        }
    }

    pub fn collection(&self) -> Option<VerifiedCollection> {
        self.lock().collection.valid().cloned()
    }

    pub fn name_input(&self) -> String {
        self.lock().name.input().to_string()
    }

    pub fn set_name_input(&self, input: impl Into<String>) {
        self.lock().name.set_input(input);
    }

    pub fn available_name(&self) -> Option<AvailableName> {
        self.lock().name.valid().cloned()
    }

    pub fn last_deployed(&self) -> Option<DeployedSubdomain> {
        self.lock().last_deployed.clone()
    }

    /// Verify the collection input.
    pub async fn check_collection(&self) -> DnsResult<VerifiedCollection> {
        let begun = self.lock().collection.begin("Collection check");
        let ticket = self.ctx.report(begun)?;

        let result = self.verify_collection(ticket.input()).await;

        if !self.lock().collection.finish(&ticket, &result) {
            return result;
        }
        if let Ok(collection) = &result {
            tracing::info!(collection = %collection.address, title = %collection.title, "Collection verified");
            self.ctx.notify(Notice::success("Collection verified"));
        }
        self.ctx.report(result)
    }

    async fn verify_collection(&self, raw: &str) -> DnsResult<VerifiedCollection> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty("a collection address").into());
        }
        let address = Address::parse(raw)?;

        let code_hash = self.ctx.chain.code_hash(&address).await?;
        match &code_hash {
            Some(hash) if self.ctx.config.collections.is_allowed(hash) => {}
            _ => {
                tracing::warn!(collection = %address, code_hash = ?code_hash, "Unknown collection code");
                return Err(DnsError::UnrecognizedContract { address, code_hash });
            }
        }

        self.ctx.pace().await;
        let collection = self
            .ctx
            .chain
            .nft_collection(&address)
            .await?
            .filter(|collection| collection.has_title())
            .ok_or(DnsError::NotFound { address })?;

        self.ctx.pace().await;
        let wallet = self.ctx.wallet_address()?;
        ensure_owned(&address, collection.owner_address.as_deref(), &wallet)?;

        let domain = collection
            .title
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        Ok(VerifiedCollection {
            address,
            image: self.ctx.config.preview.domain_image(&domain),
            title: collection.title,
            domain,
        })
    }

    /// Check that the name input is well formed and not minted yet.
    pub async fn check_name(&self) -> DnsResult<AvailableName> {
        let started = self.ctx.report(self.begin_name_check());
        let (ticket, collection) = started?;

        let result = self.find_available(&collection, ticket.input()).await;

        if !self.lock().name.finish(&ticket, &result) {
            return result;
        }
        if let Ok(available) = &result {
            tracing::info!(name = %available.name, item = %available.item_address, "Subdomain available");
            self.ctx.notify(Notice::success("Subdomain is available"));
        }
        self.ctx.report(result)
    }

    fn begin_name_check(&self) -> DnsResult<(CheckTicket, VerifiedCollection)> {
        let mut state = self.lock();
        let collection = state
            .collection
            .valid()
            .cloned()
            .ok_or(ValidationError::NotReady("Verify the collection first"))?;
        let ticket = state.name.begin("Name check")?;
        Ok((ticket, collection))
    }

    async fn find_available(
        &self,
        collection: &VerifiedCollection,
        raw: &str,
    ) -> DnsResult<AvailableName> {
        let name = SubdomainName::from_user_input(raw)?;
        let item_address = self.builder.item_address(&collection.address, &name).await?;

        self.ctx.pace().await;
        if let Some(item) = self.ctx.chain.nft_item(&item_address).await? {
            if item.has_title() {
                return Err(DnsError::NameTaken { name });
            }
        }

        Ok(AvailableName {
            preview_image: self
                .ctx
                .config
                .preview
                .subdomain_image(name.as_str(), &collection.domain),
            name,
            item_address,
        })
    }

    /// Send the mint transaction for the available name.
    pub async fn deploy(&self) -> DnsResult<DeployedSubdomain> {
        let prepared = self.ctx.report(self.begin_deploy());
        let (collection, available, ticket) = prepared?;

        let result = self.send_deploy(&collection, &available).await;

        let deployed = {
            let mut state = self.lock();
            state.deploying = false;
            match result {
                Ok(()) => {
                    let deployed = DeployedSubdomain {
                        collection: collection.address,
                        name: available.name,
                        item_address: available.item_address,
                    };
                    if state.name.is_current(&ticket) {
                        state.name.clear();
                    }
                    state.last_deployed = Some(deployed.clone());
                    Ok(deployed)
                }
                Err(err) => Err(err),
            }
        };

        match deployed {
            Ok(deployed) => {
                tracing::info!(name = %deployed.name, collection = %deployed.collection, "Subdomain deploy sent");
                self.ctx.notify(Notice::sent(SENT_MESSAGE));
                Ok(deployed)
            }
            Err(err) => self.ctx.report(Err(err)),
        }
    }

    fn begin_deploy(&self) -> DnsResult<(VerifiedCollection, AvailableName, CheckTicket)> {
        self.ctx.wallet_address()?;
        let mut state = self.lock();
        if state.deploying {
            return Err(DnsError::Busy("Subdomain deployment"));
        }
        let collection = state
            .collection
            .valid()
            .cloned()
            .ok_or(ValidationError::NotReady("Verify the collection first"))?;
        let available = state
            .name
            .valid()
            .cloned()
            .ok_or(ValidationError::NotReady("Check the subdomain name first"))?;
        state.deploying = true;
        Ok((collection, available, state.name.ticket()))
    }

    async fn send_deploy(
        &self,
        collection: &VerifiedCollection,
        available: &AvailableName,
    ) -> DnsResult<()> {
        let payload = self
            .builder
            .deploy_subdomain(&collection.address, &available.name)?;
        self.ctx
            .wallet
            .send_transaction(&collection.address, payload)
            .await?;
        Ok(())
    }

    /// Forget the name so another one can be checked.
    pub fn reset_name(&self) {
        let mut state = self.lock();
        state.name.clear();
        state.last_deployed = None;
    }

    /// Back to `CollectionUnset`.
    pub fn clear_collection(&self) {
        let mut state = self.lock();
        state.collection.clear();
        state.name.clear();
        state.last_deployed = None;
    }
}
