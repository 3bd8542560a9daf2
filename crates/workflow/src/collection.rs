//! Turns an owned `.ton` domain into a subdomain NFT collection.
//!
//! The domain item is looked up under the network's root DNS collection and
//! must belong to the connected wallet. The collection preview is derived
//! from the domain name alone.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use tondns_client::{CollectionBuilder, CollectionParams, Notice};
use tondns_core::{Address, DisplayEntity, PreviewConfig};

use crate::context::DnsContext;
use crate::error::{DnsError, DnsResult, ValidationError};
use crate::ownership::ensure_owned;
use crate::record_editor::SENT_MESSAGE;
use crate::verification::{CheckTicket, Verification, VerificationState};

/// What the deployed collection will look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionPreview {
    pub title: String,
    pub subtitle: String,
    pub image: String,
}

impl CollectionPreview {
    /// Fixed template over the domain label.
    pub fn for_domain(domain: &str, preview: &PreviewConfig) -> Self {
        let lower = domain.to_lowercase();
        let mut chars = lower.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        Self {
            title: format!("{} DNS Domains", capitalized),
            subtitle: format!("Domains *.{}.ton", lower),
            image: preview.domain_image(&lower),
        }
    }
}

/// A domain owned by the connected wallet, ready to back a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedDomain {
    pub address: Address,
    pub display: DisplayEntity,
    pub preview: CollectionPreview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployerPhase {
    Unverified,
    Checking,
    Verified,
    Deploying,
}

#[derive(Debug, Default)]
struct DeployerState {
    domain: Verification<VerifiedDomain>,
    deploying: bool,
}

pub struct CollectionDeployer {
    ctx: DnsContext,
    builder: Arc<dyn CollectionBuilder>,
    state: Mutex<DeployerState>,
}

impl CollectionDeployer {
    pub fn new(ctx: DnsContext, builder: Arc<dyn CollectionBuilder>) -> Self {
        Self {
            ctx,
            builder,
            state: Mutex::new(DeployerState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DeployerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> DeployerPhase {
        let state = self.lock();
        if state.deploying {
            return DeployerPhase::Deploying;
        }
        match state.domain.state() {
            VerificationState::Checking => DeployerPhase::Checking,
            VerificationState::Valid(_) => DeployerPhase::Verified,
            _ => DeployerPhase::Unverified,
        }
    }

    pub fn domain_input(&self) -> String {
        self.lock().domain.input().to_string()
    }

    pub fn set_domain_input(&self, input: impl Into<String>) {
        self.lock().domain.set_input(input);
    }

    pub fn domain(&self) -> Option<VerifiedDomain> {
        self.lock().domain.valid().cloned()
    }

    /// Preview of the collection for the verified domain.
    pub fn preview(&self) -> Option<CollectionPreview> {
        self.lock()
            .domain
            .valid()
            .map(|domain| domain.preview.clone())
    }

    /// Check that the domain exists and the wallet owns it.
    pub async fn check_domain(&self) -> DnsResult<VerifiedDomain> {
        let begun = self.lock().domain.begin("Domain check");
        let ticket = self.ctx.report(begun)?;

        let result = self.verify_domain(ticket.input()).await;

        if !self.lock().domain.finish(&ticket, &result) {
            return result;
        }
        if let Ok(domain) = &result {
            tracing::info!(domain = %domain.address, title = %domain.display.title, "Domain ownership verified");
            self.ctx.notify(Notice::success("Domain verified"));
        }
        self.ctx.report(result)
    }

    async fn verify_domain(&self, raw: &str) -> DnsResult<VerifiedDomain> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty("a DNS address").into());
        }
        let address = Address::parse(raw)?;
        let root = self.ctx.profile().dns_collection;

        let item = self
            .ctx
            .chain
            .domain_item(&address, &root)
            .await?
            .filter(|item| item.has_title())
            .ok_or(DnsError::NotFound { address })?;

        let wallet = self.ctx.wallet_address()?;
        ensure_owned(&address, item.owner_address.as_deref(), &wallet)?;

        let preview = CollectionPreview::for_domain(&item.title, &self.ctx.config.preview);
        Ok(VerifiedDomain {
            address,
            display: DisplayEntity::from_nft(item, &address),
            preview,
        })
    }

    /// Send the collection deployment for the verified domain.
    ///
    /// On success the deployer starts over with an empty input.
    pub async fn deploy(&self) -> DnsResult<Address> {
        let prepared = self.ctx.report(self.begin_deploy());
        let (params, ticket) = prepared?;

        let result = self.send_deploy(&params).await;

        {
            let mut state = self.lock();
            state.deploying = false;
            if result.is_ok() && state.domain.is_current(&ticket) {
                state.domain.clear();
            }
        }

        match result {
            Ok(collection) => {
                tracing::info!(collection = %collection, domain = %params.domain_address, "Collection deploy sent");
                self.ctx.notify(Notice::sent(SENT_MESSAGE));
                Ok(collection)
            }
            Err(err) => self.ctx.report(Err(err)),
        }
    }

    fn begin_deploy(&self) -> DnsResult<(CollectionParams, CheckTicket)> {
        let owner = self.ctx.wallet_address()?;
        let royalty = self.ctx.profile().royalty_address;
        let mut state = self.lock();
        if state.deploying {
            return Err(DnsError::Busy("Collection deployment"));
        }
        let domain = state
            .domain
            .valid()
            .cloned()
            .ok_or(ValidationError::NotReady("Verify the domain first"))?;
        state.deploying = true;
        let params = CollectionParams {
            owner,
            royalty,
            domain_title: domain.display.title,
            domain_address: domain.address,
        };
        Ok((params, state.domain.ticket()))
    }

    async fn send_deploy(&self, params: &CollectionParams) -> DnsResult<Address> {
        let deployment = self.builder.deploy_collection(params)?;
        self.ctx
            .wallet
            .send_transaction(&deployment.destination, deployment.payload)
            .await?;
        Ok(deployment.destination)
    }

    /// Back to `Unverified` with an empty input.
    pub fn clear(&self) {
        self.lock().domain.clear();
    }
}
