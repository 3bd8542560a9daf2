//! The app as a whole: the three workflows plus page history.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tondns_client::{CollectionBuilder, RecordBodyBuilder, SubdomainBuilder, WalletSession};

use crate::collection::CollectionDeployer;
use crate::context::DnsContext;
use crate::navigation::Route;
use crate::record_editor::RecordEditor;
use crate::subdomain::SubdomainAllocator;

/// Payload encoders the workflows submit through the wallet.
#[derive(Clone)]
pub struct PayloadBuilders {
    pub records: Arc<dyn RecordBodyBuilder>,
    pub collections: Arc<dyn CollectionBuilder>,
    pub subdomains: Arc<dyn SubdomainBuilder>,
}

pub struct DnsApp {
    ctx: DnsContext,
    records: RecordEditor,
    subdomains: SubdomainAllocator,
    collections: CollectionDeployer,
    history: Mutex<Vec<Route>>,
}

impl DnsApp {
    pub fn new(ctx: DnsContext, builders: PayloadBuilders) -> Self {
        tracing::info!(network = %ctx.network(), "Starting DNS app");
        Self {
            records: RecordEditor::new(ctx.clone(), builders.records),
            subdomains: SubdomainAllocator::new(ctx.clone(), builders.subdomains),
            collections: CollectionDeployer::new(ctx.clone(), builders.collections),
            ctx,
            history: Mutex::new(vec![Route::Index]),
        }
    }

    fn history(&self) -> MutexGuard<'_, Vec<Route>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Header wallet controls.
    pub fn session(&self) -> WalletSession {
        self.ctx.session()
    }

    pub fn records(&self) -> &RecordEditor {
        &self.records
    }

    pub fn subdomains(&self) -> &SubdomainAllocator {
        &self.subdomains
    }

    pub fn collections(&self) -> &CollectionDeployer {
        &self.collections
    }

    pub fn current(&self) -> Route {
        self.history().last().cloned().unwrap_or(Route::Index)
    }

    /// Go to `route`. A manage link carrying an address opens and verifies it.
    pub async fn navigate(&self, route: Route) {
        tracing::debug!(route = %route, "Navigate");
        self.history().push(route.clone());

        if let Route::Manage {
            address: Some(address),
        } = route
        {
            // Failures are notified and kept in the editor state.
            if let Err(err) = self.records.open(&address).await {
                tracing::debug!(address = %address, error = %err, "Deep link did not verify");
            }
        }
    }

    /// Go to a path such as `/manage?address=...`.
    pub async fn open_path(&self, target: &str) {
        self.navigate(Route::resolve(target)).await;
    }

    /// Leave the current page. The index is never left.
    pub fn back(&self) -> Route {
        let mut history = self.history();
        if history.len() > 1 {
            history.pop();
        }
        history.last().cloned().unwrap_or(Route::Index)
    }
}
