//! DNS record editor.
//!
//! # State Transitions
//!
//! ```text
//! Unverified
//!     ↓ (verify_resolver)
//! Verifying
//!     ↓ (dnsresolve ok)
//! Verified ── per record kind: Idle → Saving → Idle (+ last outcome)
//! ```
//!
//! Record forms are only usable in `Verified`. Each record kind saves
//! independently; a second save of the same kind while the first is in
//! flight is rejected as busy.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use tondns_client::{Notice, RecordBodyBuilder};
use tondns_core::{Address, DomainRecordSet, RecordChange, RecordKind};

use crate::context::DnsContext;
use crate::error::{DnsError, DnsResult, ValidationError};
use crate::ownership::ensure_owned;
use crate::resolver::{ResolverValidator, VerifiedResolver};
use crate::verification::{Verification, VerificationState};

/// Notification shown once the wallet accepted a transaction.
pub const SENT_MESSAGE: &str =
    "Transaction confirmed by wallet. Waiting for network confirmation.";

/// Resolver verification as shown by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolverPhase {
    Unverified,
    Verifying,
    Verified,
}

/// Save state of one record kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
}

/// How the last save of a record kind ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveOutcome {
    /// Wallet accepted the transaction; finality is not tracked
    Confirmed,
    /// Save failed with the given message
    Failed(String),
}

#[derive(Debug, Default)]
struct RecordSlot {
    state: SaveState,
    last_outcome: Option<SaveOutcome>,
}

#[derive(Debug, Default)]
struct EditorState {
    resolver: Verification<VerifiedResolver>,
    records: DomainRecordSet,
    slots: BTreeMap<RecordKind, RecordSlot>,
}

/// Edits the site, storage, wallet and next-resolver records of a domain.
pub struct RecordEditor {
    ctx: DnsContext,
    validator: ResolverValidator,
    builder: Arc<dyn RecordBodyBuilder>,
    state: Mutex<EditorState>,
}

impl RecordEditor {
    pub fn new(ctx: DnsContext, builder: Arc<dyn RecordBodyBuilder>) -> Self {
        Self {
            validator: ResolverValidator::new(ctx.clone()),
            ctx,
            builder,
            state: Mutex::new(EditorState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resolver_input(&self) -> String {
        self.lock().resolver.input().to_string()
    }

    /// Replace the resolver address input. Any change drops the verification.
    pub fn set_resolver_input(&self, input: impl Into<String>) {
        self.lock().resolver.set_input(input);
    }

    pub fn phase(&self) -> ResolverPhase {
        match self.lock().resolver.state() {
            VerificationState::Checking => ResolverPhase::Verifying,
            VerificationState::Valid(_) => ResolverPhase::Verified,
            VerificationState::Unchecked | VerificationState::Invalid(_) => {
                ResolverPhase::Unverified
            }
        }
    }

    /// The verified resolver, if any.
    pub fn resolver(&self) -> Option<VerifiedResolver> {
        self.lock().resolver.valid().cloned()
    }

    /// Error from the last failed verification.
    pub fn resolver_error(&self) -> Option<DnsError> {
        match self.lock().resolver.state() {
            VerificationState::Invalid(err) => Some(err.clone()),
            _ => None,
        }
    }

    /// Verify the current resolver input.
    pub async fn verify_resolver(&self) -> DnsResult<VerifiedResolver> {
        let begun = self.lock().resolver.begin("Resolver verification");
        let ticket = self.ctx.report(begun)?;

        let result = self.validator.validate(ticket.input()).await;

        if !self.lock().resolver.finish(&ticket, &result) {
            return result;
        }
        if let Ok(resolver) = &result {
            tracing::info!(resolver = %resolver.address, "Resolver verified");
            self.ctx.notify(Notice::success("DNS resolver verified"));
        }
        self.ctx.report(result)
    }

    /// Open the editor on `address`, as a `?address=` deep link does.
    ///
    /// Parsable addresses are put into canonical form first.
    pub async fn open(&self, address: &str) -> DnsResult<VerifiedResolver> {
        let input = Address::normalize(address).unwrap_or_else(|_| address.trim().to_string());
        self.set_resolver_input(input);
        self.verify_resolver().await
    }

    /// Back to `Unverified` with an empty input.
    pub fn clear_resolver(&self) {
        self.lock().resolver.clear();
    }

    pub fn field(&self, kind: RecordKind) -> String {
        self.lock().records.field(kind).to_string()
    }

    pub fn set_field(&self, kind: RecordKind, value: impl Into<String>) {
        self.lock().records.set_field(kind, value);
    }

    pub fn site_in_storage(&self) -> bool {
        self.lock().records.site_in_storage()
    }

    pub fn set_site_in_storage(&self, in_storage: bool) {
        self.lock().records.set_site_in_storage(in_storage);
    }

    pub fn save_state(&self, kind: RecordKind) -> SaveState {
        self.lock()
            .slots
            .get(&kind)
            .map(|slot| slot.state)
            .unwrap_or_default()
    }

    pub fn last_outcome(&self, kind: RecordKind) -> Option<SaveOutcome> {
        self.lock()
            .slots
            .get(&kind)
            .and_then(|slot| slot.last_outcome.clone())
    }

    /// Save one record to the verified resolver.
    ///
    /// An empty field deletes the record. A malformed value fails before any
    /// network call.
    pub async fn save(&self, kind: RecordKind) -> DnsResult<RecordChange> {
        let prepared = self.ctx.report(self.prepare_save(kind));
        let (resolver, change) = prepared?;

        let result = self.submit(&resolver, &change).await;

        {
            let mut state = self.lock();
            let slot = state.slots.entry(kind).or_default();
            slot.state = SaveState::Idle;
            slot.last_outcome = Some(match &result {
                Ok(()) => SaveOutcome::Confirmed,
                Err(err) => SaveOutcome::Failed(err.to_string()),
            });
        }

        match result {
            Ok(()) => {
                tracing::info!(resolver = %resolver.address, record = %kind, delete = change.is_delete(), "Record transaction sent");
                self.ctx.notify(Notice::sent(SENT_MESSAGE));
                Ok(change)
            }
            Err(err) => self.ctx.report(Err(err)),
        }
    }

    /// Validate and enter `Saving` without awaiting anything.
    fn prepare_save(&self, kind: RecordKind) -> DnsResult<(VerifiedResolver, RecordChange)> {
        let mut state = self.lock();
        let resolver = state
            .resolver
            .valid()
            .cloned()
            .ok_or(ValidationError::NotReady("Verify the DNS resolver first"))?;

        if state.slots.get(&kind).map(|slot| slot.state) == Some(SaveState::Saving) {
            return Err(DnsError::Busy("Saving this record"));
        }

        let change = state.records.change_for(kind)?;
        state.slots.entry(kind).or_default().state = SaveState::Saving;
        Ok((resolver, change))
    }

    async fn submit(&self, resolver: &VerifiedResolver, change: &RecordChange) -> DnsResult<()> {
        if self.ctx.config.records.require_ownership {
            let wallet = self.ctx.wallet_address()?;
            ensure_owned(
                &resolver.address,
                Some(resolver.display.owner_address.as_str()),
                &wallet,
            )?;
        }
        let payload = self.builder.record_payload(change)?;
        self.ctx
            .wallet
            .send_transaction(&resolver.address, payload)
            .await?;
        Ok(())
    }
}
