//! Workflows of the TON DNS domain manager.
//!
//! Three user flows, each an explicit state machine driven by async actions:
//!
//! - [`RecordEditor`]: verify a DNS resolver, then set or delete its site,
//!   storage, wallet and next-resolver records
//! - [`SubdomainAllocator`]: verify an owned subdomain collection, check a
//!   name, mint it
//! - [`CollectionDeployer`]: verify an owned `.ton` domain and deploy a
//!   subdomain collection for it
//!
//! Workflows share a [`DnsContext`] holding the injected wallet, chain API,
//! notifier and configuration. Every action both returns its [`DnsResult`]
//! and reports failures through the notifier. State lives behind locks that
//! are never held across a network call, so a workflow can be shared between
//! tasks; a repeated action while one is in flight fails with
//! [`DnsError::Busy`].

pub mod app;
pub mod collection;
pub mod context;
pub mod error;
pub mod navigation;
pub mod ownership;
pub mod record_editor;
pub mod resolver;
pub mod subdomain;
pub mod verification;


pub use app::{DnsApp, PayloadBuilders};
pub use collection::{CollectionDeployer, CollectionPreview, DeployerPhase, VerifiedDomain};
pub use context::DnsContext;
pub use error::{DnsError, DnsResult, ValidationError};
pub use navigation::{index_menu, MenuEntry, Route};
pub use ownership::{check_ownership, ensure_owned, Ownership};
pub use record_editor::{RecordEditor, ResolverPhase, SaveOutcome, SaveState, SENT_MESSAGE};
pub use resolver::{ResolverValidator, VerifiedResolver, DNSRESOLVE_METHOD};
pub use subdomain::{
    AllocatorPhase, AvailableName, DeployedSubdomain, SubdomainAllocator, VerifiedCollection,
};
pub use verification::{CheckTicket, Verification, VerificationState};
