//! Interfaces to the collaborators of the DNS workflows.
//!
//! Nothing in this crate talks to a network. It defines the seams the
//! workflows are written against, so that a host (a Mini App bridge, a CLI,
//! a test) can plug in its own implementations:
//!
//! - [`WalletConnector`]: connected account, network, transaction sending
//! - [`ChainApi`]: NFT metadata, get-methods, code hashes
//! - [`RecordBodyBuilder`], [`CollectionBuilder`], [`SubdomainBuilder`]:
//!   opaque payload encoders
//! - [`Notifier`]: transient user notifications
//!
//! [`WalletSession`] wraps a connector with the header actions.

pub mod builders;
pub mod chain;
pub mod error;
pub mod notify;
pub mod session;
pub mod wallet;

pub use builders::{
    CollectionBuilder, CollectionParams, Deployment, RecordBodyBuilder, SubdomainBuilder,
};
pub use chain::{ChainApi, GetMethodOutcome, StackEntry};
pub use error::{ClientError, ClientResult};
pub use notify::{Notice, Notifier, Severity};
pub use session::WalletSession;
pub use wallet::{TxPayload, WalletConnector};
