//! Error taxonomy of the DNS workflows.
//!
//! Every user-triggered action returns a [`DnsResult`]. The same error is
//! also shown to the user as a notification, so `Display` strings are
//! written for end users.

use thiserror::Error;

use tondns_client::ClientError;
use tondns_core::{Address, AddressError, FormatError, NameError, SubdomainName};

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is blank
    #[error("Please enter {0}")]
    Empty(&'static str),

    /// Subdomain name breaks the naming rules
    #[error("Invalid subdomain name: {0}")]
    Name(#[from] NameError),

    /// Action invoked before its prerequisites were verified
    #[error("{0}")]
    NotReady(&'static str),
}

/// Errors surfaced by the DNS workflows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DnsError {
    /// Empty or malformed user input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Address text could not be parsed
    #[error("Invalid address: {0}")]
    MalformedAddress(#[from] AddressError),

    /// `dnsresolve` did not succeed on the target
    #[error("{address} is not a DNS resolver")]
    NotAResolver { address: Address },

    /// Record value failed its format check
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Entity belongs to someone other than the connected wallet
    #[error("{entity} does not belong to the connected wallet")]
    NotOwned {
        entity: Address,
        /// Declared owner, `None` when the API reported none
        owner: Option<String>,
    },

    /// Contract code is not a known collection template
    #[error("{address} is not a recognized subdomain collection")]
    UnrecognizedContract {
        address: Address,
        code_hash: Option<String>,
    },

    /// Nothing known at the address
    #[error("Nothing found at {address}")]
    NotFound { address: Address },

    /// Subdomain already minted
    #[error("Subdomain '{name}' is already taken")]
    NameTaken { name: SubdomainName },

    /// Action needs a connected wallet
    #[error("Wallet is not connected")]
    WalletNotConnected,

    /// Same action already in flight
    #[error("{0} is already in progress")]
    Busy(&'static str),

    /// Wallet or chain API failure
    #[error("Network error: {0}")]
    Network(ClientError),
}

impl From<ClientError> for DnsError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotConnected => DnsError::WalletNotConnected,
            other => DnsError::Network(other),
        }
    }
}

impl From<NameError> for DnsError {
    fn from(err: NameError) -> Self {
        DnsError::Validation(ValidationError::Name(err))
    }
}

impl DnsError {
    /// Whether the error was raised before touching the network.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            DnsError::Validation(_)
                | DnsError::MalformedAddress(_)
                | DnsError::Format(_)
                | DnsError::WalletNotConnected
                | DnsError::Busy(_)
        )
    }
}

/// Result type for workflow actions.
pub type DnsResult<T> = Result<T, DnsError>;
