//! Errors reported by external collaborators.

use thiserror::Error;

/// Failure of a wallet or chain API call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No wallet is connected
    #[error("Wallet is not connected")]
    NotConnected,

    /// The user or wallet declined to sign
    #[error("Transaction rejected by wallet: {0}")]
    Rejected(String),

    /// Request to the chain API failed
    #[error("Chain API request failed: {0}")]
    Transport(String),

    /// The chain API answered with something unexpected
    #[error("Unexpected chain API response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Wrap any displayable transport failure.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for collaborator calls.
pub type ClientResult<T> = Result<T, ClientError>;
