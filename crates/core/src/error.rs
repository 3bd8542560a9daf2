//! Core error types

use thiserror::Error;

use crate::records::RecordKind;

/// Errors produced while parsing a chain address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Nothing to parse
    #[error("Address is empty")]
    Empty,

    /// Raw `<workchain>:<hex>` form is malformed
    #[error("Invalid raw address: {0}")]
    InvalidRaw(String),

    /// User-friendly base64 form is malformed
    #[error("Invalid user-friendly address: {0}")]
    InvalidFriendly(String),

    /// CRC16 over the user-friendly payload does not match
    #[error("Address checksum mismatch")]
    ChecksumMismatch,

    /// Tag byte is neither bounceable nor non-bounceable
    #[error("Unknown address tag: {0:#04x}")]
    UnknownTag(u8),
}

/// Domain-specific format errors for DNS record values and payloads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Site record value is not an ADNL address
    #[error("Invalid ADNL address: {0}")]
    Adnl(String),

    /// Storage record value is not a bag id
    #[error("Invalid storage bag id: {0}")]
    StorageBag(String),

    /// Wallet or next-resolver value is not a chain address
    #[error("Invalid {kind} address: {source}")]
    Address {
        /// Record being edited
        kind: RecordKind,
        /// Underlying parse failure
        source: AddressError,
    },

    /// A payload builder rejected its input
    #[error("Payload encoding failed: {0}")]
    Encoding(String),
}

/// Reasons a subdomain name is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    /// Nothing entered
    #[error("Subdomain name is empty")]
    Empty,

    /// More than the allowed number of characters
    #[error("Subdomain name too long: {len} > {max}")]
    TooLong {
        /// Length of the input
        len: usize,
        /// Maximum accepted length
        max: usize,
    },

    /// Character outside `[a-z0-9-]`
    #[error("Invalid character '{0}' in subdomain name, use only a-z, 0-9 and '-'")]
    InvalidChar(char),

    /// Leading or trailing hyphen
    #[error("Subdomain name cannot start or end with '-'")]
    EdgeHyphen,
}
