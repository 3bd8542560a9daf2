//! Core types for the TON DNS domain manager.
//!
//! This crate provides the pieces every workflow shares: chain addresses and
//! their canonical form, DNS record formats, subdomain names, network profiles and
//! configuration, error types, and logging setup.

pub mod address;
pub mod config;
pub mod error;
pub mod logging;
pub mod names;
pub mod records;
pub mod types;

pub use address::{shorten, Address, AddressFlags};
pub use config::{
    CollectionPolicy, Config, NetworkProfile, PreviewConfig, RecordsConfig, VerificationConfig,
    SUBDOMAIN_COLLECTION_CODE_HASH,
};
pub use error::{AddressError, FormatError, NameError};
pub use names::{SubdomainName, MAX_SUBDOMAIN_LEN};
pub use records::{AdnlAddress, DomainRecordSet, RecordChange, RecordKind, RecordValue, StorageBagId};
pub use types::{DisplayEntity, Network, NftEntity};
