//! DNS record kinds and value formats.
//!
//! A resolver contract answers `dnsresolve` queries per category. The four
//! categories managed here map to record values as follows:
//!
//! | kind           | category            | value                     |
//! |----------------|---------------------|---------------------------|
//! | `Site`         | `site`              | ADNL address (+ storage)  |
//! | `Storage`      | `storage`           | storage bag id            |
//! | `Wallet`       | `wallet`            | chain address             |
//! | `NextResolver` | `dns_next_resolver` | chain address             |
//!
//! An empty input means "delete this record".

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fmt;

use crate::address::{Address, CRC16};
use crate::error::FormatError;

/// Tag byte of the 35-byte ADNL user-friendly payload.
const ADNL_TAG: u8 = 0x2d;
const ADNL_FRIENDLY_CHARS: usize = 55;

/// Record categories editable on a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// TON Site ADNL address
    Site,
    /// TON Storage bag
    Storage,
    /// Wallet address
    Wallet,
    /// Resolver for subdomains
    NextResolver,
}

impl RecordKind {
    /// All kinds, in form order.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Site,
        RecordKind::Storage,
        RecordKind::Wallet,
        RecordKind::NextResolver,
    ];

    /// DNS category name.
    pub fn category(&self) -> &'static str {
        match self {
            RecordKind::Site => "site",
            RecordKind::Storage => "storage",
            RecordKind::Wallet => "wallet",
            RecordKind::NextResolver => "dns_next_resolver",
        }
    }

    /// SHA-256 of the category name, the key used in resolver dictionaries.
    pub fn category_key(&self) -> [u8; 32] {
        Sha256::digest(self.category().as_bytes()).into()
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

/// ADNL address of a TON Site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdnlAddress([u8; 32]);

impl AdnlAddress {
    /// Parse a 64-char hex or 55-char base32 ADNL address.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let input = input.trim();
        if input.len() == 64 {
            let mut bytes = [0u8; 32];
            hex::decode_to_slice(input, &mut bytes)
                .map_err(|e| FormatError::Adnl(e.to_string()))?;
            return Ok(Self(bytes));
        }

        if input.len() != ADNL_FRIENDLY_CHARS {
            return Err(FormatError::Adnl(format!(
                "expected 64 hex or {} base32 characters, got {}",
                ADNL_FRIENDLY_CHARS,
                input.len()
            )));
        }

        // The leading 'f' is implied by the 0x2d tag and never written.
        let padded = format!("F{}", input.to_ascii_uppercase());
        let decoded = BASE32_NOPAD
            .decode(padded.as_bytes())
            .map_err(|e| FormatError::Adnl(format!("'{}': {}", input, e)))?;
        if decoded.len() != 35 || decoded[0] != ADNL_TAG {
            return Err(FormatError::Adnl(format!("unexpected ADNL tag in '{}'", input)));
        }
        let checksum = u16::from_be_bytes([decoded[33], decoded[34]]);
        if CRC16.checksum(&decoded[..33]) != checksum {
            return Err(FormatError::Adnl("checksum mismatch".to_string()));
        }

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded[1..33]);
        Ok(Self(bytes))
    }

    /// Raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for AdnlAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(35);
        payload.push(ADNL_TAG);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&CRC16.checksum(&payload).to_be_bytes());
        let encoded = BASE32_NOPAD.encode(&payload).to_ascii_lowercase();
        f.write_str(&encoded[1..])
    }
}

/// TON Storage bag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageBagId([u8; 32]);

impl StorageBagId {
    /// Parse a 64-char hex bag id.
    pub fn parse(input: &str) -> Result<Self, FormatError> {
        let input = input.trim();
        if input.len() != 64 {
            return Err(FormatError::StorageBag(format!(
                "expected 64 hex characters, got {}",
                input.len()
            )));
        }
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(input, &mut bytes)
            .map_err(|e| FormatError::StorageBag(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Raw 32 bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for StorageBagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A validated record value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValue {
    /// Site record, optionally served from TON Storage
    Site {
        /// Site ADNL address
        adnl: AdnlAddress,
        /// Host the site in TON Storage
        in_storage: bool,
    },
    /// Storage bag record
    Storage(StorageBagId),
    /// Wallet record
    Wallet(Address),
    /// Next resolver record
    NextResolver(Address),
}

impl RecordValue {
    /// Kind this value belongs to.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordValue::Site { .. } => RecordKind::Site,
            RecordValue::Storage(_) => RecordKind::Storage,
            RecordValue::Wallet(_) => RecordKind::Wallet,
            RecordValue::NextResolver(_) => RecordKind::NextResolver,
        }
    }
}

/// What saving a record field will do on chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordChange {
    /// Set the record to a value
    Set(RecordValue),
    /// Remove the record
    Delete(RecordKind),
}

impl RecordChange {
    /// Interpret a form field: empty means delete, otherwise the value must
    /// match the kind's format.
    pub fn from_input(kind: RecordKind, input: &str, in_storage: bool) -> Result<Self, FormatError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(RecordChange::Delete(kind));
        }

        let value = match kind {
            RecordKind::Site => RecordValue::Site {
                adnl: AdnlAddress::parse(input)?,
                in_storage,
            },
            RecordKind::Storage => RecordValue::Storage(StorageBagId::parse(input)?),
            RecordKind::Wallet => RecordValue::Wallet(parse_record_address(kind, input)?),
            RecordKind::NextResolver => {
                RecordValue::NextResolver(parse_record_address(kind, input)?)
            }
        };
        Ok(RecordChange::Set(value))
    }

    /// Kind affected by this change.
    pub fn kind(&self) -> RecordKind {
        match self {
            RecordChange::Set(value) => value.kind(),
            RecordChange::Delete(kind) => *kind,
        }
    }

    /// Whether this change removes the record.
    pub fn is_delete(&self) -> bool {
        matches!(self, RecordChange::Delete(_))
    }
}

fn parse_record_address(kind: RecordKind, input: &str) -> Result<Address, FormatError> {
    Address::parse(input).map_err(|source| FormatError::Address { kind, source })
}

/// Form contents of the record editor, one field per kind.
///
/// An empty field is an absent value and saves as a delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecordSet {
    fields: BTreeMap<RecordKind, String>,
    site_in_storage: bool,
}

impl DomainRecordSet {
    /// Empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a field's text.
    pub fn set_field(&mut self, kind: RecordKind, value: impl Into<String>) {
        self.fields.insert(kind, value.into());
    }

    /// Current text of a field, empty if never set.
    pub fn field(&self, kind: RecordKind) -> &str {
        self.fields.get(&kind).map(String::as_str).unwrap_or("")
    }

    /// Value of a field, `None` when it signals deletion.
    pub fn value(&self, kind: RecordKind) -> Option<&str> {
        let text = self.field(kind).trim();
        (!text.is_empty()).then_some(text)
    }

    /// Toggle the "host in TON Storage" flag of the site record.
    pub fn set_site_in_storage(&mut self, in_storage: bool) {
        self.site_in_storage = in_storage;
    }

    /// Whether the site record is hosted in TON Storage.
    pub fn site_in_storage(&self) -> bool {
        self.site_in_storage
    }

    /// Change that saving `kind` would submit.
    pub fn change_for(&self, kind: RecordKind) -> Result<RecordChange, FormatError> {
        RecordChange::from_input(kind, self.field(kind), self.site_in_storage)
    }
}
