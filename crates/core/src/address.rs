//! TON account addresses.
//!
//! An account is identified by a workchain id and a 32-byte account hash. Users
//! paste addresses in one of two textual forms:
//!
//! ```text
//! raw            0:b774d95eb20543f186c06b371ab88ad704f7e256130caf96189368a7d0cb6ccf
//! user-friendly  EQC3dNlesgVD8YbAazcauIrXBPfiVhMMr5YYk2in0Mtsz0Bz
//! ```
//!
//! The user-friendly form is 36 bytes (`tag | workchain | hash | crc16`)
//! encoded as standard or URL-safe base64. The tag carries the bounceable and
//! test-only flags, which do not change the account identity.
//!
//! Every comparison between addresses goes through [`Address`], whose
//! [`Display`](std::fmt::Display) output is the canonical form: URL-safe,
//! bounceable, mainnet.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use crc::{Crc, CRC_16_XMODEM};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::AddressError;

const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const TAG_TEST_ONLY: u8 = 0x80;

const FRIENDLY_CHARS: usize = 48;
const FRIENDLY_BYTES: usize = 36;
const HASH_HEX_CHARS: usize = 64;

/// Checksum of the user-friendly address and ADNL encodings.
pub(crate) const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Flags carried by the user-friendly address tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AddressFlags {
    /// Bounceable (`EQ…`) or non-bounceable (`UQ…`)
    pub bounceable: bool,
    /// Address is only valid on testnet (`kQ…` / `0Q…`)
    pub test_only: bool,
}

impl AddressFlags {
    /// Flags used for the canonical rendering.
    pub const CANONICAL: AddressFlags = AddressFlags {
        bounceable: true,
        test_only: false,
    };

    /// Flags wallets use when displaying their own address.
    pub const WALLET: AddressFlags = AddressFlags {
        bounceable: false,
        test_only: false,
    };

    fn tag(self) -> u8 {
        let base = if self.bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if self.test_only {
            base | TAG_TEST_ONLY
        } else {
            base
        }
    }

    fn from_tag(tag: u8) -> Result<Self, AddressError> {
        let test_only = tag & TAG_TEST_ONLY != 0;
        let bounceable = match tag & !TAG_TEST_ONLY {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            _ => return Err(AddressError::UnknownTag(tag)),
        };
        Ok(Self {
            bounceable,
            test_only,
        })
    }
}

/// A chain account identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    workchain: i8,
    hash: [u8; 32],
}

impl Address {
    /// Build an address from its parts.
    pub const fn new(workchain: i8, hash: [u8; 32]) -> Self {
        Self { workchain, hash }
    }

    /// Parse either textual form, discarding the user-friendly flags.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        Self::parse_with_flags(input).map(|(address, _)| address)
    }

    /// Parse either textual form, returning the flags the input carried.
    ///
    /// Raw input carries no flags and reports [`AddressFlags::CANONICAL`].
    pub fn parse_with_flags(input: &str) -> Result<(Self, AddressFlags), AddressError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AddressError::Empty);
        }
        if input.contains(':') {
            return Self::parse_raw(input).map(|address| (address, AddressFlags::CANONICAL));
        }
        Self::parse_friendly(input)
    }

    fn parse_raw(input: &str) -> Result<Self, AddressError> {
        let (workchain, hash_hex) = input
            .split_once(':')
            .ok_or_else(|| AddressError::InvalidRaw(input.to_string()))?;

        let workchain: i8 = workchain
            .parse()
            .map_err(|_| AddressError::InvalidRaw(format!("bad workchain '{}'", workchain)))?;

        if hash_hex.len() != HASH_HEX_CHARS {
            return Err(AddressError::InvalidRaw(format!(
                "account hash must be {} hex chars, got {}",
                HASH_HEX_CHARS,
                hash_hex.len()
            )));
        }

        let mut hash = [0u8; 32];
        hex::decode_to_slice(hash_hex, &mut hash)
            .map_err(|e| AddressError::InvalidRaw(e.to_string()))?;

        Ok(Self { workchain, hash })
    }

    fn parse_friendly(input: &str) -> Result<(Self, AddressFlags), AddressError> {
        if input.len() != FRIENDLY_CHARS {
            return Err(AddressError::InvalidFriendly(format!(
                "expected {} characters, got {}",
                FRIENDLY_CHARS,
                input.len()
            )));
        }

        let url_safe = input.contains('-') || input.contains('_');
        let classic = input.contains('+') || input.contains('/');
        if url_safe && classic {
            return Err(AddressError::InvalidFriendly(
                "mixed base64 alphabets".to_string(),
            ));
        }

        let engine = if url_safe { &URL_SAFE } else { &STANDARD };
        let bytes = engine
            .decode(input)
            .map_err(|e| AddressError::InvalidFriendly(e.to_string()))?;
        if bytes.len() != FRIENDLY_BYTES {
            return Err(AddressError::InvalidFriendly(format!(
                "expected {} bytes, got {}",
                FRIENDLY_BYTES,
                bytes.len()
            )));
        }

        let expected = CRC16.checksum(&bytes[..34]);
        let actual = u16::from_be_bytes([bytes[34], bytes[35]]);
        if expected != actual {
            return Err(AddressError::ChecksumMismatch);
        }

        let flags = AddressFlags::from_tag(bytes[0])?;
        let workchain = bytes[1] as i8;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);

        Ok((Self { workchain, hash }, flags))
    }

    /// Normalize any accepted textual form into the canonical string.
    pub fn normalize(input: &str) -> Result<String, AddressError> {
        Self::parse(input).map(|address| address.to_string())
    }

    /// Workchain id.
    pub fn workchain(&self) -> i8 {
        self.workchain
    }

    /// Account hash.
    pub fn hash(&self) -> &[u8; 32] {
        &self.hash
    }

    /// Raw `<workchain>:<hex>` form.
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// URL-safe user-friendly form with the given flags.
    pub fn to_friendly(&self, flags: AddressFlags) -> String {
        let mut bytes = Vec::with_capacity(FRIENDLY_BYTES);
        bytes.push(flags.tag());
        bytes.push(self.workchain as u8);
        bytes.extend_from_slice(&self.hash);
        let checksum = CRC16.checksum(&bytes);
        bytes.extend_from_slice(&checksum.to_be_bytes());
        URL_SAFE.encode(bytes)
    }

    /// Short label such as `EQC3...z0Bz`, built from the canonical form.
    pub fn shortened(&self) -> String {
        shorten(&self.to_string())
    }
}

/// Shorten a rendered address to its first and last four characters.
pub fn shorten(rendered: &str) -> String {
    let chars: Vec<char> = rendered.chars().collect();
    if chars.len() <= 11 {
        return rendered.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_friendly(AddressFlags::CANONICAL))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
