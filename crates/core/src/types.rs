//! Core types

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;

/// TON network a wallet is connected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Network {
    /// Production network
    #[default]
    #[serde(rename = "-239")]
    Mainnet,
    /// Test network
    #[serde(rename = "-3")]
    Testnet,
}

impl Network {
    /// Chain id as reported by TON Connect wallets.
    pub fn chain_id(&self) -> &'static str {
        match self {
            Network::Mainnet => "-239",
            Network::Testnet => "-3",
        }
    }

    /// Map a wallet chain id. Anything other than `-3` is mainnet.
    pub fn from_chain_id(chain: &str) -> Self {
        if chain == "-3" {
            Network::Testnet
        } else {
            Network::Mainnet
        }
    }

    /// Whether this is the test network.
    pub fn is_testnet(&self) -> bool {
        matches!(self, Network::Testnet)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}

/// NFT metadata as returned by the chain API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftEntity {
    /// Display name, empty when the API knows nothing about the address
    pub title: String,
    /// Secondary text
    #[serde(default)]
    pub subtitle: String,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Owner address as reported by the API (any textual form)
    #[serde(default)]
    pub owner_address: Option<String>,
}

impl NftEntity {
    /// The API returns empty titles for unknown entities.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

/// What the UI shows for a verified entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayEntity {
    /// Primary label
    pub title: String,
    /// Secondary label
    pub subtitle: String,
    /// Image URL, if any
    pub image: Option<String>,
    /// Owner as reported, or the entity itself for placeholders
    pub owner_address: String,
}

impl DisplayEntity {
    /// Placeholder for a resolver the API has no metadata for.
    pub fn placeholder(address: &Address) -> Self {
        Self {
            title: address.shortened(),
            subtitle: " ".to_string(),
            image: None,
            owner_address: address.to_string(),
        }
    }

    /// Display entity from API metadata.
    pub fn from_nft(entity: NftEntity, address: &Address) -> Self {
        Self {
            title: entity.title,
            subtitle: entity.subtitle,
            image: entity.image.filter(|url| !url.is_empty()),
            owner_address: entity
                .owner_address
                .unwrap_or_else(|| address.to_string()),
        }
    }
}
