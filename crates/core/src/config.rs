//! Configuration management for the DNS manager.
//!
//! Defaults mirror the production deployment; a TOML file may override any
//! section:
//!
//! ```toml
//! [verification]
//! pacing_ms = 1500
//!
//! [records]
//! require_ownership = true
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::address::Address;
use crate::types::Network;

/// Code hash of the subdomain collection contract this app deploys.
pub const SUBDOMAIN_COLLECTION_CODE_HASH: &str = "3jXlcwOASQG0nNPW1YpxfOynmrh2FsgAMqdMl8MiIB0=";

/// Base URL of the preview image service.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://dns.gradosphera.org/api/ton";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mainnet: NetworkProfile,
    pub testnet: NetworkProfile,
    pub preview: PreviewConfig,
    pub collections: CollectionPolicy,
    pub verification: VerificationConfig,
    pub records: RecordsConfig,
}

/// Per-network constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Root `.ton` DNS collection that domain items belong to
    pub dns_collection: Address,
    /// Royalty recipient written into deployed collections
    pub royalty_address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub image_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionPolicy {
    /// Base64 code hashes accepted as subdomain collections
    pub allowed_code_hashes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerificationConfig {
    /// Delay between sequential verification reads; 0 disables it
    pub pacing_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RecordsConfig {
    /// Require the connected wallet to own the resolver before saving records
    pub require_ownership: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            mainnet: NetworkProfile::mainnet(),
            testnet: NetworkProfile::testnet(),
            preview: PreviewConfig::default(),
            collections: CollectionPolicy::default(),
            verification: VerificationConfig::default(),
            records: RecordsConfig::default(),
        }
    }

    /// Profile for the wallet's network.
    pub fn profile(&self, network: Network) -> &NetworkProfile {
        match network {
            Network::Mainnet => &self.mainnet,
            Network::Testnet => &self.testnet,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl NetworkProfile {
    fn mainnet() -> Self {
        Self {
            dns_collection: Address::new(0, hex_hash(
                "b774d95eb20543f186c06b371ab88ad704f7e256130caf96189368a7d0cb6ccf",
            )),
            royalty_address: Address::new(0, hex_hash(
                "83ae019a23a8162beaa5cb0ebdc56668b2eac6c6ba51808812915b206a152dc5",
            )),
        }
    }

    fn testnet() -> Self {
        Self {
            dns_collection: Address::new(0, hex_hash(
                "e33ed33a42eb2032059f97d90c706f8400bb256d32139ca707f1564ad699c7dd",
            )),
            royalty_address: Address::new(0, hex_hash(
                "1281f0cf15b74b4d57ff95702a3ff85d9c18c400b22e26d1e5331bd49a936277",
            )),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }
}

impl PreviewConfig {
    /// `<base>/<domain>.png`
    pub fn domain_image(&self, domain: &str) -> String {
        format!(
            "{}/{}.png",
            self.base(),
            domain.to_lowercase()
        )
    }

    /// `<base>/<subdomain>/<domain>.png`
    pub fn subdomain_image(&self, subdomain: &str, domain: &str) -> String {
        format!(
            "{}/{}/{}.png",
            self.base(),
            subdomain,
            domain.to_lowercase()
        )
    }

    fn base(&self) -> &str {
        self.image_base_url.trim_end_matches('/')
    }
}

impl Default for CollectionPolicy {
    fn default() -> Self {
        Self {
            allowed_code_hashes: vec![SUBDOMAIN_COLLECTION_CODE_HASH.to_string()],
        }
    }
}

impl CollectionPolicy {
    /// Whether a fetched code hash belongs to a known collection contract.
    pub fn is_allowed(&self, code_hash: &str) -> bool {
        self.allowed_code_hashes.iter().any(|known| known == code_hash)
    }
}

impl VerificationConfig {
    /// Pacing delay, `None` when disabled.
    pub fn pacing(&self) -> Option<Duration> {
        (self.pacing_ms > 0).then(|| Duration::from_millis(self.pacing_ms))
    }
}

fn hex_hash(hex_str: &str) -> [u8; 32] {
    let mut hash = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut hash).expect("built-in address constant is valid hex");
    hash
}
