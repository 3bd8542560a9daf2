//! Ownership checks against the connected wallet.
//!
//! Owner addresses come back from the chain API in whatever textual form the
//! API chose, so both sides are normalized through [`Address`] before
//! comparing.

use tondns_core::{Address, AddressError};

use crate::error::{DnsError, DnsResult};

/// Result of comparing a declared owner with the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owned,
    NotOwned,
}

/// Compare a declared owner (any textual form) with the wallet address.
pub fn check_ownership(owner: &str, wallet: &Address) -> Result<Ownership, AddressError> {
    let owner = Address::parse(owner)?;
    if owner == *wallet {
        Ok(Ownership::Owned)
    } else {
        Ok(Ownership::NotOwned)
    }
}

/// Fail with [`DnsError::NotOwned`] unless `wallet` owns `entity`.
pub fn ensure_owned(entity: &Address, owner: Option<&str>, wallet: &Address) -> DnsResult<()> {
    let Some(owner) = owner.filter(|owner| !owner.trim().is_empty()) else {
        return Err(DnsError::NotOwned {
            entity: *entity,
            owner: None,
        });
    };

    match check_ownership(owner, wallet)? {
        Ownership::Owned => Ok(()),
        Ownership::NotOwned => {
            tracing::debug!(entity = %entity, owner = %owner, wallet = %wallet, "Ownership mismatch");
            Err(DnsError::NotOwned {
                entity: *entity,
                owner: Some(owner.to_string()),
            })
        }
    }
}
