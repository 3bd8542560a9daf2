//! Subdomain names.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NameError;

/// Longest accepted subdomain label.
pub const MAX_SUBDOMAIN_LEN: usize = 64;

/// A subdomain label: `[a-z0-9-]{1,64}`, no hyphen at either end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubdomainName(String);

impl SubdomainName {
    /// Validate a name exactly as given.
    pub fn parse(input: &str) -> Result<Self, NameError> {
        if input.is_empty() {
            return Err(NameError::Empty);
        }
        let len = input.chars().count();
        if len > MAX_SUBDOMAIN_LEN {
            return Err(NameError::TooLong {
                len,
                max: MAX_SUBDOMAIN_LEN,
            });
        }
        if let Some(bad) = input
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(NameError::InvalidChar(bad));
        }
        if input.starts_with('-') || input.ends_with('-') {
            return Err(NameError::EdgeHyphen);
        }
        Ok(Self(input.to_string()))
    }

    /// Normalize what a user typed (trim, lowercase), then validate.
    pub fn from_user_input(input: &str) -> Result<Self, NameError> {
        Self::parse(&input.trim().to_lowercase())
    }

    /// The label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubdomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SubdomainName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SubdomainName> for String {
    fn from(name: SubdomainName) -> Self {
        name.0
    }
}
