//! Account address validation.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Hex digits after the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// Input did not look like `0x` followed by 40 hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid address '{0}'")]
pub struct AddressError(pub String);

/// A lowercase `0x`-prefixed, 40 hex digit account address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Address(String);

impl Address {
    /// Lowercase `raw` and check it against the address pattern.
    ///
    /// Input is not trimmed.
    pub fn parse(raw: &str) -> Result<Self, AddressError> {
        let normalized = raw.to_ascii_lowercase();

        let valid = normalized.len() == ADDRESS_HEX_LEN + 2
            && normalized
                .strip_prefix("0x")
                .is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()));

        if valid {
            Ok(Self(normalized))
        } else {
            Err(AddressError(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
