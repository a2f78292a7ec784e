//! Transfer record types and identity keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Classification of an asset transfer.
///
/// Unknown categories are preserved verbatim so records round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransferCategory {
    /// Top-level transaction value.
    External,
    /// Value moved inside contract execution.
    Internal,
    /// Fungible token transfer.
    Erc20,
    /// Non-fungible token transfer.
    Erc721,
    Other(String),
}

impl TransferCategory {
    /// Categories requested from the transfer index.
    pub const QUERIED: [TransferCategory; 4] = [
        TransferCategory::External,
        TransferCategory::Internal,
        TransferCategory::Erc20,
        TransferCategory::Erc721,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TransferCategory::External => "external",
            TransferCategory::Internal => "internal",
            TransferCategory::Erc20 => "erc20",
            TransferCategory::Erc721 => "erc721",
            TransferCategory::Other(s) => s,
        }
    }
}

impl From<String> for TransferCategory {
    fn from(s: String) -> Self {
        match s.as_str() {
            "external" => TransferCategory::External,
            "internal" => TransferCategory::Internal,
            "erc20" => TransferCategory::Erc20,
            "erc721" => TransferCategory::Erc721,
            _ => TransferCategory::Other(s),
        }
    }
}

impl From<TransferCategory> for String {
    fn from(category: TransferCategory) -> Self {
        match category {
            TransferCategory::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransferCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One asset movement as reported by the transfer index.
///
/// The provider object is kept whole and serialized back exactly as
/// received. Only `hash` and `category` are read, through accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferRecord {
    fields: Map<String, Value>,
}

impl TransferRecord {
    pub fn new(hash: impl Into<String>, category: TransferCategory) -> Self {
        Self::default()
            .with_field("hash", Value::String(hash.into()))
            .with_field("category", Value::String(category.into()))
    }

    /// Attach a provider-specific field.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Transaction hash, when the provider sent it as a string.
    pub fn hash(&self) -> Option<&str> {
        self.fields.get("hash").and_then(Value::as_str)
    }

    /// Transfer category, when the provider sent it as a string.
    pub fn category(&self) -> Option<TransferCategory> {
        self.fields
            .get("category")
            .and_then(Value::as_str)
            .map(|c| TransferCategory::from(c.to_string()))
    }

    /// Raw provider field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Identity of this record across directional queries.
    ///
    /// Missing or `null` parts key on the empty string. Non-string values
    /// key on their JSON text.
    pub fn key(&self) -> TransferKey {
        TransferKey {
            hash: key_part(self.fields.get("hash")),
            category: key_part(self.fields.get("category")),
        }
    }
}

fn key_part(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Deduplication key: `(hash, category)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferKey {
    pub hash: String,
    pub category: String,
}

/// Which side of a transfer the queried address is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    /// Address as sender.
    Outgoing,
    /// Address as receiver.
    Incoming,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::Outgoing => "outgoing",
            TransferDirection::Incoming => "incoming",
        }
    }
}

impl fmt::Display for TransferDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
