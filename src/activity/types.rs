//! Activity summary and aggregation error types.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::activity::address::Address;
use crate::rpc::RpcFailure;
use crate::transfers::{TransferDirection, TransferRecord};

/// Number of transfer records included in a summary sample.
pub const SAMPLE_LIMIT: usize = 10;

/// Errors that fail a whole activity lookup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    /// Input is not an account address. No upstream call was made.
    #[error("Invalid address")]
    InvalidAddress,

    /// The RPC endpoint credential is not configured on this server.
    #[error("RPC credential not configured on server")]
    ConfigurationMissing,

    /// The transaction count could not be fetched.
    #[error("Upstream RPC unavailable: {0}")]
    UpstreamUnavailable(#[source] RpcFailure),
}

impl AggregationError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AggregationError::InvalidAddress => "invalid_address",
            AggregationError::ConfigurationMissing => "configuration_missing",
            AggregationError::UpstreamUnavailable(_) => "upstream_unavailable",
        }
    }
}

/// Result type for activity lookups.
pub type AggregationResult<T> = Result<T, AggregationError>;

/// Activity of one address as seen by the node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub address: Address,

    /// Transactions sent from the address (nonce at `latest`).
    #[serde(rename = "txCount")]
    pub nonce: u64,

    /// Distinct transfers across both directions.
    #[serde(rename = "assetTransfersCount")]
    pub transfer_count: usize,

    /// First [`SAMPLE_LIMIT`] transfers in merge order.
    #[serde(rename = "sampleTransfers")]
    pub sample: Vec<TransferRecord>,

    /// Directions whose transfer query failed and were counted as empty.
    #[serde(rename = "degradedDirections", skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<TransferDirection>,
}

impl ActivitySummary {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Parse a hex quantity such as `"0x5"`.
///
/// Absent, empty or unparseable values count as zero.
pub fn parse_quantity(value: &Value) -> u64 {
    match value {
        Value::String(s) => {
            let digits = s
                .strip_prefix("0x")
                .or_else(|| s.strip_prefix("0X"))
                .unwrap_or(s);
            if digits.is_empty() {
                return 0;
            }
            u64::from_str_radix(digits, 16).unwrap_or_else(|_| {
                tracing::warn!(value = %s, "Unparseable transaction count, using 0");
                0
            })
        }
        Value::Number(n) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&json!("0x5")), 5);
        assert_eq!(parse_quantity(&json!("0xa")), 10);
        assert_eq!(parse_quantity(&json!("0x3E8")), 1000);
        assert_eq!(parse_quantity(&json!("0x")), 0);
        assert_eq!(parse_quantity(&json!("")), 0);
        assert_eq!(parse_quantity(&Value::Null), 0);
        assert_eq!(parse_quantity(&json!("0xzz")), 0);
        assert_eq!(parse_quantity(&json!(7)), 7);
    }

    #[test]
    fn test_summary_response_shape() {
        let summary = ActivitySummary {
            address: "0x00000000000000000000000000000000000000aa".parse().unwrap(),
            nonce: 3,
            transfer_count: 0,
            sample: Vec::new(),
            degraded: Vec::new(),
        };
        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            json!({
                "address": "0x00000000000000000000000000000000000000aa",
                "txCount": 3,
                "assetTransfersCount": 0,
                "sampleTransfers": []
            })
        );
    }

    #[test]
    fn test_degraded_directions_serialized_when_present() {
        let summary = ActivitySummary {
            address: "0x00000000000000000000000000000000000000aa".parse().unwrap(),
            nonce: 0,
            transfer_count: 0,
            sample: Vec::new(),
            degraded: vec![TransferDirection::Incoming],
        };
        assert!(summary.is_degraded());
        assert_eq!(serde_json::to_value(&summary).unwrap()["degradedDirections"], json!(["incoming"]));
    }

    #[test]
    fn test_upstream_message_preserved() {
        let err = AggregationError::UpstreamUnavailable(RpcFailure::Upstream {
            code: Some(-32000),
            message: "header not found".to_string(),
        });
        assert!(err.to_string().contains("header not found"));
        assert_eq!(err.kind(), "upstream_unavailable");
    }
}
