//! Asset-transfer query request and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::activity::address::Address;
use crate::transfers::types::{TransferCategory, TransferDirection, TransferRecord};

/// Extended RPC method that indexes asset transfers.
pub const ASSET_TRANSFERS_METHOD: &str = "alchemy_getAssetTransfers";

/// Filter object sent as the single parameter of [`ASSET_TRANSFERS_METHOD`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransferQuery {
    pub from_block: String,
    pub to_block: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
    pub category: Vec<TransferCategory>,
    pub max_count: String,
}

impl AssetTransferQuery {
    /// First page of every queried category, with `address` bound to the
    /// side given by `direction`.
    pub fn first_page(address: &Address, direction: TransferDirection, page_size: u32) -> Self {
        let (from_address, to_address) = match direction {
            TransferDirection::Outgoing => (Some(address.to_string()), None),
            TransferDirection::Incoming => (None, Some(address.to_string())),
        };

        Self {
            from_block: "0x0".to_string(),
            to_block: "latest".to_string(),
            from_address,
            to_address,
            category: TransferCategory::QUERIED.to_vec(),
            max_count: format!("{:#x}", page_size),
        }
    }

    pub fn into_params(self) -> Vec<Value> {
        // Serializing a struct of strings cannot fail.
        vec![serde_json::to_value(self).unwrap_or(Value::Null)]
    }
}

/// One page of the transfer index result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetTransferPage {
    #[serde(default)]
    pub transfers: Vec<Value>,
    #[serde(default)]
    pub page_key: Option<String>,
}

/// Decode a transfer index result into records.
///
/// A result that is not a page object yields no records. Entries that are
/// not transfer objects are dropped.
pub fn decode_transfers(result: Value, direction: TransferDirection) -> Vec<TransferRecord> {
    let page: AssetTransferPage = match serde_json::from_value(result) {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(direction = %direction, error = %e, "Unexpected transfer result shape");
            return Vec::new();
        }
    };

    if let Some(page_key) = &page.page_key {
        tracing::debug!(direction = %direction, page_key = %page_key, "More transfers available; only the first page is used");
    }

    let total = page.transfers.len();
    let records: Vec<TransferRecord> = page
        .transfers
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        tracing::warn!(
            direction = %direction,
            dropped = total - records.len(),
            "Dropped malformed transfer entries"
        );
    }

    records
}
