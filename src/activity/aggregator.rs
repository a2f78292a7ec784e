//! Activity lookup orchestration.
//!
//! # Responsibilities
//! - Validate the address before touching the network
//! - Issue the nonce and both transfer queries concurrently
//! - Apply the failure policy: the nonce is essential, transfers degrade
//! - Reconcile transfers and shape the summary

use std::time::Instant;

use serde_json::{json, Value};

use crate::activity::address::Address;
use crate::activity::types::{parse_quantity, ActivitySummary, AggregationError, AggregationResult, SAMPLE_LIMIT};
use crate::config::schema::RpcConfig;
use crate::observability::metrics;
use crate::rpc::{EndpointError, JsonRpc, RpcClient, RpcResult};
use crate::transfers::query::{decode_transfers, AssetTransferQuery, ASSET_TRANSFERS_METHOD};
use crate::transfers::{merge, TransferDirection, TransferRecord};

/// Method returning the number of transactions sent from an address.
pub const TRANSACTION_COUNT_METHOD: &str = "eth_getTransactionCount";

/// Looks up the activity of one address per call. Holds no per-call state.
#[derive(Debug, Clone)]
pub struct ActivityAggregator<R = RpcClient> {
    /// `None` when the endpoint could not be configured.
    rpc: Option<R>,
    page_size: u32,
}

impl ActivityAggregator<RpcClient> {
    /// Build an aggregator backed by an HTTP RPC client.
    ///
    /// A missing credential does not fail construction; every lookup then
    /// reports [`AggregationError::ConfigurationMissing`].
    pub fn from_config(config: &RpcConfig) -> Self {
        let rpc = match RpcClient::from_config(config) {
            Ok(client) => {
                tracing::info!(host = %client.endpoint_host(), "RPC client initialized");
                Some(client)
            }
            Err(EndpointError::MissingCredential) => {
                tracing::warn!("RPC credential not configured; lookups will fail until it is set");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "RPC endpoint unusable");
                None
            }
        };

        Self {
            rpc,
            page_size: config.page_size,
        }
    }
}

impl<R: JsonRpc> ActivityAggregator<R> {
    pub fn new(rpc: Option<R>, page_size: u32) -> Self {
        Self { rpc, page_size }
    }

    /// Whether an upstream endpoint is available.
    pub fn is_configured(&self) -> bool {
        self.rpc.is_some()
    }

    /// Summarize the activity of `raw_address`.
    pub async fn get_activity(&self, raw_address: &str) -> AggregationResult<ActivitySummary> {
        let start = Instant::now();
        let result = self.lookup(raw_address).await;

        match &result {
            Ok(summary) => {
                tracing::info!(
                    address = %summary.address,
                    nonce = summary.nonce,
                    transfers = summary.transfer_count,
                    degraded = summary.is_degraded(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Activity lookup complete"
                );
            }
            Err(e) => {
                tracing::info!(kind = e.kind(), error = %e, "Activity lookup failed");
            }
        }
        metrics::record_lookup(result.as_ref().err().map(AggregationError::kind));

        result
    }

    async fn lookup(&self, raw_address: &str) -> AggregationResult<ActivitySummary> {
        let address = Address::parse(raw_address).map_err(|_| AggregationError::InvalidAddress)?;
        let rpc = self.rpc.as_ref().ok_or(AggregationError::ConfigurationMissing)?;

        let (nonce, outgoing, incoming) = tokio::join!(
            fetch_nonce(rpc, &address),
            fetch_transfers(rpc, &address, TransferDirection::Outgoing, self.page_size),
            fetch_transfers(rpc, &address, TransferDirection::Incoming, self.page_size),
        );

        let nonce = nonce.map_err(AggregationError::UpstreamUnavailable)?;

        let mut degraded = Vec::new();
        let outgoing = absorb(outgoing, TransferDirection::Outgoing, &mut degraded);
        let incoming = absorb(incoming, TransferDirection::Incoming, &mut degraded);

        let transfers = merge(outgoing, incoming);

        Ok(ActivitySummary {
            address,
            nonce,
            transfer_count: transfers.len(),
            sample: transfers.sample(SAMPLE_LIMIT),
            degraded,
        })
    }
}

async fn fetch_nonce<R: JsonRpc>(rpc: &R, address: &Address) -> RpcResult<u64> {
    let result = rpc
        .call(TRANSACTION_COUNT_METHOD, vec![json!(address.as_str()), json!("latest")])
        .await?;
    Ok(parse_quantity(&result))
}

async fn fetch_transfers<R: JsonRpc>(
    rpc: &R,
    address: &Address,
    direction: TransferDirection,
    page_size: u32,
) -> RpcResult<Vec<TransferRecord>> {
    let params = AssetTransferQuery::first_page(address, direction, page_size).into_params();
    let result: Value = rpc.call(ASSET_TRANSFERS_METHOD, params).await?;
    Ok(decode_transfers(result, direction))
}

/// A failed transfer query counts as an empty direction.
fn absorb(
    result: RpcResult<Vec<TransferRecord>>,
    direction: TransferDirection,
    degraded: &mut Vec<TransferDirection>,
) -> Vec<TransferRecord> {
    match result {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(direction = %direction, error = %e, "Transfer query failed; continuing without it");
            metrics::record_degraded_direction(direction);
            degraded.push(direction);
            Vec::new()
        }
    }
}
