//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_requests_total` (counter): upstream calls by method, outcome
//! - `rpc_request_duration_seconds` (histogram): upstream latency by method
//! - `activity_lookups_total` (counter): lookups by outcome
//! - `transfer_direction_degraded_total` (counter): absorbed transfer failures
//! - `http_requests_total` (counter): check endpoint responses by status
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::transfers::TransferDirection;

/// Install the Prometheus recorder and its scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one upstream JSON-RPC call. `failure` is the failure kind, if any.
pub fn record_rpc_call(method: &str, failure: Option<&'static str>, start: Instant) {
    let outcome = failure.unwrap_or("ok");
    counter!("rpc_requests_total", "method" => method.to_string(), "outcome" => outcome).increment(1);
    histogram!("rpc_request_duration_seconds", "method" => method.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record one activity lookup. `failure` is the error kind, if any.
pub fn record_lookup(failure: Option<&'static str>) {
    counter!("activity_lookups_total", "outcome" => failure.unwrap_or("ok")).increment(1);
}

/// Record a transfer direction that was counted as empty after a failure.
pub fn record_degraded_direction(direction: TransferDirection) {
    counter!("transfer_direction_degraded_total", "direction" => direction.as_str()).increment(1);
}

/// Record one HTTP response from the check endpoint.
pub fn record_http_response(status: u16) {
    counter!("http_requests_total", "status" => status.to_string()).increment(1);
}
