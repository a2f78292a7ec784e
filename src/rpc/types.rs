//! JSON-RPC envelope types and error definitions.

use std::future::Future;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// JSON-RPC protocol version sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Errors that can occur during a single JSON-RPC call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RpcFailure {
    /// The request never produced a response body (connect, DNS, timeout).
    #[error("RPC transport error: {0}")]
    Transport(String),

    /// The node answered with a JSON-RPC `error` object.
    #[error("RPC upstream error: {message}")]
    Upstream { code: Option<i64>, message: String },

    /// The body is not JSON or carries neither `result` nor `error`.
    #[error("Malformed RPC response: {0}")]
    Malformed(String),
}

impl RpcFailure {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RpcFailure::Transport(_) => "transport",
            RpcFailure::Upstream { .. } => "upstream",
            RpcFailure::Malformed(_) => "malformed",
        }
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcFailure>;

/// Errors resolving the configured endpoint into a usable URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    /// The endpoint URL is templated but no credential was supplied.
    #[error("RPC credential not configured")]
    MissingCredential,

    /// The resolved endpoint is not a valid URL.
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),
}

/// Outgoing JSON-RPC request envelope.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest<'a> {
    pub id: u64,
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: &'a [Value],
}

impl<'a> JsonRpcRequest<'a> {
    pub fn new(method: &'a str, params: &'a [Value]) -> Self {
        Self {
            id: 1,
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}

/// Incoming JSON-RPC response envelope.
///
/// `result` distinguishes an absent field (`None`) from an explicit
/// `null` (`Some(Value::Null)`).
#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcResponse {
    /// Classify the envelope into a result payload or a failure.
    ///
    /// An `error` field wins over `result` when a node sends both.
    pub fn into_result(self) -> RpcResult<Value> {
        match (self.error, self.result) {
            (Some(error), _) if !error.is_null() => Err(upstream_failure(error)),
            (_, Some(result)) => Ok(result),
            _ => Err(RpcFailure::Malformed(
                "response carries neither result nor error".to_string(),
            )),
        }
    }
}

fn upstream_failure(error: Value) -> RpcFailure {
    let code = error.get("code").and_then(Value::as_i64);
    let message = match error.get("message").and_then(Value::as_str) {
        Some(message) => message.to_string(),
        None => match error {
            Value::String(s) => s,
            other => other.to_string(),
        },
    };
    RpcFailure::Upstream { code, message }
}

/// Parse a raw response body into a result payload or a classified failure.
pub fn parse_envelope(body: &[u8]) -> RpcResult<Value> {
    let envelope: JsonRpcResponse = serde_json::from_slice(body)
        .map_err(|e| RpcFailure::Malformed(format!("invalid JSON-RPC envelope: {}", e)))?;
    envelope.into_result()
}

/// A JSON-RPC endpoint the aggregator can call.
///
/// Implementations must be safe to call concurrently.
pub trait JsonRpc: Send + Sync {
    /// Perform one call and return the envelope's `result` verbatim.
    fn call(&self, method: &str, params: Vec<Value>) -> impl Future<Output = RpcResult<Value>> + Send;
}
