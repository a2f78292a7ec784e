//! JSON-RPC client with timeout and error classification.
//!
//! # Responsibilities
//! - Resolve the configured endpoint (credential substitution)
//! - POST one JSON-RPC envelope per call
//! - Classify failures as transport, upstream or malformed
//! - Record per-method metrics
//!
//! No retries happen here; one call is one HTTP request.

use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::time::timeout;
use url::Url;

use crate::config::schema::{RpcConfig, CREDENTIAL_PLACEHOLDER};
use crate::observability::metrics;
use crate::rpc::types::{parse_envelope, EndpointError, JsonRpc, JsonRpcRequest, RpcFailure, RpcResult};

/// Stateless HTTP JSON-RPC client bound to one endpoint.
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout_duration: Duration,
}

impl RpcClient {
    /// Create a client for an already resolved endpoint.
    pub fn new(endpoint: Url, timeout_duration: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            timeout_duration,
        }
    }

    /// Create a client from configuration.
    ///
    /// Fails with [`EndpointError::MissingCredential`] when the URL is
    /// templated and no credential is available.
    pub fn from_config(config: &RpcConfig) -> Result<Self, EndpointError> {
        let endpoint = resolve_endpoint(config)?;
        Ok(Self::new(endpoint, Duration::from_secs(config.timeout_secs)))
    }

    /// Perform one JSON-RPC call and return the `result` payload.
    pub async fn request(&self, method: &str, params: Vec<Value>) -> RpcResult<Value> {
        let start = Instant::now();
        let outcome = self.send(method, &params).await;

        match &outcome {
            Ok(_) => {
                tracing::debug!(method = %method, elapsed_ms = start.elapsed().as_millis() as u64, "RPC call succeeded");
            }
            Err(e) => {
                tracing::warn!(method = %method, kind = e.kind(), error = %e, "RPC call failed");
            }
        }
        metrics::record_rpc_call(method, outcome.as_ref().err().map(RpcFailure::kind), start);

        outcome
    }

    async fn send(&self, method: &str, params: &[Value]) -> RpcResult<Value> {
        let envelope = JsonRpcRequest::new(method, params);

        let fut = async {
            let response = self
                .http
                .post(self.endpoint.clone())
                .json(&envelope)
                .send()
                .await
                .map_err(|e| RpcFailure::Transport(e.to_string()))?;

            let status = response.status();
            let body = response
                .bytes()
                .await
                .map_err(|e| RpcFailure::Transport(e.to_string()))?;

            if !status.is_success() {
                tracing::debug!(method = %method, status = %status, "RPC endpoint returned non-success status");
            }

            // Nodes often attach a JSON-RPC error envelope to 4xx/5xx replies.
            parse_envelope(&body).map_err(|e| match e {
                RpcFailure::Malformed(msg) if !status.is_success() => {
                    RpcFailure::Malformed(format!("HTTP {}: {}", status, msg))
                }
                other => other,
            })
        };

        match timeout(self.timeout_duration, fut).await {
            Ok(result) => result,
            Err(_) => Err(RpcFailure::Transport(format!(
                "request timed out after {:?}",
                self.timeout_duration
            ))),
        }
    }

    /// Host of the configured endpoint, safe to log (no path, no credential).
    pub fn endpoint_host(&self) -> &str {
        self.endpoint.host_str().unwrap_or("unknown")
    }
}

impl JsonRpc for RpcClient {
    async fn call(&self, method: &str, params: Vec<Value>) -> RpcResult<Value> {
        self.request(method, params).await
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The endpoint path may embed the credential.
        f.debug_struct("RpcClient")
            .field("host", &self.endpoint_host())
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

/// Substitute the credential into the endpoint template and parse it.
pub fn resolve_endpoint(config: &RpcConfig) -> Result<Url, EndpointError> {
    let url = if config.is_templated() {
        let credential = config
            .credential
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(EndpointError::MissingCredential)?;
        config.url_template.replace(CREDENTIAL_PLACEHOLDER, credential)
    } else {
        config.url_template.clone()
    };

    Url::parse(&url).map_err(|e| EndpointError::InvalidUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(template: &str, credential: Option<&str>) -> RpcConfig {
        RpcConfig {
            url_template: template.to_string(),
            credential: credential.map(str::to_string),
            timeout_secs: 5,
            page_size: 1000,
        }
    }

    #[test]
    fn test_templated_endpoint_requires_credential() {
        let result = resolve_endpoint(&config("https://node.example/v2/{credential}", None));
        assert_eq!(result.unwrap_err(), EndpointError::MissingCredential);

        let result = resolve_endpoint(&config("https://node.example/v2/{credential}", Some("")));
        assert_eq!(result.unwrap_err(), EndpointError::MissingCredential);
    }

    #[test]
    fn test_credential_substitution() {
        let url = resolve_endpoint(&config("https://node.example/v2/{credential}", Some("abc123"))).unwrap();
        assert_eq!(url.as_str(), "https://node.example/v2/abc123");
    }

    #[test]
    fn test_plain_endpoint_needs_no_credential() {
        let url = resolve_endpoint(&config("http://localhost:8545", None)).unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn test_invalid_url() {
        let result = resolve_endpoint(&config("not a url", None));
        assert!(matches!(result, Err(EndpointError::InvalidUrl(_))));
    }

    #[test]
    fn test_debug_hides_credential() {
        let client = RpcClient::from_config(&config("https://node.example/v2/{credential}", Some("secret"))).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("node.example"));
        assert!(!debug.contains("secret"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = RpcClient::new(
            Url::parse(&format!("http://{}", addr)).unwrap(),
            Duration::from_secs(2),
        );
        let err = client.request("eth_chainId", Vec::new()).await.unwrap_err();
        assert!(matches!(err, RpcFailure::Transport(_)));
    }
}
