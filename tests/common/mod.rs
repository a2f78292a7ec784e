//! Shared utilities for integration testing: a scripted JSON-RPC node and
//! a running service instance.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use address_activity::config::ActivityConfig;
use address_activity::http::HttpServer;
use address_activity::lifecycle::Shutdown;
use axum::{body::Bytes, http::StatusCode, routing::post, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// What the mock node answers to one request.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn result(result: Value) -> Self {
        Self::raw(200, json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string())
    }

    pub fn error(code: i64, message: &str) -> Self {
        Self::raw(200, json!({"jsonrpc": "2.0", "id": 1, "error": {"code": code, "message": message}}).to_string())
    }

    pub fn raw(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// A transfer page made of `(hash, category)` pairs.
    pub fn transfers(records: &[(&str, &str)]) -> Self {
        let transfers: Vec<Value> = records
            .iter()
            .map(|(hash, category)| json!({"hash": hash, "category": category, "asset": "ETH", "value": 0.1}))
            .collect();
        Self::result(json!({ "transfers": transfers }))
    }
}

/// A running mock node.
pub struct MockNode {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    requests: Arc<std::sync::Mutex<Vec<Value>>>,
}

impl MockNode {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Request envelopes received so far.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock node whose reply is computed from each request envelope.
pub async fn start_mock_node<F>(respond: F) -> MockNode
where
    F: Fn(&Value) -> Reply + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let respond = Arc::new(respond);
    let calls = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(std::sync::Mutex::new(Vec::new()));

    let handler = {
        let calls = calls.clone();
        let requests = requests.clone();
        move |body: Bytes| {
            let respond = respond.clone();
            let calls = calls.clone();
            let requests = requests.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let envelope: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
                requests.lock().unwrap().push(envelope.clone());

                let reply = respond(&envelope);
                if let Some(delay) = reply.delay {
                    tokio::time::sleep(delay).await;
                }
                (StatusCode::from_u16(reply.status).unwrap(), reply.body)
            }
        }
    };

    let app = Router::new().route("/", post(handler));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockNode { addr, calls, requests }
}

/// Start a mock node that answers the three activity calls from a script.
pub async fn start_scripted_node(nonce: Reply, outgoing: Reply, incoming: Reply) -> MockNode {
    start_mock_node(move |envelope| {
        let method = envelope["method"].as_str().unwrap_or_default();
        match method {
            "eth_getTransactionCount" => nonce.clone(),
            "alchemy_getAssetTransfers" if envelope["params"][0].get("fromAddress").is_some() => outgoing.clone(),
            "alchemy_getAssetTransfers" => incoming.clone(),
            _ => Reply::error(-32601, "method not found"),
        }
    })
    .await
}

/// A configuration pointing at `node_url` with no credential template.
pub fn config_for(node_url: &str) -> ActivityConfig {
    let mut config = ActivityConfig::default();
    config.rpc.url_template = node_url.to_string();
    config.rpc.timeout_secs = 2;
    config.observability.metrics_enabled = false;
    config
}

/// Start the service on an ephemeral port.
pub async fn start_service(config: ActivityConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}
