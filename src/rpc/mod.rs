//! Upstream JSON-RPC subsystem.
//!
//! # Data Flow
//! ```text
//! RpcConfig (url template, credential, timeout)
//!     → client.rs (endpoint resolution, HTTP POST with deadline)
//!     → types.rs (envelope parsing, failure classification)
//!     → Result<serde_json::Value, RpcFailure>
//! ```
//!
//! # Constraints
//! - Never log the resolved endpoint URL; it may embed the credential
//! - One HTTP request per call, no retries
//! - The client holds no per-call state and is cheap to clone

pub mod client;
pub mod types;

pub use client::RpcClient;
pub use types::{EndpointError, JsonRpc, RpcFailure, RpcResult};
