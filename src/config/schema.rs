//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the RPC credential in a templated endpoint URL.
pub const CREDENTIAL_PLACEHOLDER: &str = "{credential}";

/// Environment variable holding the RPC credential.
pub const CREDENTIAL_ENV_VAR: &str = "ALCHEMY_KEY";

/// Environment variable overriding the RPC endpoint URL (or template).
pub const RPC_URL_ENV_VAR: &str = "ALCHEMY_RPC_URL";

/// Largest page the asset-transfer method will return (`0x3e8`).
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Root configuration for the activity service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ActivityConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream JSON-RPC node settings.
    pub rpc: RpcConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ActivityConfig {
    /// Overlay values supplied through the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|name| std::env::var(name).ok());
    }

    /// Overlay values from `lookup`, which maps a variable name to its value.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        self.rpc
            .apply_overrides(lookup(CREDENTIAL_ENV_VAR), lookup(RPC_URL_ENV_VAR));
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream JSON-RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Endpoint URL. May contain `{credential}`, in which case a credential
    /// is required.
    pub url_template: String,

    /// Credential substituted into `url_template`.
    pub credential: Option<String>,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,

    /// Number of transfers requested per direction (first page only).
    pub page_size: u32,
}

impl RpcConfig {
    /// Apply credential and URL overrides. Blank values are ignored.
    pub fn apply_overrides(&mut self, credential: Option<String>, url: Option<String>) {
        if let Some(credential) = credential.filter(|c| !c.trim().is_empty()) {
            self.credential = Some(credential);
        }
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.url_template = url;
        }
    }

    /// Whether the endpoint URL needs a credential substituted into it.
    pub fn is_templated(&self) -> bool {
        self.url_template.contains(CREDENTIAL_PLACEHOLDER)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url_template: format!("https://gensyn-testnet.g.alchemy.com/v2/{}", CREDENTIAL_PLACEHOLDER),
            credential: None,
            timeout_secs: 10,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for one inbound lookup) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
