//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page size within provider limits)
//! - Check that addresses and the endpoint template parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ActivityConfig → Result<(), Vec<ValidationError>>
//! - A missing credential is NOT a validation error; it surfaces per lookup

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{ActivityConfig, CREDENTIAL_PLACEHOLDER, MAX_PAGE_SIZE};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("rpc.page_size must be between 1 and {max}, got {value}")]
    PageSize { value: u32, max: u32 },

    #[error("rpc.url_template is not a valid URL: {0}")]
    InvalidUrl(String),

    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ActivityConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if config.rpc.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "rpc.timeout_secs" });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout { field: "timeouts.request_secs" });
    }

    if config.rpc.page_size == 0 || config.rpc.page_size > MAX_PAGE_SIZE {
        errors.push(ValidationError::PageSize {
            value: config.rpc.page_size,
            max: MAX_PAGE_SIZE,
        });
    }

    // Check the template's shape with a dummy credential; the real one may
    // only arrive from the environment.
    let candidate = config.rpc.url_template.replace(CREDENTIAL_PLACEHOLDER, "credential");
    if let Err(e) = url::Url::parse(&candidate) {
        errors.push(ValidationError::InvalidUrl(e.to_string()));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
