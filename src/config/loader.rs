//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ActivityConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from a TOML file, apply the environment overlay and
/// validate the result.
pub fn load_config(path: &Path) -> Result<ActivityConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mut config: ActivityConfig = toml::from_str(&content)?;
    config.apply_env();
    validated(config)
}

/// Parse and validate configuration from TOML text.
///
/// The process environment is not consulted.
pub fn parse_config(content: &str) -> Result<ActivityConfig, ConfigError> {
    validated(toml::from_str(content)?)
}

/// Load from `path` when given, otherwise start from defaults. The
/// environment overlay applies either way.
pub fn load_or_default(path: Option<&Path>) -> Result<ActivityConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let mut config = ActivityConfig::default();
            config.apply_env();
            validated(config)
        }
    }
}

fn validated(config: ActivityConfig) -> Result<ActivityConfig, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_reported() {
        let err = parse_config("listener = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = parse_config("[rpc]\npage_size = 0\ntimeout_secs = 0\n").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("rpc.page_size"));
        assert!(message.contains("rpc.timeout_secs"));
    }

    #[test]
    fn test_parse_ignores_environment() {
        let config = parse_config("[rpc]\nurl_template = \"http://localhost:8545\"\n").unwrap();
        assert_eq!(config.rpc.url_template, "http://localhost:8545");
        assert_eq!(config.rpc.credential, None);
    }

    #[test]
    fn test_overlay_is_validated() {
        let mut config = parse_config("").unwrap();
        config.apply_env_from(|name| match name {
            "ALCHEMY_RPC_URL" => Some("::not a url".to_string()),
            _ => None,
        });
        let err = validated(config).unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_overlay_supplies_credential() {
        let mut config = parse_config("").unwrap();
        config.apply_env_from(|name| (name == "ALCHEMY_KEY").then(|| "k3y".to_string()));
        let config = validated(config).unwrap();
        assert_eq!(config.rpc.credential.as_deref(), Some("k3y"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
