//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overlay (ALCHEMY_KEY, ALCHEMY_RPC_URL)
//!     → validation.rs (semantic checks)
//!     → ActivityConfig (validated, immutable)
//!     → passed by value into each subsystem at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no global reads after startup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{ActivityConfig, ListenerConfig, LogFormat, ObservabilityConfig, RpcConfig, TimeoutConfig};
