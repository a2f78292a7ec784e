//! Address activity service library.
//!
//! Answers "how active is this address?" for an EVM account by combining
//! its transaction count with a deduplicated view of its asset transfers.

pub mod activity;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;
pub mod transfers;

pub use activity::{ActivityAggregator, ActivitySummary, AggregationError};
pub use config::ActivityConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
