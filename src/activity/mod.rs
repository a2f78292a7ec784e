//! Address activity subsystem.
//!
//! # Data Flow
//! ```text
//! raw address
//!     → address.rs (lowercase, 0x + 40 hex digits)
//!     → aggregator.rs
//!         ├─ eth_getTransactionCount(address, "latest")   ─┐
//!         ├─ transfers as sender (first page)              ├─ concurrent
//!         └─ transfers as receiver (first page)           ─┘
//!     → transfers::merge (outgoing, incoming)
//!     → ActivitySummary (nonce, distinct count, first 10 transfers)
//! ```
//!
//! # Failure Policy
//! - Invalid address or missing endpoint credential: fail before any call
//! - Nonce call failure: the lookup fails with `UpstreamUnavailable`
//! - Transfer call failure: that direction counts as empty and the summary
//!   lists it under `degraded`

pub mod address;
pub mod aggregator;
pub mod types;

pub use address::{Address, AddressError};
pub use aggregator::ActivityAggregator;
pub use types::{ActivitySummary, AggregationError, AggregationResult, SAMPLE_LIMIT};
