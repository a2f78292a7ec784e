//! Asset transfer subsystem.
//!
//! # Data Flow
//! ```text
//! Address + direction
//!     → query.rs (asset-transfer filter, first page only)
//!     → [RPC client]
//!     → query.rs (decode page into TransferRecords)
//!     → reconciler.rs (outgoing then incoming, dedup on (hash, category))
//!     → TransferSet
//! ```

pub mod query;
pub mod reconciler;
pub mod types;

pub use query::{AssetTransferQuery, ASSET_TRANSFERS_METHOD};
pub use reconciler::{merge, TransferSet};
pub use types::{TransferCategory, TransferDirection, TransferKey, TransferRecord};
