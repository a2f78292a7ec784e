//! Address activity service (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                ADDRESS ACTIVITY                   │
//!                        │                                                   │
//!   GET /api/check       │  ┌────────┐    ┌────────────┐                     │
//!   ─────────────────────┼─▶│  http  │───▶│  activity  │──┬─▶ rpc ──────────┼──▶ JSON-RPC
//!                        │  │ server │    │ aggregator │  ├─▶ rpc ──────────┼──▶ node
//!                        │  └────────┘    └─────┬──────┘  └─▶ rpc ──────────┼──▶
//!                        │       ▲              │                            │
//!   summary / error      │       │              ▼                            │
//!   ◀────────────────────┼───────┘       ┌────────────┐                      │
//!                        │               │ transfers  │                      │
//!                        │               │ reconciler │                      │
//!                        │               └────────────┘                      │
//!                        │                                                   │
//!                        │  config · observability · lifecycle               │
//!                        └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use address_activity::config::load_or_default;
use address_activity::lifecycle::startup;

#[derive(Parser)]
#[command(name = "address-activity", version, about = "EVM address activity lookup service")]
struct Args {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(args.config.as_deref())?;

    startup::run(config).await?;
    Ok(())
}
