//! Checklist console.
//!
//! Terminal view of the admin dashboard's data feed: fetches the flight
//! collection from the store and prints per-department and global
//! completion counts.
//!
//! # Usage
//!
//! ```bash
//! CHECKLIST_STORE_URL=http://store.example:8080 cargo run --bin checklist-console
//! ```
//!
//! # Environment Variables
//!
//! - `CHECKLIST_STORE_URL`: base URL of the flight record store
//! - `CHECKLIST_REQUEST_TIMEOUT_SECS`: per-request bound (default: 10)
//! - `RUST_LOG`: log filter (default: info)

use tracing::info;
use tracing_subscriber::EnvFilter;

use ggk_checklist::services::{dashboard_feed, global_counts, CountMode};
use ggk_checklist::store::{FlightStore, HttpFlightStore, StoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = StoreConfig::from_env();
    info!(base_url = %config.base_url, "connecting to flight record store");

    let store = HttpFlightStore::new(config)?;
    let flights = store.fetch_flights().await?;
    info!(count = flights.len(), "flight collection loaded");

    let feed = dashboard_feed(&flights, CountMode::PerFlight);
    println!("{:<14} {:>9} {:>11}", "department", "completed", "incomplete");
    for entry in &feed {
        println!(
            "{:<14} {:>9} {:>11}",
            entry.label, entry.counts.completed, entry.counts.incomplete
        );
    }

    let overall = global_counts(&flights, CountMode::PerFlight);
    if overall.has_data() {
        let pct = overall.completion_rate().unwrap_or(0.0) * 100.0;
        println!(
            "{:<14} {:>9} {:>11}   ({pct:.1}% complete)",
            "overall", overall.completed, overall.incomplete
        );
    } else {
        println!("no data");
    }

    Ok(())
}
