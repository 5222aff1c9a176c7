//! # Video Metrics Tracker
//!
//! Periodically fetches a public video watch page, pulls the view, like and
//! comment counts out of it, and appends them as a timestamped row to a
//! per-video CSV file.
//!
//! ## Usage
//!
//! ```sh
//! video_metrics_tracker dQw4w9WgXcQ --interval 3600
//! ```
//!
//! ## Architecture
//!
//! Each cycle is a straight pipeline:
//! 1. **Fetching**: GET the watch page with a desktop browser user agent
//! 2. **Extraction**: find the inline `ytInitialData` JSON and read the like
//!    and comment counts from it (best effort)
//! 3. **Scanning**: read title, view count and upload date from `<meta>` tags
//!    (required)
//! 4. **Output**: append one row to `<video_id>.csv`
//!
//! A failed cycle is logged and the next one runs after the usual interval.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod scrapers;
mod tracker;
mod utils;

use cli::Cli;
use config::{FileConfig, Settings, load_config};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "video_metrics_tracker starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = match &args.config {
        Some(path) => load_config(path).await?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args, file_config);
    info!(
        video_id = %settings.video_id,
        interval_secs = settings.interval.as_secs(),
        output_dir = %settings.output_dir.display(),
        save_html = settings.save_html,
        "Resolved settings"
    );

    // Early check: ensure output dir is writable
    if let Err(e) = ensure_writable_dir(&settings.output_dir).await {
        error!(
            path = %settings.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    tracker::track(settings).await?;
    Ok(())
}
