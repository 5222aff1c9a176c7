//! The fetch/record loop.
//!
//! One cycle runs to completion before the wait starts, so cycles never
//! overlap. Any error inside a cycle is logged and the next cycle runs on
//! schedule; only Ctrl-C ends the loop.

use crate::config::Settings;
use crate::error::TrackerError;
use crate::models::MetricRecord;
use crate::outputs::csv::{append_record, csv_path, read_records};
use crate::outputs::html::{html_path, save_page};
use crate::scrapers::youtube::{build_client, build_record, fetch_watch_page, watch_url};
use crate::utils::capture_timestamp;
use reqwest::Client;
use std::future::Future;
use tokio::signal;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Fetch the page once and append one row.
///
/// Nothing is appended if any step fails. A failure to write the debug copy
/// of the page is only logged.
#[instrument(level = "info", skip_all, fields(video_id = %settings.video_id))]
pub async fn run_cycle(client: &Client, settings: &Settings) -> Result<MetricRecord, TrackerError> {
    let url = watch_url(&settings.base_url, &settings.video_id)?;
    let html = fetch_watch_page(client, &url).await?;

    if settings.save_html {
        let path = html_path(&settings.output_dir, &settings.video_id);
        if let Err(e) = save_page(&path, &html).await {
            warn!(path = %path.display(), error = %e, "Failed to save page copy");
        }
    }

    let record = build_record(&html, capture_timestamp())?;
    append_record(&csv_path(&settings.output_dir, &settings.video_id), &record).await?;
    Ok(record)
}

fn log_recorded(record: &MetricRecord) {
    info!(
        timestamp = %record.timestamp,
        title = %record.title,
        published_at = %record.published_at,
        views = record.views,
        likes = %record.likes,
        comments = %record.comments,
        "Recorded data"
    );
}

/// Log how many rows an existing CSV already holds.
fn log_existing_rows(settings: &Settings) {
    let path = csv_path(&settings.output_dir, &settings.video_id);
    if !path.exists() {
        info!(path = %path.display(), "Starting a new metrics file");
        return;
    }
    match read_records(&path) {
        Ok(rows) => info!(path = %path.display(), rows = rows.len(), "Appending to existing metrics file"),
        Err(e) => warn!(path = %path.display(), error = %e, "Existing metrics file is not readable as records"),
    }
}

/// Run cycles every `settings.interval` until `shutdown` resolves.
pub async fn run_until<F>(client: &Client, settings: &Settings, shutdown: F)
where
    F: Future,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = run_cycle(client, settings) => match result {
                Ok(record) => log_recorded(&record),
                Err(e) => error!(error = %e, "Cycle failed; retrying next interval"),
            },
            _ = &mut shutdown => break,
        }

        tokio::select! {
            _ = sleep(settings.interval) => {}
            _ = &mut shutdown => break,
        }
    }
}

/// Entry point used by `main`: track forever, or once with `--once`.
#[instrument(level = "info", skip_all, fields(video_id = %settings.video_id, interval_secs = settings.interval.as_secs()))]
pub async fn track(settings: Settings) -> Result<(), TrackerError> {
    let client = build_client(&settings.user_agent)?;
    log_existing_rows(&settings);

    if settings.once {
        let record = run_cycle(&client, &settings).await?;
        log_recorded(&record);
        return Ok(());
    }

    info!("Tracking started; press Ctrl-C to stop");
    run_until(&client, &settings, signal::ctrl_c()).await;
    info!("Tracking stopped by user.");
    Ok(())
}
