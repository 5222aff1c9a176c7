//! Append-only CSV log of metric records.
//!
//! The header row is written only when the file is first created; every
//! later call appends exactly one data row. Quoting follows the `csv`
//! crate's defaults (fields with commas, quotes or newlines are quoted and
//! inner quotes doubled).
//!
//! A single writer per file is assumed.

use crate::error::TrackerError;
use crate::models::MetricRecord;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// `{output_dir}/{video_id}.csv`
pub fn csv_path(output_dir: &Path, video_id: &str) -> PathBuf {
    output_dir.join(format!("{video_id}.csv"))
}

/// Serialize `record` as one CSV line, preceded by the header when asked.
fn encode_row(record: &MetricRecord, with_header: bool) -> Result<Vec<u8>, TrackerError> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(with_header)
        .from_writer(Vec::new());
    writer.serialize(record)?;
    writer.into_inner().map_err(|e| TrackerError::Io(e.into_error()))
}

/// Append `record` to the CSV file at `path`, creating it with a header row
/// if it does not exist yet.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn append_record(path: &Path, record: &MetricRecord) -> Result<(), TrackerError> {
    let is_new = !fs::try_exists(path).await?;
    let bytes = encode_row(record, is_new)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(&bytes).await?;
    file.flush().await?;

    info!(header_written = is_new, "Appended metric row");
    Ok(())
}

/// Read every record back from a CSV file written by [`append_record`].
pub fn read_records(path: &Path) -> Result<Vec<MetricRecord>, TrackerError> {
    let mut reader = ::csv::Reader::from_path(path)?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<MetricRecord>, _>>()?;
    Ok(records)
}
