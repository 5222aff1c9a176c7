//! Error type for a single tracking cycle.
//!
//! Only failures that abort a cycle live here. Lookups of the like and
//! comment counts are lenient and return `Option` instead; see
//! [`crate::scrapers::engagement`].

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can abort one fetch/extract/record cycle.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The watch page answered with a non-success status.
    #[error("failed to fetch video page (status code: {status})")]
    Fetch { status: StatusCode },

    /// Transport-level failure while talking to the host.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A metadata tag the page is expected to always carry is missing or unreadable.
    #[error("page structure changed: {0}")]
    Structure(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid config file: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl TrackerError {
    pub(crate) fn structure(msg: impl Into<String>) -> Self {
        TrackerError::Structure(msg.into())
    }
}
