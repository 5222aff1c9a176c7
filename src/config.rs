//! Runtime settings.
//!
//! Values are resolved in three layers, last one wins:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file passed with `--config`
//! 3. Command-line flags and their environment variables
//!
//! ```yaml
//! # config.yaml
//! interval: 1800
//! output_dir: /var/lib/video-metrics
//! save_html: false
//! user_agent: "Mozilla/5.0 (X11; Linux x86_64) ..."
//! base_url: "https://www.youtube.com"
//! ```

use crate::cli::Cli;
use crate::error::TrackerError;
use crate::scrapers::youtube::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

/// Seconds between cycles when nothing else is configured.
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// Contents of the optional YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub interval: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub save_html: Option<bool>,
    pub user_agent: Option<String>,
    pub base_url: Option<String>,
}

/// Load a [`FileConfig`] from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_config(path: &Path) -> Result<FileConfig, TrackerError> {
    let text = fs::read_to_string(path).await?;
    let config: FileConfig = serde_yaml::from_str(&text)?;
    info!("Loaded configuration");
    Ok(config)
}

/// Fully resolved settings for one run, threaded explicitly into the loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub video_id: String,
    pub interval: Duration,
    pub output_dir: PathBuf,
    pub save_html: bool,
    pub user_agent: String,
    pub base_url: String,
    pub once: bool,
}

impl Settings {
    /// Merge CLI arguments over the config file over the defaults.
    pub fn resolve(cli: Cli, file: FileConfig) -> Self {
        let interval_secs = cli
            .interval
            .or(file.interval)
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_INTERVAL_SECS);

        Settings {
            video_id: cli.video_id,
            interval: Duration::from_secs(interval_secs),
            output_dir: cli
                .output_dir
                .or(file.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            save_html: !cli.no_save_html && file.save_html.unwrap_or(true),
            user_agent: file
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            base_url: file
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            once: cli.once,
        }
    }
}
