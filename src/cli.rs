//! Command-line interface definitions.
//!
//! Options left unset here fall back to the YAML config file (if given) and
//! then to built-in defaults; see [`crate::config`].

use clap::Parser;
use std::path::PathBuf;

/// Track a video's views, likes and comments over time.
///
/// # Examples
///
/// ```sh
/// # Record every hour into ./dQw4w9WgXcQ.csv
/// video_metrics_tracker dQw4w9WgXcQ
///
/// # Every 10 minutes, into ./data, without the debug page copy
/// video_metrics_tracker dQw4w9WgXcQ --interval 600 -o ./data --no-save-html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Video ID (e.g., dQw4w9WgXcQ)
    pub video_id: String,

    /// Seconds between checks [default: 3600]
    #[arg(short, long, env = "TRACKER_INTERVAL", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Directory for the CSV and debug HTML files [default: .]
    #[arg(short, long, env = "TRACKER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Don't keep a copy of the last fetched page
    #[arg(long)]
    pub no_save_html: bool,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}
