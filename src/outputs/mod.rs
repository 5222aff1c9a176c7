//! Output files written for each tracked video.
//!
//! # Submodules
//!
//! - [`csv`]: Appends one [`MetricRecord`](crate::models::MetricRecord) row per cycle
//! - [`html`]: Overwrites a copy of the last fetched page for debugging
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── dQw4w9WgXcQ.csv   # header + one row per successful cycle
//! └── dQw4w9WgXcQ.html  # last fetched page, replaced every cycle
//! ```

pub mod csv;
pub mod html;
