//! Locate and parse the `ytInitialData` blob embedded in a watch page.
//!
//! The watch page ships most of its dynamic state as an inline script:
//!
//! ```text
//! <script nonce="...">var ytInitialData = {"responseContext":{...},...};</script>
//! ```
//!
//! The format is owned by the host and changes without notice, so every
//! failure here is logged and turned into `None` instead of an error.

use crate::utils::{looks_truncated, truncate_for_log};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument, warn};

static INITIAL_DATA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)var ytInitialData = (\{.*?\});</script>").expect("valid ytInitialData regex")
});

/// Return the raw JSON text of the `ytInitialData` assignment, if present.
///
/// The match is non-greedy and stops at the first `};</script>`.
pub fn find_initial_data(html: &str) -> Option<&str> {
    INITIAL_DATA_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract and decode the `ytInitialData` blob.
///
/// Returns `None` when the assignment is absent or its payload is not valid
/// JSON; both cases are logged.
#[instrument(level = "debug", skip_all, fields(html_bytes = html.len()))]
pub fn extract_initial_data(html: &str) -> Option<Value> {
    let Some(raw) = find_initial_data(html) else {
        warn!("No ytInitialData found in the page");
        return None;
    };
    debug!(json_bytes = raw.len(), "Found ytInitialData");

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(
                error = %e,
                truncated = looks_truncated(&e),
                preview = %truncate_for_log(raw, 200),
                "Error decoding ytInitialData JSON"
            );
            None
        }
    }
}
