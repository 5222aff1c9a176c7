//! Watch page scraping: fetch, locate the embedded data, read the metrics.
//!
//! Each cycle flows through these submodules in order:
//!
//! | Step | Module | Failure mode |
//! |------|--------|--------------|
//! | Fetch the page | [`youtube`] | non-200 status aborts the cycle |
//! | Find and parse `ytInitialData` | [`initial_data`] | logged, `None` |
//! | Likes and comments | [`engagement`] | logged, `Unavailable` per count |
//! | Title, views, upload date | [`metadata`] | missing tag aborts the cycle |
//!
//! The engagement lookups are pure functions over `serde_json::Value` and
//! are tested against inline snapshots of the tree, so a layout change can
//! be reproduced without network access.

pub mod engagement;
pub mod initial_data;
pub mod metadata;
pub mod youtube;
