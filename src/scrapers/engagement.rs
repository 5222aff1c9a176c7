//! Like and comment counts from the parsed `ytInitialData` tree.
//!
//! Both counts sit deep inside UI rendering state whose layout varies with
//! the page variant the host decided to serve. Each lookup is a pure
//! function from the tree to `Option<u64>` and is independent of the other:
//! a miss in one never affects the other, and neither aborts the cycle.
//!
//! # Likes
//!
//! ```text
//! contents.twoColumnWatchNextResults.results.results.contents[]
//!   .videoPrimaryInfoRenderer.videoActions.menuRenderer.topLevelButtons[]
//!     .segmentedLikeDislikeButtonViewModel
//!       .likeButtonViewModel.likeButtonViewModel
//!       .toggleButtonViewModel.toggleButtonViewModel
//!       .defaultButtonViewModel.buttonViewModel { iconName: "LIKE", title: "12K" }
//! ```
//!
//! # Comments
//!
//! ```text
//! engagementPanels[].engagementPanelSectionListRenderer
//!   { panelIdentifier: "engagement-panel-comments-section" }
//!   .header.engagementPanelTitleHeaderRenderer.contextualInfo.runs[0].text
//! ```

use crate::models::Count;
use crate::utils::strip_thousands_separators;
use serde_json::Value;
use tracing::{debug, warn};

const PRIMARY_CONTENTS: &str = "/contents/twoColumnWatchNextResults/results/results/contents";
const TOP_LEVEL_BUTTONS: &str = "/videoActions/menuRenderer/topLevelButtons";
const LIKE_BUTTON_VIEW_MODEL: &str = "/segmentedLikeDislikeButtonViewModel\
/likeButtonViewModel/likeButtonViewModel\
/toggleButtonViewModel/toggleButtonViewModel\
/defaultButtonViewModel/buttonViewModel";
const LIKE_ICON: &str = "LIKE";

const COMMENTS_PANEL_ID: &str = "engagement-panel-comments-section";
const COMMENTS_COUNT_TEXT: &str = "/header/engagementPanelTitleHeaderRenderer/contextualInfo/runs/0/text";

/// Title text of the first like button found in the primary info renderer.
fn find_like_text(data: &Value) -> Option<&str> {
    data.pointer(PRIMARY_CONTENTS)?
        .as_array()?
        .iter()
        .filter_map(|item| item.get("videoPrimaryInfoRenderer"))
        .filter_map(|info| info.pointer(TOP_LEVEL_BUTTONS)?.as_array())
        .flatten()
        .filter_map(|button| button.pointer(LIKE_BUTTON_VIEW_MODEL))
        .find(|vm| vm.get("iconName").and_then(Value::as_str) == Some(LIKE_ICON))?
        .get("title")?
        .as_str()
}

/// Count text from the header of the comments engagement panel.
fn find_comments_text(data: &Value) -> Option<&str> {
    data.get("engagementPanels")?
        .as_array()?
        .iter()
        .filter_map(|panel| panel.get("engagementPanelSectionListRenderer"))
        .find(|section| {
            section.get("panelIdentifier").and_then(Value::as_str) == Some(COMMENTS_PANEL_ID)
        })?
        .pointer(COMMENTS_COUNT_TEXT)?
        .as_str()
}

/// Recover the like count, e.g. `"12K"` -> `12000`.
pub fn extract_likes(data: &Value) -> Option<u64> {
    let text = find_like_text(data)?;
    debug!(raw = %text, "Found like button title");
    parse_abbreviated_count(text)
}

/// Recover the comment count, e.g. `"1,234"` -> `1234`.
pub fn extract_comments(data: &Value) -> Option<u64> {
    let text = find_comments_text(data)?;
    debug!(raw = %text, "Found comments panel count");
    strip_thousands_separators(text.trim()).parse().ok()
}

/// Run both lookups against an optional tree.
///
/// A missing tree (the extractor found no usable blob) makes both counts
/// unavailable; otherwise each count stands on its own.
pub fn extract_engagement(data: Option<&Value>) -> (Count, Count) {
    let Some(data) = data else {
        return (Count::Unavailable, Count::Unavailable);
    };

    let likes = extract_likes(data);
    if likes.is_none() {
        warn!("Like count unavailable; page layout may have changed");
    }
    let comments = extract_comments(data);
    if comments.is_none() {
        warn!("Comment count unavailable; page layout may have changed");
    }

    (likes.into(), comments.into())
}

/// Parse a count that may carry a `K` or `M` unit suffix.
///
/// Thousands separators are stripped first. The scaled value is truncated
/// toward zero, so `"1.2345K"` is `1234`. Any other suffix (including `B`)
/// or a non-numeric body yields `None`.
pub fn parse_abbreviated_count(text: &str) -> Option<u64> {
    let cleaned = strip_thousands_separators(text.trim());
    if let Some(number) = cleaned.strip_suffix('K') {
        scale_decimal(number, 1_000)
    } else if let Some(number) = cleaned.strip_suffix('M') {
        scale_decimal(number, 1_000_000)
    } else {
        cleaned.parse().ok()
    }
}

/// `number * multiplier` for a plain decimal like `3.4`, in integer arithmetic.
fn scale_decimal(number: &str, multiplier: u64) -> Option<u64> {
    let (whole, frac) = number.split_once('.').unwrap_or((number, ""));
    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return None;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let scaled_whole = whole.checked_mul(multiplier)?;

    // 18 digits keep the intermediate product well inside u128
    let frac = &frac[..frac.len().min(18)];
    if frac.is_empty() {
        return Some(scaled_whole);
    }
    let frac_value: u128 = frac.parse().ok()?;
    let scaled_frac = frac_value * u128::from(multiplier) / 10u128.pow(frac.len() as u32);
    scaled_whole.checked_add(u64::try_from(scaled_frac).ok()?)
}
