//! Title, view count and upload date from the page's `<meta>` tags.
//!
//! These tags have been stable for years, so unlike the engagement counts a
//! missing tag is treated as a structural change and fails the cycle.

use crate::error::TrackerError;
use crate::models::PageMetadata;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"meta[name="title"]"#).unwrap());
static VIEW_COUNT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[itemprop="interactionCount"]"#).unwrap());
static UPLOAD_DATE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[itemprop="uploadDate"]"#).unwrap());

/// `content` attribute of the first element matching `selector`.
fn meta_content<'a>(
    document: &'a Html,
    selector: &Selector,
    label: &str,
) -> Result<&'a str, TrackerError> {
    document
        .select(selector)
        .next()
        .ok_or_else(|| TrackerError::structure(format!("missing <meta {label}>")))?
        .value()
        .attr("content")
        .ok_or_else(|| TrackerError::structure(format!("<meta {label}> has no content")))
}

/// Read the three required metadata values from a watch page.
///
/// # Errors
///
/// [`TrackerError::Structure`] if any tag or its `content` attribute is
/// missing, or if the view count is not an integer.
#[instrument(level = "debug", skip_all, fields(html_bytes = html.len()))]
pub fn scan_metadata(html: &str) -> Result<PageMetadata, TrackerError> {
    let document = Html::parse_document(html);

    let title = meta_content(&document, &TITLE, r#"name="title""#)?;
    let views = meta_content(&document, &VIEW_COUNT, r#"itemprop="interactionCount""#)?;
    let upload_date = meta_content(&document, &UPLOAD_DATE, r#"itemprop="uploadDate""#)?;

    let views = views.trim().parse::<u64>().map_err(|e| {
        TrackerError::structure(format!("view count {views:?} is not an integer: {e}"))
    })?;
    debug!(%title, views, %upload_date, "Scanned page metadata");

    Ok(PageMetadata {
        title: title.to_string(),
        published_at: upload_date.to_string(),
        views,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: &str = r#"<!DOCTYPE html><html><head>
        <meta name="title" content="Test Video">
        <meta name="description" content="A video">
        </head><body><div itemscope itemtype="http://schema.org/VideoObject">
        <meta itemprop="name" content="Test Video">
        <meta itemprop="interactionCount" content="1000">
        <meta itemprop="uploadDate" content="2023-01-01T00:00:00Z">
        </div></body></html>"#;

    #[test]
    fn test_scan_metadata_reads_all_fields() {
        let meta = scan_metadata(HEAD).unwrap();
        assert_eq!(
            meta,
            PageMetadata {
                title: "Test Video".to_string(),
                published_at: "2023-01-01T00:00:00Z".to_string(),
                views: 1000,
            }
        );
    }

    #[test]
    fn test_scan_metadata_decodes_entities() {
        let html = HEAD.replace(
            r#"<meta name="title" content="Test Video">"#,
            r#"<meta name="title" content="Tom &amp; Jerry, &quot;live&quot;">"#,
        );
        let meta = scan_metadata(&html).unwrap();
        assert_eq!(meta.title, r#"Tom & Jerry, "live""#);
    }

    #[test]
    fn test_missing_view_count_is_structure_error() {
        let html = HEAD.replace(r#"<meta itemprop="interactionCount" content="1000">"#, "");
        let err = scan_metadata(&html).unwrap_err();
        assert!(matches!(err, TrackerError::Structure(ref m) if m.contains("interactionCount")));
    }

    #[test]
    fn test_missing_title_is_structure_error() {
        let html = HEAD.replace(r#"<meta name="title" content="Test Video">"#, "");
        assert!(matches!(scan_metadata(&html), Err(TrackerError::Structure(_))));
    }

    #[test]
    fn test_missing_content_attribute() {
        let html = HEAD.replace(
            r#"<meta itemprop="uploadDate" content="2023-01-01T00:00:00Z">"#,
            r#"<meta itemprop="uploadDate">"#,
        );
        let err = scan_metadata(&html).unwrap_err();
        assert!(err.to_string().contains("has no content"));
    }

    #[test]
    fn test_non_integer_view_count() {
        let html = HEAD.replace(r#"content="1000""#, r#"content="1.2K""#);
        let err = scan_metadata(&html).unwrap_err();
        assert!(err.to_string().contains("not an integer"));
    }
}
