//! Data models for one tracking cycle.
//!
//! - [`Count`]: an engagement metric that may not have been recovered
//! - [`PageMetadata`]: the three values read from the page's meta tags
//! - [`MetricRecord`]: the flat row appended to the CSV file each cycle
//!
//! The CSV header is derived from [`MetricRecord`]'s serde field names, so
//! the field order here is the column order on disk.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Text written in place of a metric that could not be recovered.
pub const UNAVAILABLE: &str = "Unavailable";

/// A like or comment count.
///
/// Extraction of these is best-effort: when the embedded data blob is
/// missing or its layout changed, the count is [`Count::Unavailable`] and
/// the row is still written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Known(u64),
    Unavailable,
}

impl From<Option<u64>> for Count {
    fn from(value: Option<u64>) -> Self {
        value.map_or(Count::Unavailable, Count::Known)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Known(n) => write!(f, "{n}"),
            Count::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

impl FromStr for Count {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == UNAVAILABLE {
            Ok(Count::Unavailable)
        } else {
            s.parse().map(Count::Known)
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Known(n) => serializer.serialize_u64(*n),
            Count::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Values read from the page's `<meta>` tags.
///
/// Unlike [`Count`], every field here is required: a page without them is
/// treated as a structural change and aborts the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMetadata {
    /// Content of `<meta name="title">`.
    pub title: String,
    /// Content of `<meta itemprop="uploadDate">`, kept verbatim.
    pub published_at: String,
    /// Content of `<meta itemprop="interactionCount">`.
    pub views: u64,
}

/// One row of the per-video CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Local capture time in ISO-8601 form.
    pub timestamp: String,
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub views: u64,
    pub likes: Count,
    pub comments: Count,
}

impl MetricRecord {
    pub fn new(timestamp: String, metadata: PageMetadata, likes: Count, comments: Count) -> Self {
        MetricRecord {
            timestamp,
            title: metadata.title,
            published_at: metadata.published_at,
            views: metadata.views,
            likes,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_from_option() {
        assert_eq!(Count::from(Some(42)), Count::Known(42));
        assert_eq!(Count::from(None), Count::Unavailable);
    }

    #[test]
    fn test_count_display_and_parse() {
        assert_eq!(Count::Known(5000).to_string(), "5000");
        assert_eq!(Count::Unavailable.to_string(), "Unavailable");
        assert_eq!("5000".parse::<Count>().unwrap(), Count::Known(5000));
        assert_eq!("Unavailable".parse::<Count>().unwrap(), Count::Unavailable);
        assert!("n/a".parse::<Count>().is_err());
    }

    #[test]
    fn test_zero_is_a_known_count() {
        assert_eq!(Count::from(Some(0)), Count::Known(0));
        assert_eq!(Count::Known(0).to_string(), "0");
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let record = MetricRecord::new(
            "2024-01-01T00:00:00.000000".to_string(),
            PageMetadata {
                title: "Title".to_string(),
                published_at: "2023-01-01".to_string(),
                views: 7,
            },
            Count::Known(3),
            Count::Unavailable,
        );

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"2024-01-01T00:00:00.000000","title":"Title","publishedAt":"2023-01-01","views":7,"likes":3,"comments":"Unavailable"}"#
        );
    }
}
