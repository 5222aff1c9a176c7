//! Watch page fetching and per-cycle record assembly.
//!
//! # URL Pattern
//!
//! Pages are fetched from `{base_url}/watch?v={video_id}`, where `base_url`
//! defaults to `https://www.youtube.com`.

use crate::error::TrackerError;
use crate::models::MetricRecord;
use crate::scrapers::{engagement, initial_data, metadata};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

/// Default host serving watch pages.
pub const DEFAULT_BASE_URL: &str = "https://www.youtube.com";

/// Desktop Chrome identification; the bare client UA gets a consent page.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/114.0.0.0 Safari/537.36";

/// Build the HTTP client shared by every cycle.
///
/// No timeout is set: a hung request stalls the loop until the transport
/// gives up.
pub fn build_client(user_agent: &str) -> Result<Client, TrackerError> {
    Ok(Client::builder().user_agent(user_agent).build()?)
}

/// Canonical watch URL for a video id.
pub fn watch_url(base_url: &str, video_id: &str) -> Result<Url, TrackerError> {
    let base = Url::parse(base_url)?;
    let mut url = base.join("watch")?;
    url.query_pairs_mut().append_pair("v", video_id);
    Ok(url)
}

/// GET the watch page and return its body.
///
/// # Errors
///
/// - [`TrackerError::Fetch`] for any status other than `200 OK`
/// - [`TrackerError::Http`] for transport failures
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn fetch_watch_page(client: &Client, url: &Url) -> Result<String, TrackerError> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(TrackerError::Fetch { status });
    }

    let body = response.text().await?;
    info!(bytes = body.len(), "Fetched watch page");
    Ok(body)
}

/// Turn one fetched page into a [`MetricRecord`].
///
/// The engagement counts degrade to `Unavailable` on any miss; the metadata
/// scan is strict and its error aborts the record.
pub fn build_record(html: &str, timestamp: String) -> Result<MetricRecord, TrackerError> {
    let data = initial_data::extract_initial_data(html);
    let (likes, comments) = engagement::extract_engagement(data.as_ref());
    let meta = metadata::scan_metadata(html)?;
    debug!(%likes, %comments, "Assembled engagement counts");
    Ok(MetricRecord::new(timestamp, meta, likes, comments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Count;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and hand back the raw request.
    async fn serve_once(response: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });
        (base, handle)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: text/html\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        )
    }

    #[test]
    fn test_watch_url() {
        let url = watch_url(DEFAULT_BASE_URL, "dQw4w9WgXcQ").unwrap();
        assert_eq!(url.as_str(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn test_watch_url_encodes_identifier() {
        let url = watch_url("https://example.test/", "a&b c").unwrap();
        assert_eq!(url.as_str(), "https://example.test/watch?v=a%26b+c");
    }

    #[test]
    fn test_watch_url_rejects_bad_base() {
        assert!(matches!(
            watch_url("not a url", "abc"),
            Err(TrackerError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_sends_user_agent() {
        let (base, server) = serve_once(http_response("200 OK", "<html>ok</html>")).await;
        let client = build_client("test-agent/1.0").unwrap();
        let url = watch_url(&base, "abc123").unwrap();

        let body = fetch_watch_page(&client, &url).await.unwrap();
        assert_eq!(body, "<html>ok</html>");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /watch?v=abc123 "));
        assert!(request.to_ascii_lowercase().contains("user-agent: test-agent/1.0"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let (base, server) = serve_once(http_response("404 Not Found", "")).await;
        let client = build_client(DEFAULT_USER_AGENT).unwrap();
        let url = watch_url(&base, "abc123").unwrap();

        let err = fetch_watch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, TrackerError::Fetch { status } if status == StatusCode::NOT_FOUND));
        server.await.unwrap();
    }

    #[test]
    fn test_build_record_without_initial_data() {
        let html = r#"<html><head><meta name="title" content="Plain"></head><body>
            <meta itemprop="interactionCount" content="5">
            <meta itemprop="uploadDate" content="2024-02-02"></body></html>"#;
        let record = build_record(html, "2024-02-03T00:00:00.000000".to_string()).unwrap();
        assert_eq!(record.title, "Plain");
        assert_eq!(record.views, 5);
        assert_eq!(record.likes, Count::Unavailable);
        assert_eq!(record.comments, Count::Unavailable);
    }
}
