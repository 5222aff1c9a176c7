//! Debug copy of the last fetched watch page.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument};

/// `{output_dir}/{video_id}.html`
pub fn html_path(output_dir: &Path, video_id: &str) -> PathBuf {
    output_dir.join(format!("{video_id}.html"))
}

/// Replace the debug copy with `html`.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn save_page(path: &Path, html: &str) -> std::io::Result<()> {
    fs::write(path, html).await?;
    debug!(bytes = html.len(), "Saved page for debugging");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_page_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let path = html_path(tmp.path(), "abc123");
        assert!(path.ends_with("abc123.html"));

        save_page(&path, "<html>first, and longer</html>").await.unwrap();
        save_page(&path, "<html>second</html>").await.unwrap();

        let saved = fs::read_to_string(&path).await.unwrap();
        assert_eq!(saved, "<html>second</html>");
    }
}
