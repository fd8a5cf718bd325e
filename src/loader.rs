//! Resolves a document URL to the raw bytes handed to the engine.

use crate::error::{Result, ViewerError};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Remote(String),
    Local(PathBuf),
}

impl DocumentSource {
    /// `http(s)://` URLs are fetched, `file://` URLs and anything else are
    /// read from disk. `file://` URLs are percent-decoded; one that does not
    /// parse as a URL falls back to the raw text after the scheme.
    pub fn parse(url: &str) -> Self {
        let url = url.trim();
        let lower = url.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Remote(url.to_string())
        } else if lower.starts_with("file://") {
            let path = reqwest::Url::parse(url)
                .ok()
                .and_then(|parsed| parsed.to_file_path().ok())
                .unwrap_or_else(|| PathBuf::from(&url["file://".len()..]));
            Self::Local(path)
        } else {
            Self::Local(PathBuf::from(url))
        }
    }
}

pub async fn fetch(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    match DocumentSource::parse(url) {
        DocumentSource::Remote(url) => fetch_remote(&url, timeout).await,
        DocumentSource::Local(path) => {
            tracing::debug!(path = %path.display(), "reading local document");
            tokio::fs::read(&path).await.map_err(|e| ViewerError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
        }
    }
}

async fn fetch_remote(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let fetch_err = |e: reqwest::Error| ViewerError::Fetch {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(fetch_err)?;

    tracing::debug!(url, "fetching remote document");
    let response = client.get(url).send().await.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ViewerError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let bytes = response.bytes().await.map_err(fetch_err)?;
    tracing::debug!(url, len = bytes.len(), "fetched remote document");
    Ok(bytes.to_vec())
}
