use thiserror::Error;

/// Failures on the load and render paths.
///
/// Every variant that can occur while loading a document is reported to the
/// user through the same toast; the variants exist so the logs say what
/// actually went wrong. Foreign errors are captured as strings because the
/// error travels through iced messages, which must be `Clone`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("server answered {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to bind to Pdfium library: {0}")]
    PdfiumUnavailable(String),

    #[error("failed to parse document: {0}")]
    Parse(String),

    #[error("failed to render page {page}: {reason}")]
    Render { page: usize, reason: String },

    #[error("page {page} is out of bounds (document has {page_count} pages)")]
    PageOutOfBounds { page: usize, page_count: usize },

    #[error("document {0} is not open")]
    UnknownDocument(u64),

    #[error("pdf engine is not running")]
    EngineGone,
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for ViewerError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::EngineGone
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for ViewerError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        Self::EngineGone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_http_status() {
        let err = ViewerError::HttpStatus {
            url: "https://example.com/a.pdf".into(),
            status: 404,
        };
        insta::assert_snapshot!(err.to_string(), @"server answered 404 for https://example.com/a.pdf");
    }

    #[test]
    fn test_display_out_of_bounds() {
        let err = ViewerError::PageOutOfBounds {
            page: 12,
            page_count: 10,
        };
        assert_eq!(
            err.to_string(),
            "page 12 is out of bounds (document has 10 pages)"
        );
    }

    #[test]
    fn test_closed_channel_maps_to_engine_gone() {
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        drop(tx);
        let err: ViewerError = rx.blocking_recv().unwrap_err().into();
        assert_eq!(err, ViewerError::EngineGone);
    }
}
