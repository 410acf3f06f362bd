//! Error types for the reading-order library.
//!
//! Data-shape problems in OCR output (malformed rows, empty pages, too few
//! column gaps) are recovered locally and never show up here. These variants
//! cover constructor contract violations, configuration mistakes and failures
//! of the external OCR/rasterization collaborators.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while turning OCR output into Markdown.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bounding box with inverted or negative extents
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Word box constructed from blank text
    #[error("Word text is empty after trimming")]
    EmptyText,

    /// hOCR stream that is not well-formed markup
    #[error("Markup error: {0}")]
    Markup(String),

    /// Invalid layout configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// OCR engine invocation failed
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Page rasterization failed
    #[error("Rasterization error: {0}")]
    Rasterize(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (configuration) decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_geometry_error() {
        let err = Error::InvalidGeometry("right 10 < left 20".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Invalid geometry"));
        assert!(msg.contains("right 10 < left 20"));
    }

    #[test]
    fn test_ocr_error() {
        let err = Error::Ocr("tesseract exited with status 1".to_string());
        assert_eq!(format!("{}", err), "OCR error: tesseract exited with status 1");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.tsv");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("missing.tsv"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
