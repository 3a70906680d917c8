//! Error types for the transform engine.

/// Error constructing a transform engine.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Requested format is not one of `text`, `html`, `docx`, `react`.
    #[error("unsupported transform format \"{0}\" (expected one of: text, html, docx, react)")]
    UnsupportedFormat(String),
}
