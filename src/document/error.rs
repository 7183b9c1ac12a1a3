//! Document error types
//!
//! Unified error handling for loading, decoding and rendering documents.
//! Every variant is recoverable: the viewer turns them into status messages.

use thiserror::Error;

use super::types::DocumentFormat;

/// Unified document error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Symbolic document name rejected by the lookup service
    ///
    /// Carries the service's error payload verbatim.
    #[error("{0}")]
    UnresolvedSource(String),

    /// File extension is not one of pdf, docx, pptx, xlsx
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Byte stream does not match the expected container format
    #[error("Failed to decode document: {0}")]
    Decode(String),

    /// Page index is valid but its content cannot be rendered
    #[error("Failed to render {unit} {page}: {reason}")]
    Render {
        unit: &'static str,
        page: usize,
        reason: String,
    },

    /// Document decoded to zero pages, slides or sheets
    #[error("No {} found in {} file", .0.unit_plural(), .0.label())]
    EmptyDocument(DocumentFormat),

    /// Network or IO failure while acquiring bytes
    #[error("Failed to fetch document: {0}")]
    Fetch(String),

    /// Adapter called outside `1..=page_count`
    #[error("Page {page} out of range (document has {page_count})")]
    PageOutOfRange { page: usize, page_count: usize },
}

impl DocumentError {
    /// Build a render error for `page` of a document in `format`
    pub fn render(format: DocumentFormat, page: usize, reason: impl ToString) -> Self {
        DocumentError::Render {
            unit: format.unit_noun(),
            page,
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (used by the adapters)
pub type DocumentResult<T> = Result<T>;

impl From<zip::result::ZipError> for DocumentError {
    fn from(err: zip::result::ZipError) -> Self {
        DocumentError::Decode(format!("invalid archive: {}", err))
    }
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Decode(format!("malformed XML: {}", err))
    }
}

impl From<quick_xml::de::DeError> for DocumentError {
    fn from(err: quick_xml::de::DeError) -> Self {
        DocumentError::Decode(format!("malformed XML: {}", err))
    }
}

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::Decode(err.to_string())
    }
}
