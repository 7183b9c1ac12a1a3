//! Format-specific document implementations
//!
//! Each submodule provides one `FormatAdapter`:
//!
//! - `pdf`: MuPDF rasterization, one PNG per page
//! - `docx`: whole document converted to markup, always one page
//! - `pptx`: one page per `ppt/slides/slide{N}.xml`
//! - `xlsx`: one page per worksheet, rendered as a table
//!
//! [`decode`] picks the adapter for a detected format and returns it boxed,
//! which is how the Navigator owns it.

pub mod docx;
pub mod pdf;
pub mod pptx;
pub mod xlsx;

mod ooxml;

#[cfg(test)]
pub(crate) mod fixtures;

use std::time::Instant;

use crate::document::{DocumentError, DocumentFormat, DocumentResult, FormatAdapter};

pub use docx::DocxAdapter;
pub use pdf::PdfAdapter;
pub use pptx::PptxAdapter;
pub use xlsx::XlsxAdapter;

/// Options applied when decoding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeOptions {
    /// PDF rasterization scale
    pub pdf_scale: f32,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            pdf_scale: pdf::DEFAULT_SCALE,
        }
    }
}

/// Decode `bytes` with the adapter for `format`
pub fn decode(
    format: DocumentFormat,
    bytes: Vec<u8>,
    options: &DecodeOptions,
) -> DocumentResult<Box<dyn FormatAdapter>> {
    let start = Instant::now();
    let size = bytes.len();

    let adapter: Box<dyn FormatAdapter> = match format {
        DocumentFormat::Pdf => Box::new(PdfAdapter::decode(bytes)?.with_scale(options.pdf_scale)),
        DocumentFormat::Docx => Box::new(DocxAdapter::decode(bytes)?),
        DocumentFormat::Pptx => Box::new(PptxAdapter::decode(bytes)?),
        DocumentFormat::Xlsx => Box::new(XlsxAdapter::decode(bytes)?),
    };

    tracing::debug!(
        "Decoded {} ({} bytes, {} {}) in {:?}",
        format.label(),
        size,
        adapter.page_count(),
        format.unit_plural(),
        start.elapsed()
    );

    Ok(adapter)
}

/// [`decode`] on the blocking thread pool
pub async fn decode_blocking(
    format: DocumentFormat,
    bytes: Vec<u8>,
    options: DecodeOptions,
) -> DocumentResult<Box<dyn FormatAdapter>> {
    tokio::task::spawn_blocking(move || decode(format, bytes, &options))
        .await
        .map_err(|e| DocumentError::Decode(format!("Task join error: {}", e)))?
}
