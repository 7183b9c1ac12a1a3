//! PDF format implementation
//!
//! [`PdfAdapter`] implements `FormatAdapter` on top of [`SafeDocument`].
//! Page count comes from MuPDF; each `render_page` call rasterizes the page
//! from scratch at the adapter's fixed scale.

mod renderer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{DocumentError, DocumentFormat, DocumentResult, FormatAdapter, RenderedView};
use crate::mupdf::SafeDocument;

/// Default rasterization scale
pub const DEFAULT_SCALE: f32 = 1.5;

/// PDF adapter
pub struct PdfAdapter {
    doc: Arc<SafeDocument>,
    scale: f32,
}

impl PdfAdapter {
    /// Override the rasterization scale (clamped to 0.1..=4.0)
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale.clamp(0.1, 4.0);
        self
    }
}

#[async_trait]
impl FormatAdapter for PdfAdapter {
    fn decode(bytes: Vec<u8>) -> DocumentResult<Self> {
        let doc = SafeDocument::from_bytes(bytes)?;
        Ok(Self {
            doc: Arc::new(doc),
            scale: DEFAULT_SCALE,
        })
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    async fn render_page(&self, page: usize) -> DocumentResult<RenderedView> {
        self.check_page(page)?;

        let doc = self.doc.clone();
        let scale = self.scale;

        // MuPDF work is CPU-bound
        tokio::task::spawn_blocking(move || renderer::rasterize_page(&doc, page, scale))
            .await
            .map_err(|e| {
                DocumentError::render(DocumentFormat::Pdf, page, format!("Task join error: {}", e))
            })?
    }
}
