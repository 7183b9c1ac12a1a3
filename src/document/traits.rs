//! Document traits
//!
//! Format-agnostic interface every per-format adapter implements.

use async_trait::async_trait;

use super::error::Result;
use super::types::{DocumentFormat, RenderedView};

/// Format-specific decoder/renderer
///
/// One live instance exists per loaded document; it owns whatever decoded
/// state its format needs (MuPDF source bytes, slide list, workbook index).
/// Pages are addressed 1-based.
#[async_trait]
pub trait FormatAdapter: Send + Sync {
    /// Decode a byte stream into an adapter
    fn decode(bytes: Vec<u8>) -> Result<Self>
    where
        Self: Sized;

    /// Format handled by this adapter
    fn format(&self) -> DocumentFormat;

    /// Number of addressable units (pages, slides, sheets)
    fn page_count(&self) -> usize;

    /// Render unit `page` into a displayable view
    async fn render_page(&self, page: usize) -> Result<RenderedView>;

    /// Reject pages outside `1..=page_count`
    fn check_page(&self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(super::DocumentError::PageOutOfRange { page, page_count });
        }
        Ok(())
    }
}
