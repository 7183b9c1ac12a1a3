//! DOCX format implementation
//!
//! The whole document is converted to markup once, at decode time, and shown
//! as a single continuous page: `page_count()` is always 1.

mod convert;

use async_trait::async_trait;

use crate::document::{
    DocumentFormat, DocumentResult, FormatAdapter, MarkupKind, RenderedView,
};
use crate::formats::ooxml::OoxmlPackage;

const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Word-processing document adapter
pub struct DocxAdapter {
    html: String,
}

impl DocxAdapter {
    /// Converted markup
    pub fn html(&self) -> &str {
        &self.html
    }
}

#[async_trait]
impl FormatAdapter for DocxAdapter {
    fn decode(bytes: Vec<u8>) -> DocumentResult<Self> {
        let package = OoxmlPackage::open(bytes)?;
        let main_part = package.main_part(DEFAULT_MAIN_PART)?;
        let xml = package.require_part(&main_part)?;
        let body = convert::document_to_html(&xml)?;

        Ok(Self {
            html: format!("<div class=\"docx-content\">\n{}</div>", body),
        })
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Docx
    }

    fn page_count(&self) -> usize {
        1
    }

    async fn render_page(&self, page: usize) -> DocumentResult<RenderedView> {
        self.check_page(page)?;
        Ok(RenderedView::Markup {
            kind: MarkupKind::Document,
            html: self.html.clone(),
        })
    }
}
