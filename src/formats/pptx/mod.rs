//! PPTX format implementation
//!
//! The slide list is taken from the archive index at decode time. Each
//! `render_page` call reads and parses its slide part on demand.

mod slide;

use async_trait::async_trait;

use crate::document::{
    DocumentError, DocumentFormat, DocumentResult, FormatAdapter, MarkupKind, RenderedView,
};
use crate::formats::ooxml::OoxmlPackage;

const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Presentation adapter
pub struct PptxAdapter {
    package: OoxmlPackage,
    /// Slide part names ordered by slide number
    slides: Vec<String>,
}

impl PptxAdapter {
    pub fn slide_parts(&self) -> &[String] {
        &self.slides
    }
}

#[async_trait]
impl FormatAdapter for PptxAdapter {
    fn decode(bytes: Vec<u8>) -> DocumentResult<Self> {
        let package = OoxmlPackage::open(bytes)?;

        let presentation = package.main_part(PRESENTATION_PART)?;
        if !package.contains(&presentation) {
            return Err(DocumentError::Decode(format!(
                "missing part {}",
                presentation
            )));
        }

        let mut numbered: Vec<(usize, String)> = package
            .entries()
            .iter()
            .filter_map(|entry| slide::slide_number(entry).map(|n| (n, entry.clone())))
            .collect();
        numbered.sort_by_key(|(n, _)| *n);

        tracing::debug!("PPTX package has {} slides", numbered.len());

        Ok(Self {
            package,
            slides: numbered.into_iter().map(|(_, name)| name).collect(),
        })
    }

    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pptx
    }

    fn page_count(&self) -> usize {
        self.slides.len()
    }

    async fn render_page(&self, page: usize) -> DocumentResult<RenderedView> {
        self.check_page(page)?;
        let render_error = |reason: String| DocumentError::render(DocumentFormat::Pptx, page, reason);

        let part = &self.slides[page - 1];
        let xml = self
            .package
            .read_part(part)
            .map_err(|e| render_error(e.to_string()))?
            .ok_or_else(|| render_error(format!("missing part {}", part)))?;

        let paragraphs = slide::slide_paragraphs(&xml).map_err(|e| render_error(e.to_string()))?;

        Ok(RenderedView::Markup {
            kind: MarkupKind::Slide,
            html: slide::slide_html(&paragraphs, page, self.page_count()),
        })
    }
}
