//! Test doubles for the viewer

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::document::{
    DocumentError, DocumentFormat, DocumentResult, FormatAdapter, MarkupKind, RenderedView,
};

#[derive(Default)]
struct MockLog {
    rendered: Vec<usize>,
    failing: HashSet<usize>,
}

/// Adapter with a fixed page count that records every render call
///
/// Clones share the same log.
#[derive(Clone)]
pub(crate) struct MockAdapter {
    format: DocumentFormat,
    page_count: usize,
    log: Arc<Mutex<MockLog>>,
}

impl MockAdapter {
    pub fn new(format: DocumentFormat, page_count: usize) -> Self {
        Self {
            format,
            page_count,
            log: Arc::default(),
        }
    }

    /// Pages rendered so far, in call order
    pub fn rendered(&self) -> Vec<usize> {
        self.log.lock().rendered.clone()
    }

    /// Make renders of `page` fail from now on
    pub fn fail_on(&self, page: usize) {
        self.log.lock().failing.insert(page);
    }
}

#[async_trait]
impl FormatAdapter for MockAdapter {
    fn decode(_bytes: Vec<u8>) -> DocumentResult<Self> {
        Ok(Self::new(DocumentFormat::Pdf, 1))
    }

    fn format(&self) -> DocumentFormat {
        self.format
    }

    fn page_count(&self) -> usize {
        self.page_count
    }

    async fn render_page(&self, page: usize) -> DocumentResult<RenderedView> {
        self.check_page(page)?;

        let mut log = self.log.lock();
        log.rendered.push(page);
        if log.failing.contains(&page) {
            return Err(DocumentError::render(self.format, page, "mock failure"));
        }

        Ok(RenderedView::Markup {
            kind: MarkupKind::Document,
            html: format!("<p>{} {}</p>", self.format.unit_title(), page),
        })
    }
}
