//! PDF handle that can cross threads
//!
//! Only the source bytes and the page count are kept. Every operation opens
//! its own MuPDF document while holding a `parking_lot::Mutex`, renders, and
//! drops it, so no rendered state survives between calls.

use std::sync::Arc;

use mupdf::Document;
use parking_lot::Mutex;

use crate::document::{DocumentError, DocumentFormat, DocumentResult};

/// Serialized PDF document handle
pub struct SafeDocument {
    /// Document bytes
    source: Arc<Vec<u8>>,
    /// Cached page count
    page_count: usize,
    /// Held while a MuPDF document is open
    lock: Mutex<()>,
}

impl SafeDocument {
    /// Validate `data` as a PDF and record its page count
    pub fn from_bytes(data: Vec<u8>) -> DocumentResult<Self> {
        if !data.starts_with(b"%PDF") {
            return Err(DocumentError::Decode("missing %PDF header".into()));
        }

        let doc = Document::from_bytes(&data, DocumentFormat::Pdf.mime_type())?;
        let page_count = doc.page_count()?;
        let page_count = usize::try_from(page_count)
            .map_err(|_| DocumentError::Decode(format!("invalid page count {}", page_count)))?;

        Ok(Self {
            source: Arc::new(data),
            page_count,
            lock: Mutex::new(()),
        })
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn open_document(&self) -> DocumentResult<Document> {
        Document::from_bytes(&self.source, DocumentFormat::Pdf.mime_type()).map_err(Into::into)
    }

    /// Execute a closure with access to a freshly opened document
    ///
    /// Access is serialized via mutex; the document is dropped afterward.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let bounds = safe_doc.with_doc(|doc| {
    ///     let page = doc.load_page(0)?;
    ///     Ok(page.bounds()?)
    /// })?;
    /// ```
    pub fn with_doc<F, R>(&self, f: F) -> DocumentResult<R>
    where
        F: FnOnce(&Document) -> DocumentResult<R>,
    {
        let _guard = self.lock.lock();
        let doc = self.open_document()?;
        f(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::fixtures;

    #[test]
    fn test_from_bytes_counts_pages() {
        let doc = SafeDocument::from_bytes(fixtures::pdf(3)).unwrap();
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn test_rejects_non_pdf() {
        let err = SafeDocument::from_bytes(b"PK\x03\x04 not a pdf".to_vec())
            .err()
            .unwrap();
        assert!(matches!(err, DocumentError::Decode(_)));
    }

    #[test]
    fn test_with_doc_opens_fresh_document() {
        let doc = SafeDocument::from_bytes(fixtures::pdf(2)).unwrap();
        let count = doc
            .with_doc(|d| Ok(d.page_count()? as usize))
            .unwrap();
        assert_eq!(count, 2);
    }
}
