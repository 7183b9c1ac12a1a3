//! Document loader
//!
//! Turns a [`SourceDescriptor`] into `(bytes, format, display name)`. A
//! sample name goes through the lookup service and then the byte fetcher;
//! an upload is used as-is. The format always comes from a file extension:
//! the resolved location's for samples, the file name's for uploads.
//!
//! The loader never touches viewer state.

mod fetch;
mod lookup;

use std::sync::Arc;
use std::time::Instant;

use crate::document::{extension_of, DocumentError, DocumentFormat, DocumentResult};

pub use fetch::{sample_file_name, ByteFetcher, DocsDirFetcher, HttpFetcher, DOCS_PREFIX};
pub use lookup::{
    DocInfoRequest, DocInfoResponse, HttpSourceLookup, SampleRegistry, SourceLookup,
    NOT_FOUND_MESSAGE,
};

/// Where a document comes from
#[derive(Debug, Clone)]
pub enum SourceDescriptor {
    /// Symbolic sample name, resolved through the lookup service
    Sample { name: String },
    /// Locally supplied file
    Upload { file_name: String, bytes: Vec<u8> },
}

impl SourceDescriptor {
    pub fn sample(name: impl Into<String>) -> Self {
        Self::Sample { name: name.into() }
    }

    pub fn upload(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Upload {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Name shown to the user while and after loading
    pub fn display_name(&self) -> &str {
        match self {
            Self::Sample { name } => name,
            Self::Upload { file_name, .. } => file_name,
        }
    }
}

/// Raw document ready for decoding
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
    pub display_name: String,
}

/// Detect the format of `name` from its extension
pub fn detect_format(name: &str) -> DocumentResult<DocumentFormat> {
    let ext = extension_of(name).unwrap_or_default();
    DocumentFormat::from_extension(ext)
        .ok_or_else(|| DocumentError::UnsupportedFormat(ext.to_lowercase()))
}

/// Resolves and fetches documents
#[derive(Clone)]
pub struct DocumentLoader {
    lookup: Arc<dyn SourceLookup>,
    fetcher: Arc<dyn ByteFetcher>,
}

impl DocumentLoader {
    pub fn new(lookup: Arc<dyn SourceLookup>, fetcher: Arc<dyn ByteFetcher>) -> Self {
        Self { lookup, fetcher }
    }

    /// Loader backed by the in-process sample registry and a docs directory
    pub fn local(registry: SampleRegistry, docs_dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(registry), Arc::new(DocsDirFetcher::new(docs_dir)))
    }

    pub async fn load(&self, source: SourceDescriptor) -> DocumentResult<LoadedSource> {
        let start = Instant::now();

        let loaded = match source {
            SourceDescriptor::Sample { name } => {
                let location = self.lookup.resolve(&name).await?;
                let format = detect_format(&location)?;
                tracing::debug!("Resolved '{}' to {}", name, location);

                let bytes = self.fetcher.fetch(&location).await?;
                LoadedSource {
                    bytes,
                    format,
                    display_name: name,
                }
            }
            SourceDescriptor::Upload { file_name, bytes } => {
                let format = detect_format(&file_name)?;
                LoadedSource {
                    bytes,
                    format,
                    display_name: file_name,
                }
            }
        };

        tracing::info!(
            "Loaded '{}' as {} ({} bytes) in {:?}",
            loaded.display_name,
            loaded.format.label(),
            loaded.bytes.len(),
            start.elapsed()
        );
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ByteFetcher for CountingFetcher {
        async fn fetch(&self, _location: &str) -> DocumentResult<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(b"bytes".to_vec())
        }
    }

    fn loader_with_counter() -> (DocumentLoader, Arc<CountingFetcher>) {
        let fetcher = Arc::new(CountingFetcher {
            calls: AtomicUsize::new(0),
        });
        let loader = DocumentLoader::new(Arc::new(SampleRegistry::default()), fetcher.clone());
        (loader, fetcher)
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("Deck.PPTX").unwrap(), DocumentFormat::Pptx);
        assert_eq!(detect_format("/docs/sample_pdf.pdf").unwrap(), DocumentFormat::Pdf);
        assert!(matches!(
            detect_format("notes.txt"),
            Err(DocumentError::UnsupportedFormat(ext)) if ext == "txt"
        ));
        assert!(matches!(
            detect_format("README"),
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_sample_format_comes_from_location() {
        let (loader, fetcher) = loader_with_counter();
        let loaded = loader
            .load(SourceDescriptor::sample("Sample PPTX (5 slides)"))
            .await
            .unwrap();

        assert_eq!(loaded.format, DocumentFormat::Pptx);
        assert_eq!(loaded.display_name, "Sample PPTX (5 slides)");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unresolved_sample_skips_fetch() {
        let (loader, fetcher) = loader_with_counter();
        let result = loader.load(SourceDescriptor::sample("report")).await;

        assert!(matches!(
            result,
            Err(DocumentError::UnresolvedSource(ref m)) if m == NOT_FOUND_MESSAGE
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsupported_sample_location() {
        let registry = SampleRegistry::from_entries([("Notes".to_string(), "notes.txt".to_string())]);
        let fetcher = Arc::new(CountingFetcher {
            calls: AtomicUsize::new(0),
        });
        let loader = DocumentLoader::new(Arc::new(registry), fetcher.clone());

        assert!(matches!(
            loader.load(SourceDescriptor::sample("Notes")).await,
            Err(DocumentError::UnsupportedFormat(_))
        ));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upload_uses_bytes_as_is() {
        let (loader, fetcher) = loader_with_counter();
        let loaded = loader
            .load(SourceDescriptor::upload("Budget.xlsx", vec![1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(loaded.format, DocumentFormat::Xlsx);
        assert_eq!(loaded.bytes, vec![1, 2, 3]);
        assert_eq!(loaded.display_name, "Budget.xlsx");
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);

        assert!(matches!(
            loader.load(SourceDescriptor::upload("photo.png", vec![])).await,
            Err(DocumentError::UnsupportedFormat(_))
        ));
    }
}
