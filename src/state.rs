//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::loader::{
    DocsDirFetcher, DocumentLoader, HttpFetcher, HttpSourceLookup, SampleRegistry,
};
use crate::viewer::ViewerSession;

/// Error type for state initialization
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("Failed to load samples manifest: {0}")]
    Manifest(anyhow::Error),

    #[error("Invalid lookup URL: {0}")]
    LookupUrl(anyhow::Error),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    registry: SampleRegistry,
    docs: DocsDirFetcher,
    session: ViewerSession,
}

impl AppState {
    /// Create the application state from configuration
    ///
    /// The viewer resolves samples through the in-process registry and reads
    /// them from the docs directory, unless a remote lookup URL is configured.
    pub fn new(config: Config) -> Result<Self, StateError> {
        let registry = match &config.documents.samples_manifest {
            Some(path) => SampleRegistry::from_manifest(path).map_err(StateError::Manifest)?,
            None => SampleRegistry::default(),
        };
        let docs = DocsDirFetcher::new(&config.documents.docs_dir);

        let loader = match &config.documents.lookup_url {
            Some(url) => {
                let fetcher = HttpFetcher::new(url).map_err(StateError::LookupUrl)?;
                DocumentLoader::new(Arc::new(HttpSourceLookup::new(url)), Arc::new(fetcher))
            }
            None => DocumentLoader::local(registry.clone(), docs.root()),
        };

        let session = ViewerSession::new(loader, config.viewer.decode_options());
        Ok(Self::with_parts(config, registry, docs, session))
    }

    /// Assemble state from already-built parts
    pub fn with_parts(
        config: Config,
        registry: SampleRegistry,
        docs: DocsDirFetcher,
        session: ViewerSession,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                registry,
                docs,
                session,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the sample registry answering `/get_doc_info`
    pub fn registry(&self) -> &SampleRegistry {
        &self.inner.registry
    }

    /// Get the docs directory served under `/docs/`
    pub fn docs(&self) -> &DocsDirFetcher {
        &self.inner.docs
    }

    /// Get the viewer session
    pub fn session(&self) -> &ViewerSession {
        &self.inner.session
    }
}
