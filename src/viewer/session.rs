//! Shared viewer session
//!
//! [`ViewerSession`] wires loader, adapters, Navigator and ViewSync together.
//! The session lock is released while a document is looked up, fetched and
//! decoded, so a newer load can start meanwhile; the older one then completes
//! as superseded. Renders run with the lock held, one at a time.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::document::{DocumentError, DocumentResult};
use crate::formats::{self, DecodeOptions};
use crate::loader::{DocumentLoader, SourceDescriptor};

use super::navigator::{
    LoadToken, LoadedDocument, NavigationOutcome, NavigationState, Navigator,
};
use super::view::{ViewModel, ViewSync};

/// Navigation event from the display surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Jump to a page number (quick links)
    GoTo(usize),
    /// Jump to whatever the user typed in the page input
    Input(String),
    Next,
    Previous,
    Refresh,
}

struct SessionState {
    navigator: Navigator,
    view: ViewSync,
}

struct SessionInner {
    loader: DocumentLoader,
    options: DecodeOptions,
    state: Mutex<SessionState>,
}

/// Cloneable handle to one viewer
#[derive(Clone)]
pub struct ViewerSession {
    inner: Arc<SessionInner>,
}

impl ViewerSession {
    pub fn new(loader: DocumentLoader, options: DecodeOptions) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                loader,
                options,
                state: Mutex::new(SessionState {
                    navigator: Navigator::new(),
                    view: ViewSync::new(),
                }),
            }),
        }
    }

    /// Load a document and return the resulting view
    ///
    /// If another load begins before this one finishes, this one's result is
    /// discarded and the returned view reflects the newer load. The load runs
    /// on its own task, so dropping the returned future (a client hanging up)
    /// still leaves the session on a loaded document or an error.
    pub async fn load(&self, source: SourceDescriptor) -> ViewModel {
        let name = source.display_name().to_string();
        let message = match source {
            SourceDescriptor::Sample { .. } => "Loading document...",
            SourceDescriptor::Upload { .. } => "Loading uploaded document...",
        };

        let token = {
            let mut state = self.inner.state.lock().await;
            let token = state.navigator.begin_load();
            state.view.loading(message);
            token
        };
        tracing::info!("Load {} started for '{}'", token.value(), name);

        let task = tokio::spawn({
            let session = self.clone();
            let name = name.clone();
            async move {
                let result = session.acquire(source).await;
                session.finish_load(token, &name, result).await
            }
        });

        match task.await {
            Ok(model) => model,
            Err(e) => {
                let error = DocumentError::Fetch(format!("Load interrupted: {}", e));
                self.finish_load(token, &name, Err(error)).await
            }
        }
    }

    /// Hand a load result to the Navigator and refresh the view
    async fn finish_load(
        &self,
        token: LoadToken,
        name: &str,
        result: DocumentResult<LoadedDocument>,
    ) -> ViewModel {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;
        let outcome = state.navigator.complete_load(token, result).await;
        match &outcome {
            NavigationOutcome::Superseded => {
                tracing::warn!("Load {} for '{}' superseded", token.value(), name)
            }
            NavigationOutcome::LoadFailed(e) => {
                tracing::warn!("Load {} for '{}' failed: {}", token.value(), name, e)
            }
            _ => tracing::info!("Load {} for '{}' complete", token.value(), name),
        }
        state.view.apply(&outcome, &state.navigator);
        state.view.model().clone()
    }

    /// Lookup, fetch and decode, all without the session lock
    async fn acquire(&self, source: SourceDescriptor) -> DocumentResult<LoadedDocument> {
        let loaded = self.inner.loader.load(source).await?;
        let adapter =
            formats::decode_blocking(loaded.format, loaded.bytes, self.inner.options).await?;
        Ok(LoadedDocument::new(loaded.display_name, adapter))
    }

    /// Apply a navigation event and return the resulting view
    pub async fn navigate(&self, request: NavigationRequest) -> ViewModel {
        let mut guard = self.inner.state.lock().await;
        let state = &mut *guard;

        let outcome = match &request {
            NavigationRequest::GoTo(page) => state.navigator.go_to(*page).await,
            NavigationRequest::Input(input) => state.navigator.go_to_input(input).await,
            NavigationRequest::Next => state.navigator.next().await,
            NavigationRequest::Previous => state.navigator.previous().await,
            NavigationRequest::Refresh => state.navigator.refresh().await,
        };
        match &outcome {
            NavigationOutcome::Ignored => tracing::debug!("Ignored {:?}", request),
            NavigationOutcome::RenderFailed(e) => tracing::warn!("{:?} failed: {}", request, e),
            _ => tracing::debug!("{:?} -> {:?}", request, state.navigator.state()),
        }

        state.view.apply(&outcome, &state.navigator);
        state.view.model().clone()
    }

    /// Current view
    pub async fn snapshot(&self) -> ViewModel {
        self.inner.state.lock().await.view.model().clone()
    }

    pub async fn state(&self) -> NavigationState {
        self.inner.state.lock().await.navigator.state()
    }
}
