//! Pagination state machine
//!
//! The Navigator owns the active document and its current page. It is the
//! only place page bounds are enforced; adapters are never called with a page
//! outside `1..=page_count`.
//!
//! ```text
//!              begin_load                complete_load(latest, Ok) + page 1 ok
//!   Empty ◀──────────────── any ───────────────────────────────────▶ Ready(1, n)
//!     ▲                                                                  │
//!     └──── complete_load(latest, Err | 0 pages | page 1 fails) ─────────┘
//!                                                   go_to(k ∈ 1..=n) ok ─▶ Ready(k, n)
//! ```

use crate::document::{DocumentError, DocumentFormat, FormatAdapter, RenderedView};

/// Pagination state derived from the active document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Empty,
    Ready {
        current_page: usize,
        page_count: usize,
    },
}

impl NavigationState {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// Identifies one load; only the most recently issued token may complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Decoded document handed to [`Navigator::complete_load`]
pub struct LoadedDocument {
    pub display_name: String,
    pub format: DocumentFormat,
    pub adapter: Box<dyn FormatAdapter>,
}

impl LoadedDocument {
    pub fn new(display_name: impl Into<String>, adapter: Box<dyn FormatAdapter>) -> Self {
        Self {
            display_name: display_name.into(),
            format: adapter.format(),
            adapter,
        }
    }
}

impl std::fmt::Debug for LoadedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedDocument")
            .field("display_name", &self.display_name)
            .field("format", &self.format)
            .field("page_count", &self.adapter.page_count())
            .finish()
    }
}

/// Result of a Navigator transition
#[derive(Debug)]
pub enum NavigationOutcome {
    /// Load completed and page 1 was rendered
    Loaded(RenderedView),
    /// Page changed (or was re-rendered)
    Navigated(RenderedView),
    /// Load failed; state is Empty
    LoadFailed(DocumentError),
    /// Render of a valid page failed; state unchanged
    RenderFailed(DocumentError),
    /// Request was a no-op (no document, page out of range, absent input)
    Ignored,
    /// Load result arrived after a newer load began and was discarded
    Superseded,
}

struct ActiveDocument {
    display_name: String,
    format: DocumentFormat,
    adapter: Box<dyn FormatAdapter>,
    current_page: usize,
}

/// Owns the active document and enforces page bounds
#[derive(Default)]
pub struct Navigator {
    active: Option<ActiveDocument>,
    last_token: u64,
    pending: Option<LoadToken>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> NavigationState {
        match &self.active {
            Some(doc) => NavigationState::Ready {
                current_page: doc.current_page,
                page_count: doc.adapter.page_count(),
            },
            None => NavigationState::Empty,
        }
    }

    pub fn current_page(&self) -> Option<usize> {
        self.active.as_ref().map(|doc| doc.current_page)
    }

    pub fn page_count(&self) -> Option<usize> {
        self.active.as_ref().map(|doc| doc.adapter.page_count())
    }

    pub fn format(&self) -> Option<DocumentFormat> {
        self.active.as_ref().map(|doc| doc.format)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.active.as_ref().map(|doc| doc.display_name.as_str())
    }

    /// A load has begun and not yet completed
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a load: issue a fresh token and drop the active document
    pub fn begin_load(&mut self) -> LoadToken {
        self.last_token += 1;
        let token = LoadToken(self.last_token);

        if let Some(previous) = self.active.take() {
            tracing::debug!("Dropping '{}' for load {}", previous.display_name, token.0);
        }
        self.pending = Some(token);
        token
    }

    /// Finish the load identified by `token`
    ///
    /// Results for any token but the latest are discarded without touching
    /// state.
    pub async fn complete_load(
        &mut self,
        token: LoadToken,
        result: Result<LoadedDocument, DocumentError>,
    ) -> NavigationOutcome {
        if self.pending != Some(token) {
            tracing::debug!(
                "Discarding load {} (latest is {})",
                token.0,
                self.last_token
            );
            return NavigationOutcome::Superseded;
        }
        self.pending = None;

        let loaded = match result {
            Ok(loaded) => loaded,
            Err(e) => return NavigationOutcome::LoadFailed(e),
        };

        let page_count = loaded.adapter.page_count();
        if page_count == 0 {
            return NavigationOutcome::LoadFailed(DocumentError::EmptyDocument(loaded.format));
        }

        match loaded.adapter.render_page(1).await {
            Ok(view) => {
                tracing::debug!(
                    "'{}' ready with {} {}",
                    loaded.display_name,
                    page_count,
                    loaded.format.unit_plural()
                );
                self.active = Some(ActiveDocument {
                    display_name: loaded.display_name,
                    format: loaded.format,
                    adapter: loaded.adapter,
                    current_page: 1,
                });
                NavigationOutcome::Loaded(view)
            }
            Err(e) => NavigationOutcome::LoadFailed(e),
        }
    }

    /// Render page `page` and make it current
    pub async fn go_to(&mut self, page: usize) -> NavigationOutcome {
        let Some(doc) = self.active.as_mut() else {
            return NavigationOutcome::Ignored;
        };

        let page_count = doc.adapter.page_count();
        if page == 0 || page > page_count {
            tracing::debug!("Ignoring jump to {} (1..={})", page, page_count);
            return NavigationOutcome::Ignored;
        }

        match doc.adapter.render_page(page).await {
            Ok(view) => {
                doc.current_page = page;
                NavigationOutcome::Navigated(view)
            }
            Err(e) => NavigationOutcome::RenderFailed(e),
        }
    }

    /// Jump to a page typed by the user
    ///
    /// Anything that is not a plain non-negative integer is absent input.
    pub async fn go_to_input(&mut self, input: &str) -> NavigationOutcome {
        match parse_page_input(input) {
            Some(page) => self.go_to(page).await,
            None => NavigationOutcome::Ignored,
        }
    }

    pub async fn next(&mut self) -> NavigationOutcome {
        match self.current_page() {
            Some(current) => self.go_to(current + 1).await,
            None => NavigationOutcome::Ignored,
        }
    }

    pub async fn previous(&mut self) -> NavigationOutcome {
        match self.current_page() {
            Some(current) => self.go_to(current.saturating_sub(1)).await,
            None => NavigationOutcome::Ignored,
        }
    }

    /// Re-render the current page
    pub async fn refresh(&mut self) -> NavigationOutcome {
        match self.current_page() {
            Some(current) => self.go_to(current).await,
            None => NavigationOutcome::Ignored,
        }
    }
}

/// `"  3 "` → 3; `"2.5"`, `"abc"`, `""`, `"-1"` → None
pub fn parse_page_input(input: &str) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}
