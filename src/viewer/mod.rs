//! Viewer core: pagination state machine, display sync and the shared session
//!
//! - `navigator`: owns the active document, enforces page bounds, supersedes
//!   stale loads
//! - `view`: keeps the serializable view model in step with the Navigator
//! - `session`: async entry point used by the HTTP layer

mod navigator;
mod session;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use navigator::{
    parse_page_input, LoadToken, LoadedDocument, NavigationOutcome, NavigationState, Navigator,
};
pub use session::{NavigationRequest, ViewerSession};
pub use view::{
    Controls, DocumentInfo, PageLink, PageLinks, StatusLevel, StatusLine, ViewContent, ViewModel,
    ViewSync,
};
