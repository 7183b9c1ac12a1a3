//! Display surface synchronization
//!
//! [`ViewSync`] keeps a serializable [`ViewModel`] consistent with the
//! Navigator after every outcome. It never mutates navigation state.

use serde::Serialize;

use crate::document::DocumentFormat;

use super::navigator::{NavigationOutcome, NavigationState, Navigator};

/// What the viewer container currently shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewContent {
    Blank,
    Loading { message: String },
    Page { kind: String, html: String },
    Error { message: String },
}

/// Enablement of the navigation controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    /// Page-jump input and its submit button
    pub page_input_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_input_max: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_input_value: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    pub page: usize,
    pub label: String,
    pub active: bool,
}

/// Quick navigation: one link per page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    pub heading: String,
    pub links: Vec<PageLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLine {
    pub level: StatusLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentInfo {
    pub name: String,
    pub format: DocumentFormat,
    /// "{Unit} {current} of {count}"
    pub summary: String,
}

/// Snapshot of everything the display surface shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub content: ViewContent,
    pub controls: Controls,
    pub page_links: Option<PageLinks>,
    pub status: Option<StatusLine>,
    pub document_info: Option<DocumentInfo>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            content: ViewContent::Blank,
            controls: Controls::default(),
            page_links: None,
            status: None,
            document_info: None,
        }
    }
}

/// Applies Navigator outcomes to the view model
#[derive(Debug, Default)]
pub struct ViewSync {
    model: ViewModel,
}

impl ViewSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &ViewModel {
        &self.model
    }

    /// Show the loading indicator; controls are disabled until the load ends
    pub fn loading(&mut self, message: &str) {
        self.model = ViewModel {
            content: ViewContent::Loading {
                message: message.to_string(),
            },
            status: Some(StatusLine {
                level: StatusLevel::Info,
                message: message.to_string(),
            }),
            ..ViewModel::default()
        };
    }

    /// Repaint after `outcome`; `navigator` is the state after the transition
    pub fn apply(&mut self, outcome: &NavigationOutcome, navigator: &Navigator) {
        match outcome {
            NavigationOutcome::Loaded(view) => {
                self.paint(view.kind(), view.to_html());
                self.sync(navigator);
                self.status(StatusLevel::Success, "Document loaded successfully!".into());
            }
            NavigationOutcome::Navigated(view) => {
                self.paint(view.kind(), view.to_html());
                self.sync(navigator);
                if let (Some(format), Some(page)) = (navigator.format(), navigator.current_page()) {
                    self.status(
                        StatusLevel::Success,
                        format!("Navigated to {} {}", format.unit_noun(), page),
                    );
                }
            }
            NavigationOutcome::LoadFailed(error) => {
                let message = error.to_string();
                self.model.content = ViewContent::Error {
                    message: message.clone(),
                };
                self.sync(navigator);
                self.status(StatusLevel::Error, format!("Error: {}", message));
            }
            NavigationOutcome::RenderFailed(error) => {
                self.sync(navigator);
                self.status(StatusLevel::Error, format!("Error: {}", error));
            }
            NavigationOutcome::Ignored | NavigationOutcome::Superseded => {}
        }
    }

    fn paint(&mut self, kind: &str, html: String) {
        self.model.content = ViewContent::Page {
            kind: kind.to_string(),
            html,
        };
    }

    fn status(&mut self, level: StatusLevel, message: String) {
        self.model.status = Some(StatusLine { level, message });
    }

    /// Recompute controls, quick links and document info from the Navigator
    fn sync(&mut self, navigator: &Navigator) {
        let NavigationState::Ready {
            current_page,
            page_count,
        } = navigator.state()
        else {
            self.model.controls = Controls::default();
            self.model.page_links = None;
            self.model.document_info = None;
            return;
        };

        let format = navigator.format().unwrap_or(DocumentFormat::Pdf);

        self.model.controls = Controls {
            previous_enabled: current_page > 1,
            next_enabled: current_page < page_count,
            page_input_enabled: true,
            page_input_max: Some(page_count),
            page_input_value: Some(current_page),
        };

        self.model.page_links = (page_count > 1).then(|| PageLinks {
            heading: format!(
                "Quick Navigation - Click any {} to jump to it!",
                format.unit_noun()
            ),
            links: (1..=page_count)
                .map(|page| PageLink {
                    page,
                    label: format!("{} {}", format.unit_title(), page),
                    active: page == current_page,
                })
                .collect(),
        });

        self.model.document_info = Some(DocumentInfo {
            name: navigator.display_name().unwrap_or_default().to_string(),
            format,
            summary: format!("{} {} of {}", format.unit_title(), current_page, page_count),
        });
    }
}
