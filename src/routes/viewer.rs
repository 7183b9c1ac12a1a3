//! Viewer endpoints
//!
//! JSON API under `/api/v1/viewer`, returning the view model after each
//! operation, plus the HTML page at `/` whose forms post to `/viewer/*` and
//! redirect back.
//!
//! Document failures (unknown sample, unsupported format, render errors) are
//! not HTTP errors: they show up in the returned view model.

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::loader::{DocInfoRequest, SourceDescriptor};
use crate::state::AppState;
use crate::viewer::{NavigationRequest, ViewModel};

/// JSON API router, nested under `/api/v1/viewer`
pub fn api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(snapshot))
        .route("/load", post(load))
        .route("/upload", post(upload))
        .route("/navigate", post(navigate))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// HTML page and form endpoints
pub fn page_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(page))
        .route("/viewer/load", post(load_form))
        .route("/viewer/upload", post(upload_form))
        .route("/viewer/navigate", post(navigate_form))
        .route("/viewer/page/:page", get(page_link))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigateAction {
    Goto,
    Next,
    Previous,
    Refresh,
}

/// Page target: a number from a link, or raw text from the page input
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PageTarget {
    Number(usize),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NavigateRequest {
    pub action: NavigateAction,
    #[serde(default)]
    pub page: Option<PageTarget>,
}

impl From<NavigateRequest> for NavigationRequest {
    fn from(request: NavigateRequest) -> Self {
        match request.action {
            NavigateAction::Next => NavigationRequest::Next,
            NavigateAction::Previous => NavigationRequest::Previous,
            NavigateAction::Refresh => NavigationRequest::Refresh,
            NavigateAction::Goto => match request.page {
                Some(PageTarget::Number(page)) => NavigationRequest::GoTo(page),
                Some(PageTarget::Text(text)) => NavigationRequest::Input(text),
                None => NavigationRequest::Input(String::new()),
            },
        }
    }
}

async fn snapshot(State(state): State<AppState>) -> Json<ViewModel> {
    Json(state.session().snapshot().await)
}

async fn load(
    State(state): State<AppState>,
    Json(request): Json<DocInfoRequest>,
) -> Json<ViewModel> {
    let source = SourceDescriptor::sample(request.doc_name);
    Json(state.session().load(source).await)
}

async fn upload(State(state): State<AppState>, multipart: Multipart) -> Result<Json<ViewModel>> {
    let source = read_upload(multipart).await?;
    Ok(Json(state.session().load(source).await))
}

async fn navigate(
    State(state): State<AppState>,
    Json(request): Json<NavigateRequest>,
) -> Json<ViewModel> {
    Json(state.session().navigate(request.into()).await)
}

/// Fields accepted as the uploaded document
const UPLOAD_FIELDS: [&str; 2] = ["file", "document"];

/// Pull the uploaded document out of the first accepted multipart field
async fn read_upload(mut multipart: Multipart) -> Result<SourceDescriptor> {
    loop {
        let Some(field) = multipart.next_field().await? else {
            tracing::warn!("Upload without a {:?} field", UPLOAD_FIELDS);
            return Err(AppError::BadRequest(
                "No file provided. Use field name 'file' or 'document'".to_string(),
            ));
        };

        if !field.name().is_some_and(|name| UPLOAD_FIELDS.contains(&name)) {
            tracing::debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        let file_name = field.file_name().unwrap_or("unknown").to_string();
        let bytes = field.bytes().await?;
        tracing::debug!(
            "Upload '{}': {} bytes ({:?})",
            file_name,
            bytes.len(),
            mime_guess::from_path(&file_name).first()
        );
        return Ok(SourceDescriptor::upload(file_name, bytes.to_vec()));
    }
}

async fn page(State(state): State<AppState>) -> Html<String> {
    let model = state.session().snapshot().await;
    Html(crate::html::viewer_page(state.registry().names(), &model))
}

async fn load_form(State(state): State<AppState>, Form(request): Form<DocInfoRequest>) -> Redirect {
    state
        .session()
        .load(SourceDescriptor::sample(request.doc_name))
        .await;
    Redirect::to("/")
}

async fn upload_form(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let source = read_upload(multipart).await?;
    state.session().load(source).await;
    Ok(Redirect::to("/"))
}

/// Form body of the navigation buttons; `page` is whatever was typed
#[derive(Debug, Deserialize)]
struct NavigateForm {
    action: NavigateAction,
    #[serde(default)]
    page: Option<String>,
}

async fn navigate_form(State(state): State<AppState>, Form(form): Form<NavigateForm>) -> Redirect {
    let request = NavigateRequest {
        action: form.action,
        page: form.page.map(PageTarget::Text),
    };
    state.session().navigate(request.into()).await;
    Redirect::to("/")
}

async fn page_link(State(state): State<AppState>, Path(page): Path<String>) -> Redirect {
    state
        .session()
        .navigate(NavigationRequest::Input(page))
        .await;
    Redirect::to("/")
}
