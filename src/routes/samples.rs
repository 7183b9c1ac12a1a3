//! Sample document lookup and file serving
//!
//! `POST /get_doc_info` maps a sample name to its `/docs/{file}` location;
//! `GET /docs/{file}` serves the bytes.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};

use crate::error::{AppError, Result};
use crate::loader::{sample_file_name, DocInfoRequest, DocInfoResponse};
use crate::state::AppState;

/// Create the samples router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/get_doc_info", post(get_doc_info))
        .route("/docs/:file", get(serve_doc))
}

/// Resolve a sample name; unknown names answer 404 with an `error` payload
async fn get_doc_info(
    State(state): State<AppState>,
    Json(request): Json<DocInfoRequest>,
) -> (StatusCode, Json<DocInfoResponse>) {
    let response = state.registry().doc_info(&request.doc_name);
    let status = if response.error.is_some() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };

    tracing::debug!("Lookup '{}' -> {:?}", request.doc_name, response);
    (status, Json(response))
}

/// Serve a sample file from the docs directory
async fn serve_doc(State(state): State<AppState>, Path(file): Path<String>) -> Result<Response> {
    let name = sample_file_name(&file)
        .ok_or_else(|| AppError::NotFound(format!("Document not found: {}", file)))?;
    let path = state.docs().root().join(name);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("Document not found: {}", name)))
        }
        Err(e) => return Err(e.into()),
    };

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type.as_ref())
        .header(header::CONTENT_LENGTH, bytes.len())
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", name),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.to_string()))
}
