use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::ports::{LlmClient, ReportStoreError};
use crate::domain::StoragePath;
use crate::presentation::state::AppState;

/// Serves objects of the local report store.
#[tracing::instrument(skip(state))]
pub async fn file_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Path(path): Path<String>,
) -> Response {
    let path = StoragePath::from_raw(path);
    if !path.is_safe() {
        return StatusCode::BAD_REQUEST.into_response();
    }

    match state.report_store.fetch(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(path.as_str()))],
            bytes,
        )
            .into_response(),
        Err(ReportStoreError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read stored file");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}
