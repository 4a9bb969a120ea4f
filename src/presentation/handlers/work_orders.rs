use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::tools::failure;
use crate::application::ports::LlmClient;
use crate::domain::WorkOrderId;
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn work_order_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Path(work_order_id): Path<String>,
) -> Response {
    let id = match WorkOrderId::from_str(&work_order_id) {
        Ok(id) => id,
        Err(_) => {
            return failure(
                StatusCode::BAD_REQUEST,
                format!("Invalid work order ID: {}", work_order_id),
            );
        }
    };

    match state.work_order_service.get(&id).await {
        Ok(Some(work_order)) => (StatusCode::OK, Json(work_order)).into_response(),
        Ok(None) => failure(
            StatusCode::NOT_FOUND,
            format!("Work order not found: {}", work_order_id),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch work order");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch work order: {}", e),
            )
        }
    }
}
