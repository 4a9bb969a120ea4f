use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, ReportStoreError, RepositoryError, WeatherError};
use crate::application::services::{WeatherServiceError, WorkOrderError};
use crate::domain::{IssueDetails, WorkOrder};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Deserialize)]
pub struct CityRequest {
    pub city: String,
}

#[derive(Deserialize)]
pub struct DraftWorkOrderRequest {
    pub issue_type: String,
    pub location: String,
    #[serde(default)]
    pub issue_description: Option<String>,
    #[serde(default)]
    pub weather_details: Option<String>,
}

#[derive(Deserialize)]
pub struct WorkOrderMarkdownRequest {
    pub work_order_markdown: String,
    #[serde(default)]
    pub work_order_id: Option<String>,
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Serialize)]
pub struct ReportResponse {
    pub lines: Vec<String>,
}

#[derive(Serialize)]
pub struct DraftResponse {
    pub work_order: String,
}

#[derive(Serialize)]
pub struct PersistResponse {
    pub success: bool,
    pub message: String,
    pub work_order: WorkOrder,
}

#[derive(Serialize)]
pub struct PdfResponse {
    pub success: bool,
    pub message: String,
    pub pdf_url: String,
    pub filename: String,
}

#[derive(Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub message: String,
}

pub(super) fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(FailureResponse {
            success: false,
            message: message.into(),
        }),
    )
        .into_response()
}

fn require(value: &str, field: &str) -> Result<(), Response> {
    if value.trim().is_empty() {
        return Err(failure(
            StatusCode::BAD_REQUEST,
            format!("{} must not be empty", field),
        ));
    }
    Ok(())
}

fn weather_failure(e: WeatherServiceError) -> Response {
    tracing::error!(error = %e, "Weather tool failed");
    let status = match &e {
        WeatherServiceError::Weather(WeatherError::Upstream(_)) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match e {
        WeatherServiceError::Weather(inner) => inner.to_string(),
        other => format!("Weather tool error: {}", other),
    };
    failure(status, message)
}

fn work_order_failure(context: &str, e: WorkOrderError) -> Response {
    tracing::error!(error = %e, "{}", context);
    let status = match &e {
        WorkOrderError::EmptyWorkOrder | WorkOrderError::InvalidId(_) => StatusCode::BAD_REQUEST,
        WorkOrderError::Storage(ReportStoreError::AlreadyExists(_))
        | WorkOrderError::Repository(RepositoryError::AlreadyExists(_)) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    failure(status, format!("{}: {}", context, e))
}

#[tracing::instrument(skip(state, request))]
pub async fn query_type_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    if let Err(response) = require(&request.query, "query") {
        return response;
    }
    tracing::debug!(query = %sanitize_prompt(&request.query), "Classifying query");

    match state.query_classifier.classify(&request.query).await {
        Ok(classification) => (StatusCode::OK, Json(classification)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Query classification failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Query classification failed: {}", e),
            )
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn issue_details_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    if let Err(response) = require(&request.query, "query") {
        return response;
    }

    match state.issue_extractor.extract(&request.query).await {
        Ok(details) => (StatusCode::OK, Json::<IssueDetails>(details)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Issue extraction failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Issue extraction failed: {}", e),
            )
        }
    }
}

#[tracing::instrument(skip(state, request), fields(city = %request.city))]
pub async fn weather_forecast_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<CityRequest>,
) -> Response {
    if let Err(response) = require(&request.city, "city") {
        return response;
    }

    match state.weather_service.forecast(request.city.trim()).await {
        Ok(forecast) => (StatusCode::OK, Json(forecast)).into_response(),
        Err(e) => weather_failure(e),
    }
}

#[tracing::instrument(skip(state, request), fields(city = %request.city))]
pub async fn weather_summary_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<CityRequest>,
) -> Response {
    if let Err(response) = require(&request.city, "city") {
        return response;
    }

    match state.weather_service.summarize(request.city.trim()).await {
        Ok(summary) => (StatusCode::OK, Json(SummaryResponse { summary })).into_response(),
        Err(e) => weather_failure(e),
    }
}

#[tracing::instrument(skip(state, request), fields(city = %request.city))]
pub async fn weather_report_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<CityRequest>,
) -> Response {
    if let Err(response) = require(&request.city, "city") {
        return response;
    }

    match state.weather_service.report(request.city.trim()).await {
        Ok(lines) => (StatusCode::OK, Json(ReportResponse { lines })).into_response(),
        Err(e) => weather_failure(e),
    }
}

#[tracing::instrument(skip(state, request), fields(issue_type = %request.issue_type))]
pub async fn draft_work_order_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<DraftWorkOrderRequest>,
) -> Response {
    if let Err(response) = require(&request.issue_type, "issue_type") {
        return response;
    }

    let issue = IssueDetails::new(
        request.issue_type,
        request.location,
        request.issue_description.filter(|d| !d.trim().is_empty()),
    );
    let weather_details = request.weather_details.unwrap_or_default();

    match state
        .work_order_composer
        .compose(&issue, &weather_details)
        .await
    {
        Ok(work_order) => (StatusCode::OK, Json(DraftResponse { work_order })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Work order drafting failed");
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Work order drafting failed: {}", e),
            )
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn persist_work_order_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<WorkOrderMarkdownRequest>,
) -> Response {
    match state
        .work_order_service
        .persist(&request.work_order_markdown)
        .await
    {
        Ok(work_order) => (
            StatusCode::CREATED,
            Json(PersistResponse {
                success: true,
                message: format!("Work order {} persisted successfully", work_order.id),
                work_order,
            }),
        )
            .into_response(),
        Err(e) => work_order_failure("Failed to persist work order", e),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn generate_pdf_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Json(request): Json<WorkOrderMarkdownRequest>,
) -> Response {
    match state
        .work_order_service
        .generate_pdf(
            &request.work_order_markdown,
            request.work_order_id.as_deref(),
        )
        .await
    {
        Ok(artifact) => (
            StatusCode::OK,
            Json(PdfResponse {
                success: true,
                message: "PDF generated and uploaded successfully".to_string(),
                pdf_url: artifact.pdf_url,
                filename: artifact.filename,
            }),
        )
            .into_response(),
        Err(e) => work_order_failure("Failed to generate and upload PDF", e),
    }
}
