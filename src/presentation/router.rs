use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    draft_work_order_handler, file_handler, generate_pdf_handler, health_handler,
    issue_details_handler, persist_work_order_handler, query_type_handler,
    weather_forecast_handler, weather_report_handler, weather_summary_handler, whatsapp_handler,
    work_order_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let tools = Router::new()
        .route("/query-type", post(query_type_handler::<L>))
        .route("/issue-details", post(issue_details_handler::<L>))
        .route("/weather/forecast", post(weather_forecast_handler::<L>))
        .route("/weather/summary", post(weather_summary_handler::<L>))
        .route("/weather/report", post(weather_report_handler::<L>))
        .route("/work-orders/draft", post(draft_work_order_handler::<L>))
        .route("/work-orders", post(persist_work_order_handler::<L>))
        .route("/work-orders/pdf", post(generate_pdf_handler::<L>));

    Router::new()
        .route("/health", get(health_handler))
        .route("/whatsapp", post(whatsapp_handler::<L>))
        .route("/files/{*path}", get(file_handler::<L>))
        .route(
            "/api/v1/work-orders/{work_order_id}",
            get(work_order_handler::<L>),
        )
        .nest("/api/v1/tools", tools)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
