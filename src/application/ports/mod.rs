mod llm_client;
mod media_fetcher;
mod orchestrator_client;
mod pdf_renderer;
mod report_store;
mod repository_error;
mod transcription_engine;
mod weather_provider;
mod work_order_repository;

pub use llm_client::{GenerationOptions, LlmClient, LlmClientError, ModelRole};
pub use media_fetcher::{FetchedMedia, MediaFetchError, MediaFetcher};
pub use orchestrator_client::{OrchestratorClient, OrchestratorError};
pub use pdf_renderer::{PdfRenderError, PdfRenderer};
pub use report_store::{ReportStore, ReportStoreError};
pub use repository_error::RepositoryError;
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
pub use weather_provider::{WeatherError, WeatherProvider};
pub use work_order_repository::WorkOrderRepository;
