mod issue_extractor;
mod message_dispatcher;
mod query_classifier;
mod structured_output;
mod weather_service;
mod work_order_composer;
mod work_order_service;

pub use issue_extractor::{IssueExtractionError, IssueExtractor, fallback_extraction};
pub use message_dispatcher::{
    GREETING, IMAGE_ACKNOWLEDGEMENT, MessageDispatcher, RELAY_FAILURE, TranscriptSource,
};
pub use query_classifier::{ClassificationError, QueryClassifier};
pub use structured_output::{
    StructuredOutputError, json_object_span, parse_lenient, schema_instructions,
};
pub use weather_service::{WeatherService, WeatherServiceError};
pub use work_order_composer::{ComposeError, WorkOrderComposer};
pub use work_order_service::{PdfArtifact, WorkOrderError, WorkOrderService, fields_from_markdown};
