use std::sync::Arc;

use crate::application::ports::{
    LlmClient, PdfRenderer, ReportStore, WeatherProvider, WorkOrderRepository,
};
use crate::application::services::{
    IssueExtractor, MessageDispatcher, QueryClassifier, WeatherService, WorkOrderComposer,
    WorkOrderService,
};

pub struct AppState<L: LlmClient + ?Sized> {
    pub message_dispatcher: Arc<MessageDispatcher>,
    pub query_classifier: Arc<QueryClassifier<L>>,
    pub issue_extractor: Arc<IssueExtractor<L>>,
    pub weather_service: Arc<WeatherService<L>>,
    pub work_order_composer: Arc<WorkOrderComposer<L>>,
    pub work_order_service: Arc<WorkOrderService<L>>,
    pub report_store: Arc<dyn ReportStore>,
}

impl<L: LlmClient + ?Sized> AppState<L> {
    /// Builds every service around one shared model client.
    pub fn new(
        llm_client: Arc<L>,
        message_dispatcher: Arc<MessageDispatcher>,
        weather_provider: Arc<dyn WeatherProvider>,
        work_order_repository: Arc<dyn WorkOrderRepository>,
        report_store: Arc<dyn ReportStore>,
        pdf_renderer: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            message_dispatcher,
            query_classifier: Arc::new(QueryClassifier::new(Arc::clone(&llm_client))),
            issue_extractor: Arc::new(IssueExtractor::new(Arc::clone(&llm_client))),
            weather_service: Arc::new(WeatherService::new(
                weather_provider,
                Arc::clone(&llm_client),
            )),
            work_order_composer: Arc::new(WorkOrderComposer::new(Arc::clone(&llm_client))),
            work_order_service: Arc::new(WorkOrderService::new(
                llm_client,
                work_order_repository,
                Arc::clone(&report_store),
                pdf_renderer,
            )),
            report_store,
        }
    }
}

impl<L: LlmClient + ?Sized> Clone for AppState<L> {
    fn clone(&self) -> Self {
        Self {
            message_dispatcher: Arc::clone(&self.message_dispatcher),
            query_classifier: Arc::clone(&self.query_classifier),
            issue_extractor: Arc::clone(&self.issue_extractor),
            weather_service: Arc::clone(&self.weather_service),
            work_order_composer: Arc::clone(&self.work_order_composer),
            work_order_service: Arc::clone(&self.work_order_service),
            report_store: Arc::clone(&self.report_store),
        }
    }
}
