use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use civicbridge::application::ports::{OrchestratorClient, PdfRenderer, WeatherProvider};
use civicbridge::application::services::{MessageDispatcher, TranscriptSource};
use civicbridge::infrastructure::audio::TranscriptionEngineFactory;
use civicbridge::infrastructure::auth::IamTokenProvider;
use civicbridge::infrastructure::llm::LlmClientFactory;
use civicbridge::infrastructure::messaging::TwilioMediaFetcher;
use civicbridge::infrastructure::observability::{TracingConfig, init_tracing};
use civicbridge::infrastructure::orchestrate::{OrchestrateCredentials, WatsonOrchestrateClient};
use civicbridge::infrastructure::pdf::WorkOrderPdfRenderer;
use civicbridge::infrastructure::persistence::WorkOrderRepositoryFactory;
use civicbridge::infrastructure::storage::ReportStoreFactory;
use civicbridge::infrastructure::weather::OpenWeatherClient;
use civicbridge::presentation::config::{OrchestrateSettings, Settings};
use civicbridge::presentation::{AppState, Environment, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        settings.server.port,
    );

    settings.validate()?;

    let llm_client = LlmClientFactory::create(&settings.llm, &settings.iam)?;

    let transcript_source = match settings.speech.stub_transcript.clone() {
        Some(text) => {
            tracing::warn!("Speech-to-text disabled, voice notes use a fixed transcript");
            TranscriptSource::Fixed(text)
        }
        None => TranscriptSource::SpeechToText(TranscriptionEngineFactory::create(
            &settings.speech,
            &settings.iam,
        )?),
    };

    let media_fetcher = Arc::new(TwilioMediaFetcher::new(
        settings.twilio.account_sid.clone().unwrap_or_default(),
        settings.twilio.auth_token.clone().unwrap_or_default(),
    )?);

    let orchestrator = build_orchestrator(&settings.orchestrate, settings.iam.token_url.clone());
    if orchestrator.is_none() {
        tracing::warn!("Orchestrate relay not configured, voice notes are only transcribed");
    }

    let message_dispatcher = Arc::new(MessageDispatcher::new(
        media_fetcher,
        transcript_source,
        orchestrator,
    ));

    let weather_provider: Arc<dyn WeatherProvider> = Arc::new(OpenWeatherClient::new(
        settings.weather.api_key.clone().unwrap_or_default(),
        &settings.weather.base_url,
    ));
    let work_order_repository = WorkOrderRepositoryFactory::create(&settings.work_orders)?;
    let report_store = ReportStoreFactory::create(&settings.storage)?;
    let pdf_renderer: Arc<dyn PdfRenderer> = Arc::new(WorkOrderPdfRenderer::new());

    let state = AppState::new(
        llm_client,
        message_dispatcher,
        weather_provider,
        work_order_repository,
        report_store,
        pdf_renderer,
    );

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn build_orchestrator(
    settings: &OrchestrateSettings,
    token_url: Option<String>,
) -> Option<Arc<dyn OrchestratorClient>> {
    if !settings.is_configured() {
        return None;
    }

    let credentials = match (&settings.api_key, &settings.bearer_token) {
        (Some(key), _) if !key.trim().is_empty() => {
            OrchestrateCredentials::Iam(Arc::new(IamTokenProvider::new(key.clone(), token_url)))
        }
        (_, Some(token)) => OrchestrateCredentials::Bearer(token.clone()),
        _ => return None,
    };

    let client = WatsonOrchestrateClient::new(
        settings.base_url.as_deref()?,
        settings.instance_id.as_deref()?,
        settings.orchestration_id.as_deref()?,
        credentials,
    );
    Some(Arc::new(client))
}
