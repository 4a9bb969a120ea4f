use std::sync::Arc;

use crate::application::ports::LlmClient;
use crate::infrastructure::auth::IamTokenProvider;
use crate::presentation::config::{DEFAULT_WATSONX_URL, IamSettings, LlmProvider, LlmSettings};

use super::{ModelIds, OpenAiClient, WatsonxClient};

pub struct LlmClientFactory;

#[derive(Debug, thiserror::Error)]
pub enum LlmClientFactoryError {
    #[error("missing API key: {0} requires llm.api_key")]
    MissingApiKey(&'static str),
    #[error("missing project id: watsonx requires llm.project_id")]
    MissingProjectId,
}

impl LlmClientFactory {
    pub fn create(
        settings: &LlmSettings,
        iam: &IamSettings,
    ) -> Result<Arc<dyn LlmClient>, LlmClientFactoryError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty());
        let models = ModelIds {
            extraction: settings.extraction_model.clone(),
            generation: settings.generation_model.clone(),
        };

        match settings.provider {
            LlmProvider::Watsonx => {
                let key = api_key.ok_or(LlmClientFactoryError::MissingApiKey("watsonx"))?;
                let project_id = settings
                    .project_id
                    .clone()
                    .filter(|p| !p.trim().is_empty())
                    .ok_or(LlmClientFactoryError::MissingProjectId)?;
                let base_url = settings.base_url.as_deref().unwrap_or(DEFAULT_WATSONX_URL);

                tracing::info!(
                    base_url = %base_url,
                    extraction_model = %models.extraction,
                    generation_model = %models.generation,
                    "Using watsonx.ai text generation"
                );
                let tokens = Arc::new(IamTokenProvider::new(key, iam.token_url.clone()));
                Ok(Arc::new(WatsonxClient::new(
                    tokens, base_url, project_id, models,
                )))
            }
            LlmProvider::OpenAi => {
                let key = api_key.ok_or(LlmClientFactoryError::MissingApiKey("openai"))?;
                tracing::info!(generation_model = %models.generation, "Using OpenAI-compatible chat completions");
                Ok(Arc::new(OpenAiClient::new(
                    key,
                    settings.base_url.clone(),
                    models,
                )))
            }
        }
    }
}
