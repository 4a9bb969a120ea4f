use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::ModelIds;
use crate::application::ports::{GenerationOptions, LlmClient, LlmClientError};
use crate::infrastructure::auth::IamTokenProvider;

pub const WATSONX_API_VERSION: &str = "2023-05-29";

/// watsonx.ai text generation.
pub struct WatsonxClient {
    client: Client,
    tokens: Arc<IamTokenProvider>,
    endpoint: String,
    project_id: String,
    models: ModelIds,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    input: &'a str,
    model_id: &'a str,
    project_id: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    decoding_method: &'static str,
    max_new_tokens: u32,
}

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Deserialize)]
struct GenerationResult {
    generated_text: String,
}

impl WatsonxClient {
    pub fn new(
        tokens: Arc<IamTokenProvider>,
        base_url: &str,
        project_id: impl Into<String>,
        models: ModelIds,
    ) -> Self {
        let endpoint = format!(
            "{}/ml/v1/text/generation?version={}",
            base_url.trim_end_matches('/'),
            WATSONX_API_VERSION
        );
        Self {
            client: Client::new(),
            tokens,
            endpoint,
            project_id: project_id.into(),
            models,
        }
    }
}

#[async_trait]
impl LlmClient for WatsonxClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmClientError> {
        let model_id = self.models.for_role(options.role);

        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| LlmClientError::Authentication(e.to_string()))?;

        let request_body = GenerationRequest {
            input: prompt,
            model_id,
            project_id: &self.project_id,
            parameters: GenerationParameters {
                decoding_method: "greedy",
                max_new_tokens: options.max_new_tokens,
            },
        };

        tracing::debug!(model_id = %model_id, max_new_tokens = options.max_new_tokens, "Sending prompt to watsonx");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmClientError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmClientError::Authentication(body));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmClientError::ApiRequestFailed(format!(
                    "HTTP {}: {}",
                    status, body
                )));
            }
            _ => {}
        }

        let generation: GenerationResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let text = generation
            .results
            .into_iter()
            .next()
            .map(|r| r.generated_text)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty results".to_string()))?;

        tracing::debug!(chars = text.len(), "watsonx generation completed");

        Ok(text)
    }
}
