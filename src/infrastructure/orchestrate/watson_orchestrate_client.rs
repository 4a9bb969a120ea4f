use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use crate::application::ports::{OrchestratorClient, OrchestratorError};
use crate::infrastructure::auth::IamTokenProvider;
use crate::infrastructure::observability::sanitize_prompt;

pub enum OrchestrateCredentials {
    /// Pre-issued bearer token, used as is.
    Bearer(String),
    Iam(Arc<IamTokenProvider>),
}

/// watsonx Orchestrate chat completions for one orchestration.
pub struct WatsonOrchestrateClient {
    client: Client,
    endpoint: String,
    credentials: OrchestrateCredentials,
}

impl WatsonOrchestrateClient {
    pub fn new(
        base_url: &str,
        instance_id: &str,
        orchestration_id: &str,
        credentials: OrchestrateCredentials,
    ) -> Self {
        let endpoint = format!(
            "{}/instances/{}/v1/orchestrate/{}/chat/completions",
            base_url.trim_end_matches('/'),
            instance_id,
            orchestration_id
        );
        Self {
            client: Client::new(),
            endpoint,
            credentials,
        }
    }

    async fn bearer_token(&self) -> Result<String, OrchestratorError> {
        match &self.credentials {
            OrchestrateCredentials::Bearer(token) => Ok(token.clone()),
            OrchestrateCredentials::Iam(tokens) => tokens
                .access_token()
                .await
                .map_err(|e| OrchestratorError::Authentication(e.to_string())),
        }
    }
}

#[async_trait]
impl OrchestratorClient for WatsonOrchestrateClient {
    async fn send_message(&self, text: &str) -> Result<String, OrchestratorError> {
        let payload = json!({
            "messages": [{
                "role": "user",
                "content": [{
                    "response_type": "text",
                    "text": text,
                    "channels": [{ "channel": "chat" }]
                }]
            }]
        });

        let token = self.bearer_token().await?;

        tracing::info!(text = %sanitize_prompt(text), "Relaying message to Orchestrate");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| OrchestratorError::ApiRequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(OrchestratorError::Authentication(body));
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status = %status, body = %sanitize_prompt(&body), "Orchestrate returned an error");
                return Err(OrchestratorError::ApiRequestFailed(format!(
                    "HTTP {}",
                    status.as_u16()
                )));
            }
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| OrchestratorError::InvalidResponse(e.to_string()))?;

        Ok(reply_text(&body))
    }
}

/// First choice's message content, else a top-level `content`, else the
/// whole body serialized.
pub fn reply_text(body: &Value) -> String {
    let content = body
        .pointer("/choices/0/message/content")
        .or_else(|| body.get("content"));

    match content {
        Some(Value::String(text)) => text.clone(),
        Some(other) if !other.is_null() => other.to_string(),
        _ => body.to_string(),
    }
}
