use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::audio_decoder::prepare_for_recognition;
use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::infrastructure::auth::IamTokenProvider;

pub const DEFAULT_RECOGNITION_MODEL: &str = "en-US_BroadbandModel";

/// IBM Watson Speech to Text, synchronous `recognize` call.
pub struct WatsonSpeechEngine {
    client: Client,
    tokens: Arc<IamTokenProvider>,
    service_url: String,
    model: String,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    results: Vec<RecognizeResult>,
}

#[derive(Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Deserialize)]
struct Alternative {
    transcript: String,
}

impl WatsonSpeechEngine {
    pub fn new(tokens: Arc<IamTokenProvider>, service_url: &str, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            tokens,
            service_url: service_url.trim_end_matches('/').to_string(),
            model: model.unwrap_or_else(|| DEFAULT_RECOGNITION_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for WatsonSpeechEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
    ) -> Result<String, TranscriptionError> {
        let audio = prepare_for_recognition(audio_data, content_type);

        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| TranscriptionError::Authentication(e.to_string()))?;

        tracing::debug!(
            model = %self.model,
            content_type = %audio.content_type,
            bytes = audio.data.len(),
            "Sending audio to Watson Speech to Text"
        );

        let response = self
            .client
            .post(format!("{}/v1/recognize", self.service_url))
            .query(&[("model", self.model.as_str())])
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, &audio.content_type)
            .body(audio.data)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(TranscriptionError::Authentication(body));
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(TranscriptionError::TranscriptionFailed(format!(
                    "status {}: {}",
                    status, body
                )));
            }
        }

        let recognized: RecognizeResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::TranscriptionFailed(format!("body: {}", e)))?;

        let transcript = join_transcripts(recognized);

        tracing::info!(chars = transcript.len(), "Watson transcription completed");

        Ok(transcript)
    }
}

fn join_transcripts(response: RecognizeResponse) -> String {
    response
        .results
        .into_iter()
        .filter_map(|r| r.alternatives.into_iter().next())
        .map(|a| a.transcript.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
