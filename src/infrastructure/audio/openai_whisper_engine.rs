use async_trait::async_trait;
use reqwest::multipart;

use super::audio_decoder::prepare_for_recognition;
use crate::application::ports::{TranscriptionEngine, TranscriptionError};

pub const OPENAI_WHISPER_MODEL: &str = "whisper-1";

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| OPENAI_WHISPER_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
    ) -> Result<String, TranscriptionError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let audio = prepare_for_recognition(audio_data, content_type);

        let file_part = multipart::Part::bytes(audio.data)
            .file_name(file_name_for(&audio.content_type))
            .mime_str(&audio.content_type)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::TranscriptionFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(
            chars = transcript.len(),
            "Whisper transcription completed"
        );

        Ok(transcript.trim().to_string())
    }
}

fn file_name_for(content_type: &str) -> &'static str {
    match content_type {
        "audio/ogg" => "voice.ogg",
        "audio/mpeg" => "voice.mp3",
        "audio/mp4" | "audio/aac" => "voice.m4a",
        "audio/amr" => "voice.amr",
        _ => "voice.wav",
    }
}
