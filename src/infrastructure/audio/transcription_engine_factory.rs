use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::infrastructure::auth::IamTokenProvider;
use crate::presentation::config::{IamSettings, SpeechProvider, SpeechSettings};

use super::openai_whisper_engine::OpenAiWhisperEngine;
use super::watson_speech_engine::WatsonSpeechEngine;

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &SpeechSettings,
        iam: &IamSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                TranscriptionError::Configuration("speech.api_key is required".to_string())
            })?;

        match settings.provider {
            SpeechProvider::Watson => {
                let service_url = settings.service_url.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration(
                        "speech.service_url is required for Watson".to_string(),
                    )
                })?;
                tracing::info!(model = %settings.model, "Using Watson Speech to Text");
                let tokens = Arc::new(IamTokenProvider::new(api_key, iam.token_url.clone()));
                let engine =
                    WatsonSpeechEngine::new(tokens, service_url, Some(settings.model.clone()));
                Ok(Arc::new(engine))
            }
            SpeechProvider::OpenAi => {
                tracing::info!("Using OpenAI-compatible Whisper transcription");
                // Watson model names mean nothing to Whisper.
                let engine =
                    OpenAiWhisperEngine::new(api_key, settings.service_url.clone(), None);
                Ok(Arc::new(engine))
            }
        }
    }
}
