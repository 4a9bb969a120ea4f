use std::sync::Arc;

use crate::application::ports::{
    MediaFetchError, MediaFetcher, OrchestratorClient, TranscriptionEngine,
};
use crate::domain::{InboundMessage, MediaKind, MessagingReply};
use crate::infrastructure::observability::sanitize_prompt;

pub const GREETING: &str = "Welcome to CivicBridge AI! If you have any questions or encounter any issues, feel free to let me know.";
pub const IMAGE_ACKNOWLEDGEMENT: &str = "Image received";
pub const RELAY_FAILURE: &str = "Could not process with Watson Orchestrate";

/// How a voice note becomes text before it is relayed.
#[derive(Clone)]
pub enum TranscriptSource {
    SpeechToText(Arc<dyn TranscriptionEngine>),
    /// Skip speech-to-text and use a fixed transcript. The media is still fetched.
    Fixed(String),
}

/// Entry point for webhook messages. Every outcome, failures included,
/// becomes reply text; nothing is retried.
pub struct MessageDispatcher {
    media_fetcher: Arc<dyn MediaFetcher>,
    transcript_source: TranscriptSource,
    orchestrator: Option<Arc<dyn OrchestratorClient>>,
}

impl MessageDispatcher {
    pub fn new(
        media_fetcher: Arc<dyn MediaFetcher>,
        transcript_source: TranscriptSource,
        orchestrator: Option<Arc<dyn OrchestratorClient>>,
    ) -> Self {
        Self {
            media_fetcher,
            transcript_source,
            orchestrator,
        }
    }

    #[tracing::instrument(skip(self, message), fields(num_media = message.num_media))]
    pub async fn dispatch(&self, message: &InboundMessage) -> MessagingReply {
        match message.media_kind() {
            MediaKind::None => {
                tracing::debug!(body = %sanitize_prompt(&message.body), "Text message, greeting");
                MessagingReply::message(GREETING)
            }
            MediaKind::Image => MessagingReply::message(IMAGE_ACKNOWLEDGEMENT),
            MediaKind::Audio { url, content_type } => {
                MessagingReply::message(self.handle_audio(url, content_type).await)
            }
            MediaKind::Unsupported(content_type) => {
                tracing::info!(content_type = %content_type, "Ignoring unsupported media");
                MessagingReply::empty()
            }
        }
    }

    async fn handle_audio(&self, url: &str, content_type: &str) -> String {
        let media = match self.media_fetcher.fetch(url).await {
            Ok(media) => media,
            Err(MediaFetchError::UnexpectedStatus(status)) => {
                tracing::warn!(status, "Media fetch rejected");
                return format!("Failed to fetch media: HTTP {}", status);
            }
            Err(e) => {
                tracing::error!(error = %e, "Media fetch failed");
                return format!("Failed to fetch media: {}", e);
            }
        };

        let transcription = match &self.transcript_source {
            TranscriptSource::Fixed(text) => text.clone(),
            TranscriptSource::SpeechToText(engine) => {
                let content_type = Some(content_type)
                    .filter(|t| !t.is_empty())
                    .or(media.content_type.as_deref())
                    .unwrap_or_default();
                match engine.transcribe(&media.data, content_type).await {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "Transcription failed");
                        return format!("Failed to transcribe audio: {}", e);
                    }
                }
            }
        };

        tracing::info!(transcript = %sanitize_prompt(&transcription), "Voice note transcribed");

        let Some(orchestrator) = &self.orchestrator else {
            return format!("Transcription: {}", transcription);
        };

        match orchestrator.send_message(&transcription).await {
            Ok(response) => format!("Transcription: {}\n\nResponse: {}", transcription, response),
            Err(e) => {
                tracing::error!(error = %e, "Orchestration relay failed");
                format!("Transcription: {}\n\nError: {}", transcription, RELAY_FAILURE)
            }
        }
    }
}
