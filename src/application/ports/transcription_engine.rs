use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// `content_type` is the MIME type reported by the sender, used when the
    /// audio cannot be normalized locally.
    async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("misconfigured engine: {0}")]
    Configuration(String),
}
