use async_trait::async_trait;

/// Hosted conversational agent that takes over once a message is text.
#[async_trait]
pub trait OrchestratorClient: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<String, OrchestratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
