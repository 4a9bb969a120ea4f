use async_trait::async_trait;

/// Which configured model a prompt is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelRole {
    /// Short structured answers: classification and field extraction.
    Extraction,
    /// Long-form prose: work orders and forecast summaries.
    Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationOptions {
    pub role: ModelRole,
    pub max_new_tokens: u32,
}

impl GenerationOptions {
    pub fn extraction(max_new_tokens: u32) -> Self {
        Self {
            role: ModelRole::Extraction,
            max_new_tokens,
        }
    }

    pub fn generation(max_new_tokens: u32) -> Self {
        Self {
            role: ModelRole::Generation,
            max_new_tokens,
        }
    }
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
