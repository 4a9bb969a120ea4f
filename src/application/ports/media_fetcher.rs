use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct FetchedMedia {
    pub data: Bytes,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedMedia, MediaFetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaFetchError {
    #[error("HTTP {0}")]
    UnexpectedStatus(u16),
    #[error("request failed: {0}")]
    RequestFailed(String),
}
