use std::io;

use bytes::Bytes;

use crate::domain::StoragePath;

/// Object storage for rendered documents.
#[async_trait::async_trait]
pub trait ReportStore: Send + Sync {
    async fn store(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<u64, ReportStoreError>;

    /// Like [`ReportStore::store`], but fails with
    /// [`ReportStoreError::AlreadyExists`] instead of replacing an object.
    async fn create(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<u64, ReportStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ReportStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), ReportStoreError>;

    /// URL under which a stored object is publicly readable.
    fn public_url(&self, path: &StoragePath) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum ReportStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object already exists: {0}")]
    AlreadyExists(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("misconfigured store: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
