use std::sync::Arc;

use bytes::Bytes;
use object_store::path::Path as StorePath;
use object_store::{Attribute, Attributes, ObjectStore, PutMode, PutOptions, PutPayload};

use crate::application::ports::{ReportStore, ReportStoreError};
use crate::domain::StoragePath;

/// A [`ReportStore`] over any `object_store` backend. Constructors for the
/// concrete backends live next to this file.
pub struct ObjectReportStore {
    pub(super) inner: Arc<dyn ObjectStore>,
    pub(super) public_base_url: String,
    /// Local filesystems reject object attributes.
    pub(super) supports_attributes: bool,
}

impl ObjectReportStore {
    async fn put(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
        mode: PutMode,
    ) -> Result<u64, ReportStoreError> {
        let store_path = StorePath::from(path.as_str());
        let size = data.len() as u64;

        let mut attributes = Attributes::new();
        if self.supports_attributes {
            attributes.insert(Attribute::ContentType, content_type.to_string().into());
        }
        let options = PutOptions {
            mode,
            attributes,
            ..Default::default()
        };

        self.inner
            .put_opts(&store_path, PutPayload::from(data), options)
            .await
            .map_err(|e| match e {
                object_store::Error::AlreadyExists { .. } => {
                    ReportStoreError::AlreadyExists(path.to_string())
                }
                other => ReportStoreError::UploadFailed(other.to_string()),
            })?;

        tracing::debug!(path = %path, bytes = size, "Object stored");
        Ok(size)
    }
}

#[async_trait::async_trait]
impl ReportStore for ObjectReportStore {
    async fn store(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<u64, ReportStoreError> {
        self.put(path, data, content_type, PutMode::Overwrite).await
    }

    async fn create(
        &self,
        path: &StoragePath,
        data: Bytes,
        content_type: &str,
    ) -> Result<u64, ReportStoreError> {
        self.put(path, data, content_type, PutMode::Create).await
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, ReportStoreError> {
        let store_path = StorePath::from(path.as_str());
        let result = self.inner.get(&store_path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => ReportStoreError::NotFound(path.to_string()),
            other => ReportStoreError::DownloadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ReportStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), ReportStoreError> {
        let store_path = StorePath::from(path.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| ReportStoreError::DeleteFailed(e.to_string()))
    }

    fn public_url(&self, path: &StoragePath) -> String {
        format!("{}/{}", self.public_base_url, path)
    }
}
