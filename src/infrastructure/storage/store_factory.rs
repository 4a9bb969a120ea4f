use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ReportStore, ReportStoreError};
use crate::presentation::config::{StorageProvider, StorageSettings};

use super::ObjectReportStore;

pub struct ReportStoreFactory;

impl ReportStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn ReportStore>, ReportStoreError> {
        match settings.provider {
            StorageProvider::Local => {
                tracing::info!(path = %settings.local_path, "Storing reports on the local filesystem");
                let store = ObjectReportStore::local(
                    PathBuf::from(&settings.local_path),
                    &settings.public_base_url,
                )?;
                Ok(Arc::new(store))
            }
            StorageProvider::Gcs => {
                let bucket = settings.bucket.as_deref().ok_or_else(|| {
                    ReportStoreError::Configuration("storage.bucket required".into())
                })?;
                tracing::info!(bucket = %bucket, "Storing reports in Google Cloud Storage");
                let store =
                    ObjectReportStore::gcs(bucket, settings.service_account_path.as_deref())?;
                Ok(Arc::new(store))
            }
        }
    }
}
