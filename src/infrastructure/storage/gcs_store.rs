use std::sync::Arc;

use object_store::gcp::GoogleCloudStorageBuilder;

use super::ObjectReportStore;
use crate::application::ports::ReportStoreError;

pub const GCS_PUBLIC_HOST: &str = "https://storage.googleapis.com";

impl ObjectReportStore {
    /// A Google Cloud Storage bucket. Objects are addressed by their public
    /// URL, so the bucket must grant public read.
    pub fn gcs(bucket: &str, service_account_path: Option<&str>) -> Result<Self, ReportStoreError> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
        if let Some(path) = service_account_path {
            builder = builder.with_service_account_path(path);
        }

        let store = builder
            .build()
            .map_err(|e| ReportStoreError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            public_base_url: format!("{}/{}", GCS_PUBLIC_HOST, bucket),
            supports_attributes: true,
        })
    }
}
