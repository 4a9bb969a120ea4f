use std::path::PathBuf;
use std::sync::Arc;

use object_store::local::LocalFileSystem;

use super::ObjectReportStore;
use crate::application::ports::ReportStoreError;

/// Route prefix under which the HTTP server exposes the local store.
pub const LOCAL_FILES_ROUTE: &str = "/files";

impl ObjectReportStore {
    /// Files under `base_path`, published as `<public_base_url>/files/<path>`.
    pub fn local(base_path: PathBuf, public_base_url: &str) -> Result<Self, ReportStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ReportStoreError::Configuration(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(fs),
            public_base_url: format!(
                "{}{}",
                public_base_url.trim_end_matches('/'),
                LOCAL_FILES_ROUTE
            ),
            supports_attributes: false,
        })
    }
}
