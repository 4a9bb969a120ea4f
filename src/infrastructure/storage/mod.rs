mod gcs_store;
mod local_store;
mod object_report_store;
mod store_factory;

pub use gcs_store::GCS_PUBLIC_HOST;
pub use local_store::LOCAL_FILES_ROUTE;
pub use object_report_store::ObjectReportStore;
pub use store_factory::ReportStoreFactory;
