use std::sync::Arc;

use crate::application::ports::{RepositoryError, WorkOrderRepository};
use crate::presentation::config::{WorkOrderStoreProvider, WorkOrderStoreSettings};

use super::{FirebaseWorkOrderRepository, InMemoryWorkOrderRepository};

pub struct WorkOrderRepositoryFactory;

impl WorkOrderRepositoryFactory {
    pub fn create(
        settings: &WorkOrderStoreSettings,
    ) -> Result<Arc<dyn WorkOrderRepository>, RepositoryError> {
        match settings.provider {
            WorkOrderStoreProvider::Memory => {
                tracing::warn!("Work orders are kept in memory and lost on restart");
                Ok(Arc::new(InMemoryWorkOrderRepository::new()))
            }
            WorkOrderStoreProvider::Firebase => {
                let database_url = settings.database_url.as_deref().ok_or_else(|| {
                    RepositoryError::RequestFailed("work_orders.database_url required".into())
                })?;
                tracing::info!(database_url = %database_url, "Using Firebase Realtime Database");
                Ok(Arc::new(FirebaseWorkOrderRepository::new(
                    database_url,
                    settings.auth_token.clone(),
                )))
            }
        }
    }
}
