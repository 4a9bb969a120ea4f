use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{RepositoryError, WorkOrderRepository};
use crate::domain::{WorkOrder, WorkOrderId};

/// Process-local store for development runs and tests.
#[derive(Default)]
pub struct InMemoryWorkOrderRepository {
    records: RwLock<BTreeMap<WorkOrderId, WorkOrder>>,
}

impl InMemoryWorkOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkOrderRepository for InMemoryWorkOrderRepository {
    async fn list_ids(&self) -> Result<Vec<WorkOrderId>, RepositoryError> {
        Ok(self.records.read().await.keys().cloned().collect())
    }

    async fn get(&self, id: &WorkOrderId) -> Result<Option<WorkOrder>, RepositoryError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn create(&self, work_order: &WorkOrder) -> Result<(), RepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(&work_order.id) {
            return Err(RepositoryError::AlreadyExists(work_order.id.to_string()));
        }
        records.insert(work_order.id.clone(), work_order.clone());
        Ok(())
    }
}
