use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{WorkOrder, WorkOrderId};

#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    /// Every stored id. Keys that are not work order ids are skipped.
    async fn list_ids(&self) -> Result<Vec<WorkOrderId>, RepositoryError>;

    async fn get(&self, id: &WorkOrderId) -> Result<Option<WorkOrder>, RepositoryError>;

    async fn create(&self, work_order: &WorkOrder) -> Result<(), RepositoryError>;
}
