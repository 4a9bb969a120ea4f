mod firebase_work_order_repository;
mod in_memory_work_order_repository;
mod work_order_repository_factory;

pub use firebase_work_order_repository::FirebaseWorkOrderRepository;
pub use in_memory_work_order_repository::InMemoryWorkOrderRepository;
pub use work_order_repository_factory::WorkOrderRepositoryFactory;
