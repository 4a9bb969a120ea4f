#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("invalid record: {0}")]
    InvalidRecord(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
}
