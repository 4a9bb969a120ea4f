use std::fmt;

use super::WorkOrderId;

const WORK_ORDER_PREFIX: &str = "work_orders";

/// Object-storage key, relative to the bucket or base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn work_order_pdf(id: &WorkOrderId) -> Self {
        Self::pdf_named(&id.to_string())
    }

    pub fn pdf_named(stem: &str) -> Self {
        Self(format!("{}/{}.pdf", WORK_ORDER_PREFIX, stem))
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Rejects empty segments and parent traversal, for keys taken from request paths.
    pub fn is_safe(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
