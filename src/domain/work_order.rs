use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::WorkOrderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Models answer "high", "HIGH" or "High priority"; anything unrecognised is Medium.
    pub fn parse_lenient(text: &str) -> Self {
        let lowered = text.trim().to_lowercase();
        if lowered.starts_with("high") || lowered.starts_with("urgent") {
            Priority::High
        } else if lowered.starts_with("low") {
            Priority::Low
        } else {
            Priority::Medium
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Only `open` is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Open,
}

/// Fields read back out of a composed work order by the extraction model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkOrderFields {
    /// Short title of the work order.
    pub title: String,
    /// One or two sentence summary of the work to be done.
    pub description: String,
    /// One of High, Medium or Low.
    pub priority: String,
    /// Scheduled date as YYYY-MM-DD.
    #[serde(default)]
    pub date: Option<String>,
    /// Scheduled start time as HH:MM (24 hour clock).
    #[serde(default)]
    pub time: Option<String>,
}

/// Stored work order. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub date: String,
    pub time: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: WorkOrderStatus,
    pub pdf_url: String,
}
