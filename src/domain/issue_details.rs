use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const UNSPECIFIED_LOCATION: &str = "location not specified";

/// A civic issue as reported by a citizen, before any work order exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IssueDetails {
    /// The type or category of the issue reported, e.g. pothole or streetlight.
    pub type_of_issue: String,
    /// Where the issue is occurring.
    pub location: String,
    /// Optional free-form description of the issue.
    #[serde(default)]
    pub description: Option<String>,
}

impl IssueDetails {
    pub fn new(
        type_of_issue: impl Into<String>,
        location: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            type_of_issue: type_of_issue.into(),
            location: location.into(),
            description,
        }
    }
}
