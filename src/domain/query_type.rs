use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Category of a user's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    InfrastructureIssue,
    InformationRequest,
    CasualConversation,
}

impl QueryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::InfrastructureIssue => "infrastructure_issue",
            QueryType::InformationRequest => "information_request",
            QueryType::CasualConversation => "casual_conversation",
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueryClassification {
    /// Category of the user's input, one of the predefined query types.
    pub query_type: QueryType,
    /// The user's query as it is.
    pub query: String,
    /// Location mentioned in the query, null when none is given.
    #[serde(default)]
    pub location: Option<String>,
}
