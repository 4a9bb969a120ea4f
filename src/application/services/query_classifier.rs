use std::sync::Arc;

use super::structured_output::{StructuredOutputError, parse_lenient, schema_instructions};
use crate::application::ports::{GenerationOptions, LlmClient, LlmClientError};
use crate::domain::QueryClassification;

const CLASSIFICATION_MAX_TOKENS: u32 = 200;

pub struct QueryClassifier<L: LlmClient + ?Sized> {
    llm_client: Arc<L>,
}

impl<L: LlmClient + ?Sized> QueryClassifier<L> {
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    #[tracing::instrument(skip(self, query))]
    pub async fn classify(&self, query: &str) -> Result<QueryClassification, ClassificationError> {
        let prompt = format!(
            r#"You route messages sent to a civic issue reporting service.
Classify the message into exactly one query_type:
- infrastructure_issue: the user reports a problem with public infrastructure (roads, streetlights, water, garbage, power lines, fallen trees).
- information_request: the user asks for information, such as the status of a report or the weather.
- casual_conversation: greetings, thanks and small talk.
Copy the message verbatim into query. Set location to the place mentioned in the message, or null when there is none.

{}

Message: "{}"

JSON:"#,
            schema_instructions::<QueryClassification>(),
            query
        );

        let response = self
            .llm_client
            .complete(
                &prompt,
                &GenerationOptions::extraction(CLASSIFICATION_MAX_TOKENS),
            )
            .await?;

        let mut classification: QueryClassification = parse_lenient(&response)?;

        if classification.query.trim().is_empty() {
            classification.query = query.to_string();
        }
        classification.location = classification
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("null"));

        tracing::debug!(query_type = %classification.query_type, "Query classified");

        Ok(classification)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("parse: {0}")]
    Parse(#[from] StructuredOutputError),
}
