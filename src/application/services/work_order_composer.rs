use std::sync::Arc;

use crate::application::ports::{GenerationOptions, LlmClient, LlmClientError};
use crate::domain::IssueDetails;

const COMPOSE_MAX_TOKENS: u32 = 5000;

pub struct WorkOrderComposer<L: LlmClient + ?Sized> {
    llm_client: Arc<L>,
}

impl<L: LlmClient + ?Sized> WorkOrderComposer<L> {
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Drafts a markdown work order scheduled around the given weather.
    #[tracing::instrument(skip(self, issue, weather_details), fields(issue_type = %issue.type_of_issue))]
    pub async fn compose(
        &self,
        issue: &IssueDetails,
        weather_details: &str,
    ) -> Result<String, ComposeError> {
        let prompt = compose_prompt(issue, weather_details);

        let draft = self
            .llm_client
            .complete(&prompt, &GenerationOptions::generation(COMPOSE_MAX_TOKENS))
            .await?;

        let draft = draft.trim();
        if draft.is_empty() {
            return Err(ComposeError::EmptyDraft);
        }

        tracing::info!(chars = draft.len(), "Work order drafted");

        Ok(draft.to_string())
    }
}

fn compose_prompt(issue: &IssueDetails, weather_details: &str) -> String {
    let description = issue.description.as_deref().unwrap_or("");
    let reference: String = issue
        .location
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    format!(
        r#"Create a comprehensive work order for the reported issue, scheduling the repair around the weather.

[ISSUE DETAILS]
Issue Type: {issue_type}
Location: {location}
Description: {description}

[WEATHER INFORMATION]
{weather_details}

Write the work order in markdown and include:
- Issue identification and priority level
- Optimal repair date and time based on the weather
- Required materials and crew size
- Safety considerations
- Expected duration
- Weather conditions during the scheduled time

[Example Format]
# Work Order #WO-{reference}-001

## Issue Details
- **Type**: {issue_type}
- **Location**: {location}
- **Priority**: [High/Medium/Low based on safety impact]
- **Description**: {description}

## Scheduling
- **Recommended Date**: [Best weather window]
- **Time Window**: [Optimal hours]
- **Weather Conditions**: [Expected conditions]

## Resources Required
- **Crew Size**: [Number of workers needed]
- **Estimated Duration**: [Time to complete]
- **Materials**: [List of required materials]

## Safety Notes
- [Weather-related safety considerations]
- [Equipment requirements]
"#,
        issue_type = issue.type_of_issue,
        location = issue.location,
    )
}

#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("model returned an empty work order")]
    EmptyDraft,
}
