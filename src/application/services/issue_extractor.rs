use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::structured_output::parse_lenient;
use crate::application::ports::{GenerationOptions, LlmClient, LlmClientError};
use crate::domain::{IssueCategory, IssueDetails, UNSPECIFIED_LOCATION};
use crate::infrastructure::observability::sanitize_prompt;

const EXTRACTION_MAX_TOKENS: u32 = 150;

const STOP_WORDS: [&str; 9] = ["there", "is", "was", "the", "a", "an", "and", "or", "but"];

static LOCATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\bin\s+([^.!?]+?)(?:\s+area|\s+street|\s+road|\.|!|\?|$)",
        r"(?i)\bat\s+([^.!?]+?)(?:\s+area|\s+street|\s+road|\.|!|\?|$)",
        r"(?i)\bnear\s+([^.!?]+?)(?:\s+area|\s+street|\s+road|\.|!|\?|$)",
        r"(?i)\bon\s+([^.!?]+?)(?:\s+street|\s+road|\.|!|\?|$)",
        r"(?i)([A-Za-z\s]+)(?:\s+area|\s+street|\s+road)",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

pub struct IssueExtractor<L: LlmClient + ?Sized> {
    llm_client: Arc<L>,
}

impl<L: LlmClient + ?Sized> IssueExtractor<L> {
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Issue type, location and description from a free-form report.
    ///
    /// An unparsable model answer falls back to keyword matching; a failed
    /// model call is returned as an error.
    #[tracing::instrument(skip(self, query))]
    pub async fn extract(&self, query: &str) -> Result<IssueDetails, IssueExtractionError> {
        let prompt = extraction_prompt(query);

        let response = self
            .llm_client
            .complete(&prompt, &GenerationOptions::extraction(EXTRACTION_MAX_TOKENS))
            .await?;

        match parse_lenient::<IssueDetails>(&response) {
            Ok(details) => Ok(details),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    response = %sanitize_prompt(&response),
                    "Unparsable extraction response, using keyword fallback"
                );
                Ok(fallback_extraction(query))
            }
        }
    }
}

/// Best-effort keyword and phrase matching. Multi-clause input gives rough guesses.
pub fn fallback_extraction(query: &str) -> IssueDetails {
    let category = IssueCategory::detect(query);
    let location = guess_location(query).unwrap_or_else(|| UNSPECIFIED_LOCATION.to_string());

    IssueDetails::new(category.as_str(), location, Some(query.to_string()))
}

fn guess_location(query: &str) -> Option<String> {
    LOCATION_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(query)?.get(1)?.as_str().trim();
        let words: Vec<&str> = captured
            .split_whitespace()
            .filter(|word| !STOP_WORDS.contains(&word.to_lowercase().as_str()))
            .collect();

        (!words.is_empty()).then(|| words.join(" "))
    })
}

fn extraction_prompt(query: &str) -> String {
    format!(
        r#"You are an expert at extracting structured information from text. Given a citizen's report about a civic issue, extract the relevant details as JSON.

User Query: "{query}"

Extract:
1. type_of_issue: the kind of issue reported (e.g. pothole, streetlight, water leak, garbage, noise, electrical)
2. location: where the issue is
3. description: a brief description of the issue

Return ONLY this JSON structure, no other text:
{{"type_of_issue": "identified issue type", "location": "extracted location", "description": "brief description of the issue"}}

Examples:
- "There is a pothole in downtown area" -> {{"type_of_issue": "pothole", "location": "downtown area", "description": "There is a pothole in downtown area"}}
- "Streetlight not working on Main Street" -> {{"type_of_issue": "streetlight", "location": "Main Street", "description": "Streetlight not working on Main Street"}}

Now extract from: "{query}"

JSON:"#
    )
}

#[derive(Debug, thiserror::Error)]
pub enum IssueExtractionError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
}
