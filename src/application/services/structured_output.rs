use schemars::{JsonSchema, schema_for};
use serde::de::DeserializeOwned;

/// The span from the first `{` to the last `}`, ignoring any chatter around it.
pub fn json_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_lenient<T: DeserializeOwned>(text: &str) -> Result<T, StructuredOutputError> {
    let json = json_object_span(text).ok_or(StructuredOutputError::NoJsonObject)?;
    serde_json::from_str(json).map_err(|e| StructuredOutputError::SchemaMismatch(e.to_string()))
}

/// Prompt fragment constraining the answer to the JSON schema of `T`.
pub fn schema_instructions<T: JsonSchema>() -> String {
    let schema = schema_for!(T);
    let rendered = serde_json::to_string_pretty(&schema).unwrap_or_default();
    format!(
        "Respond with a single JSON object conforming to the JSON schema below. Return ONLY the JSON object, no other text.\n{}",
        rendered
    )
}

#[derive(Debug, thiserror::Error)]
pub enum StructuredOutputError {
    #[error("no JSON object found in response")]
    NoJsonObject,
    #[error("response does not match schema: {0}")]
    SchemaMismatch(String),
}
