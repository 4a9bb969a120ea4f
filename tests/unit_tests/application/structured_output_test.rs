use serde::Deserialize;

use civicbridge::application::services::{
    StructuredOutputError, json_object_span, parse_lenient, schema_instructions,
};
use civicbridge::domain::{IssueDetails, QueryClassification};

#[derive(Debug, Deserialize, PartialEq)]
struct Pair {
    a: u32,
    b: String,
}

#[test]
fn given_chatter_around_json_when_finding_span_then_first_to_last_brace() {
    let text = "Sure! Here you go: {\"a\": 1, \"b\": \"{x}\"} Hope that helps.";
    assert_eq!(json_object_span(text), Some("{\"a\": 1, \"b\": \"{x}\"}"));
}

#[test]
fn given_text_without_object_when_parsing_then_no_json_object_error() {
    let result = parse_lenient::<Pair>("I could not find anything");
    assert!(matches!(result, Err(StructuredOutputError::NoJsonObject)));

    let reversed = parse_lenient::<Pair>("} backwards {");
    assert!(matches!(reversed, Err(StructuredOutputError::NoJsonObject)));
}

#[test]
fn given_wrong_shape_when_parsing_then_schema_mismatch() {
    let result = parse_lenient::<Pair>("{\"a\": \"one\"}");
    assert!(matches!(result, Err(StructuredOutputError::SchemaMismatch(_))));
}

#[test]
fn given_model_answer_with_preamble_when_parsing_then_value_is_read() {
    let pair: Pair = parse_lenient("JSON:\n{\"a\": 2, \"b\": \"ok\"}\n").unwrap();
    assert_eq!(
        pair,
        Pair {
            a: 2,
            b: "ok".to_string()
        }
    );
}

#[test]
fn given_schema_type_when_building_instructions_then_lists_its_fields() {
    let issue = schema_instructions::<IssueDetails>();
    assert!(issue.contains("type_of_issue"));
    assert!(issue.contains("location"));

    let classification = schema_instructions::<QueryClassification>();
    assert!(classification.contains("infrastructure_issue"));
    assert!(classification.contains("casual_conversation"));
}
