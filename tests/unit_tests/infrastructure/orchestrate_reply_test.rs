use serde_json::json;

use civicbridge::infrastructure::orchestrate::reply_text;

#[test]
fn given_chat_completion_body_when_reading_reply_then_message_content() {
    let body = json!({
        "choices": [{ "message": { "role": "assistant", "content": "Work order created." } }]
    });

    assert_eq!(reply_text(&body), "Work order created.");
}

#[test]
fn given_top_level_content_when_reading_reply_then_it_is_used() {
    assert_eq!(reply_text(&json!({ "content": "Noted." })), "Noted.");
    assert_eq!(
        reply_text(&json!({ "content": [{ "text": "Noted." }] })),
        r#"[{"text":"Noted."}]"#
    );
}

#[test]
fn given_unrecognised_body_when_reading_reply_then_whole_body_is_returned() {
    let body = json!({ "status": "queued" });

    assert_eq!(reply_text(&body), r#"{"status":"queued"}"#);
}
