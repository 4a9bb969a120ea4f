const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Reply to an inbound message, rendered as a messaging-markup XML document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessagingReply {
    messages: Vec<String>,
}

impl MessagingReply {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn message(text: impl Into<String>) -> Self {
        Self {
            messages: vec![text.into()],
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn to_xml(&self) -> String {
        let body: String = self
            .messages
            .iter()
            .map(|m| format!("<Message>{}</Message>", escape_xml(m)))
            .collect();

        format!("{}<Response>{}</Response>", XML_DECLARATION, body)
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}
