use axum::Form;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::ports::LlmClient;
use crate::domain::InboundMessage;
use crate::presentation::state::AppState;

/// Fields of the messaging webhook form that the bot reads.
#[derive(Debug, Deserialize)]
pub struct WhatsAppWebhookForm {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "NumMedia", default)]
    pub num_media: u32,
    #[serde(rename = "MediaUrl0")]
    pub media_url: Option<String>,
    #[serde(rename = "MediaContentType0")]
    pub media_content_type: Option<String>,
}

impl From<WhatsAppWebhookForm> for InboundMessage {
    fn from(form: WhatsAppWebhookForm) -> Self {
        InboundMessage {
            body: form.body,
            num_media: form.num_media,
            media_url: form.media_url,
            media_content_type: form.media_content_type,
        }
    }
}

/// Always answers 200 with a reply document, failures included.
#[tracing::instrument(skip(state, form), fields(num_media = form.num_media))]
pub async fn whatsapp_handler<L: LlmClient + ?Sized + 'static>(
    State(state): State<AppState<L>>,
    Form(form): Form<WhatsAppWebhookForm>,
) -> impl IntoResponse {
    let message = InboundMessage::from(form);
    let reply = state.message_dispatcher.dispatch(&message).await;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        reply.to_xml(),
    )
}
