use civicbridge::domain::{InboundMessage, MediaKind};

fn with_media(content_type: &str, url: Option<&str>) -> InboundMessage {
    InboundMessage {
        body: String::new(),
        num_media: 1,
        media_url: url.map(str::to_string),
        media_content_type: Some(content_type.to_string()),
    }
}

#[test]
fn given_no_media_when_classifying_then_kind_is_none() {
    let message = InboundMessage {
        body: "hello".to_string(),
        ..Default::default()
    };
    assert_eq!(message.media_kind(), MediaKind::None);
}

#[test]
fn given_audio_attachment_when_classifying_then_kind_is_audio() {
    let message = with_media("audio/ogg", Some("https://media.test/1"));
    assert_eq!(
        message.media_kind(),
        MediaKind::Audio {
            url: "https://media.test/1",
            content_type: "audio/ogg"
        }
    );
}

#[test]
fn given_audio_without_url_when_classifying_then_kind_is_unsupported() {
    let message = with_media("audio/ogg", None);
    assert_eq!(message.media_kind(), MediaKind::Unsupported("audio/ogg"));
}

#[test]
fn given_image_or_document_when_classifying_then_kinds_differ() {
    assert_eq!(
        with_media("image/jpeg", Some("https://media.test/2")).media_kind(),
        MediaKind::Image
    );
    assert_eq!(
        with_media("application/pdf", Some("https://media.test/3")).media_kind(),
        MediaKind::Unsupported("application/pdf")
    );
}
