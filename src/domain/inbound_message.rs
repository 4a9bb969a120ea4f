/// A message as delivered by the messaging platform's webhook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InboundMessage {
    pub body: String,
    pub num_media: u32,
    pub media_url: Option<String>,
    pub media_content_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind<'a> {
    None,
    Audio { url: &'a str, content_type: &'a str },
    Image,
    Unsupported(&'a str),
}

impl InboundMessage {
    /// Only the first attachment is considered.
    pub fn media_kind(&self) -> MediaKind<'_> {
        if self.num_media == 0 {
            return MediaKind::None;
        }

        let content_type = self.media_content_type.as_deref().unwrap_or("");

        if content_type.starts_with("audio") {
            match self.media_url.as_deref() {
                Some(url) if !url.is_empty() => MediaKind::Audio { url, content_type },
                _ => MediaKind::Unsupported(content_type),
            }
        } else if content_type.starts_with("image") {
            MediaKind::Image
        } else {
            MediaKind::Unsupported(content_type)
        }
    }
}
