use chrono::NaiveDateTime;

pub trait PdfRenderer: Send + Sync {
    /// Lays out a markdown work order as a PDF document.
    fn render(
        &self,
        markdown: &str,
        generated_at: NaiveDateTime,
    ) -> Result<Vec<u8>, PdfRenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfRenderError {
    #[error("content encoding failed: {0}")]
    Encoding(String),
    #[error("document write failed: {0}")]
    Write(String),
}
