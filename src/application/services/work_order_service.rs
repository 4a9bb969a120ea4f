use std::sync::Arc;

use bytes::Bytes;
use chrono::{Local, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use super::structured_output::{parse_lenient, schema_instructions};
use crate::application::ports::{
    GenerationOptions, LlmClient, LlmClientError, PdfRenderError, PdfRenderer, ReportStore,
    ReportStoreError, RepositoryError, WorkOrderRepository,
};
use crate::domain::{
    Priority, StoragePath, WorkOrder, WorkOrderFields, WorkOrderId, WorkOrderStatus,
};

const FIELDS_MAX_TOKENS: u32 = 400;
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Copy)]
enum UploadMode {
    Create,
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfArtifact {
    pub filename: String,
    pub pdf_url: String,
}

pub struct WorkOrderService<L: LlmClient + ?Sized> {
    llm_client: Arc<L>,
    repository: Arc<dyn WorkOrderRepository>,
    report_store: Arc<dyn ReportStore>,
    pdf_renderer: Arc<dyn PdfRenderer>,
}

impl<L: LlmClient + ?Sized> WorkOrderService<L> {
    pub fn new(
        llm_client: Arc<L>,
        repository: Arc<dyn WorkOrderRepository>,
        report_store: Arc<dyn ReportStore>,
        pdf_renderer: Arc<dyn PdfRenderer>,
    ) -> Self {
        Self {
            llm_client,
            repository,
            report_store,
            pdf_renderer,
        }
    }

    pub async fn persist(&self, markdown: &str) -> Result<WorkOrder, WorkOrderError> {
        self.persist_at(markdown, Local::now().naive_local()).await
    }

    /// Stores a composed work order: fields, id, PDF, then the record.
    ///
    /// The PDF is uploaded before the record is written and removed again if
    /// the write fails, so a stored record always points at an existing PDF.
    /// The upload never replaces an existing PDF: an id taken by a concurrent
    /// persist fails here with [`ReportStoreError::AlreadyExists`].
    #[tracing::instrument(skip(self, markdown))]
    pub async fn persist_at(
        &self,
        markdown: &str,
        now: NaiveDateTime,
    ) -> Result<WorkOrder, WorkOrderError> {
        if markdown.trim().is_empty() {
            return Err(WorkOrderError::EmptyWorkOrder);
        }

        let fields = self.extract_fields(markdown).await?;

        let existing = self.repository.list_ids().await?;
        let id = WorkOrderId::next_for_date(&existing, now.date())
            .ok_or(WorkOrderError::SequenceExhausted(now.date()))?;
        let path = StoragePath::work_order_pdf(&id);

        let pdf_url = self.upload_pdf(markdown, &path, now, UploadMode::Create).await?;

        let work_order = WorkOrder {
            id,
            date: non_empty(fields.date).unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
            time: non_empty(fields.time).unwrap_or_else(|| now.format("%H:%M").to_string()),
            title: fields.title,
            description: fields.description,
            priority: Priority::parse_lenient(&fields.priority),
            status: WorkOrderStatus::Open,
            pdf_url,
        };

        if let Err(e) = self.repository.create(&work_order).await {
            tracing::error!(error = %e, work_order_id = %work_order.id, "Failed to write work order record");
            if let Err(cleanup) = self.report_store.delete(&path).await {
                tracing::warn!(error = %cleanup, path = %path, "Failed to remove orphaned work order PDF");
            }
            return Err(e.into());
        }

        tracing::info!(
            work_order_id = %work_order.id,
            priority = %work_order.priority,
            "Work order persisted"
        );

        Ok(work_order)
    }

    pub async fn generate_pdf(
        &self,
        markdown: &str,
        work_order_id: Option<&str>,
    ) -> Result<PdfArtifact, WorkOrderError> {
        self.generate_pdf_at(markdown, work_order_id, Local::now().naive_local())
            .await
    }

    /// Renders and uploads a PDF without writing a record.
    pub async fn generate_pdf_at(
        &self,
        markdown: &str,
        work_order_id: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<PdfArtifact, WorkOrderError> {
        if markdown.trim().is_empty() {
            return Err(WorkOrderError::EmptyWorkOrder);
        }

        let stem = match work_order_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                let suffix = Uuid::new_v4().simple().to_string();
                format!("wo_{}_{}", now.format("%Y%m%d_%H%M%S"), &suffix[..8])
            }
        };

        let path = StoragePath::pdf_named(&stem);
        if !path.is_safe() || stem.contains('/') {
            return Err(WorkOrderError::InvalidId(stem));
        }

        let pdf_url = self
            .upload_pdf(markdown, &path, now, UploadMode::Overwrite)
            .await?;

        Ok(PdfArtifact {
            filename: path.file_name().to_string(),
            pdf_url,
        })
    }

    pub async fn get(&self, id: &WorkOrderId) -> Result<Option<WorkOrder>, WorkOrderError> {
        Ok(self.repository.get(id).await?)
    }

    async fn extract_fields(&self, markdown: &str) -> Result<WorkOrderFields, WorkOrderError> {
        let prompt = format!(
            r#"Read the work order below and extract its title, a short description, its priority (High, Medium or Low), and the scheduled date (YYYY-MM-DD) and start time (HH:MM, 24 hour clock) when given.

{}

[WORK ORDER]
{}

JSON:"#,
            schema_instructions::<WorkOrderFields>(),
            markdown
        );

        let response = self
            .llm_client
            .complete(&prompt, &GenerationOptions::extraction(FIELDS_MAX_TOKENS))
            .await?;

        match parse_lenient::<WorkOrderFields>(&response) {
            Ok(fields) => Ok(fields),
            Err(e) => {
                tracing::warn!(error = %e, "Unparsable work order fields, reading markdown directly");
                Ok(fields_from_markdown(markdown))
            }
        }
    }

    async fn upload_pdf(
        &self,
        markdown: &str,
        path: &StoragePath,
        now: NaiveDateTime,
        mode: UploadMode,
    ) -> Result<String, WorkOrderError> {
        let pdf = Bytes::from(self.pdf_renderer.render(markdown, now)?);
        let size = match mode {
            UploadMode::Create => {
                self.report_store
                    .create(path, pdf, PDF_CONTENT_TYPE)
                    .await?
            }
            UploadMode::Overwrite => {
                self.report_store
                    .store(path, pdf, PDF_CONTENT_TYPE)
                    .await?
            }
        };

        let url = self.report_store.public_url(path);
        tracing::debug!(path = %path, bytes = size, "Work order PDF uploaded");

        Ok(url)
    }
}

/// Reads title, priority and description straight from the markdown layout
/// the composer asks for.
pub fn fields_from_markdown(markdown: &str) -> WorkOrderFields {
    let lines: Vec<&str> = markdown.lines().map(str::trim).collect();

    let title = lines
        .iter()
        .find_map(|line| line.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .unwrap_or_else(|| "Work Order".to_string());

    let labelled = |label: &str| -> Option<String> {
        lines.iter().find_map(|line| {
            let rest = line.trim_start_matches("- ").trim_start_matches("* ");
            let rest = rest.strip_prefix(&format!("**{}**:", label))?;
            let value = rest.trim().trim_matches('*').trim();
            (!value.is_empty()).then(|| value.to_string())
        })
    };

    WorkOrderFields {
        description: labelled("Description")
            .or_else(|| labelled("Type"))
            .unwrap_or_else(|| title.clone()),
        priority: labelled("Priority").unwrap_or_else(|| Priority::Medium.to_string()),
        date: None,
        time: None,
        title,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("null"))
}

#[derive(Debug, thiserror::Error)]
pub enum WorkOrderError {
    #[error("work order content is empty")]
    EmptyWorkOrder,
    #[error("invalid work order id: {0}")]
    InvalidId(String),
    #[error("no work order ids left for {0}")]
    SequenceExhausted(NaiveDate),
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("storage: {0}")]
    Storage(#[from] ReportStoreError),
    #[error("render: {0}")]
    Render(#[from] PdfRenderError),
}
