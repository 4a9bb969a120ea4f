mod files;
mod health;
mod tools;
mod whatsapp;
mod work_orders;

pub use files::file_handler;
pub use health::health_handler;
pub use tools::{
    draft_work_order_handler, generate_pdf_handler, issue_details_handler,
    persist_work_order_handler, query_type_handler, weather_forecast_handler,
    weather_report_handler, weather_summary_handler,
};
pub use whatsapp::{WhatsAppWebhookForm, whatsapp_handler};
pub use work_orders::work_order_handler;
