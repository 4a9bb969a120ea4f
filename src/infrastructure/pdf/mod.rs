mod work_order_pdf_renderer;

pub use work_order_pdf_renderer::{WorkOrderPdfRenderer, flatten_inline};
