mod forecast;
mod inbound_message;
mod issue_category;
mod issue_details;
mod messaging_reply;
mod query_type;
mod storage_path;
mod work_order;
mod work_order_id;

pub use forecast::{
    Coordinates, Forecast, ForecastCity, ForecastEntry, RainChance, Rainfall, WeatherCondition,
};
pub use inbound_message::{InboundMessage, MediaKind};
pub use issue_category::IssueCategory;
pub use issue_details::{IssueDetails, UNSPECIFIED_LOCATION};
pub use messaging_reply::MessagingReply;
pub use query_type::{QueryClassification, QueryType};
pub use storage_path::StoragePath;
pub use work_order::{Priority, WorkOrder, WorkOrderFields, WorkOrderStatus};
pub use work_order_id::WorkOrderId;
