pub mod app_data;
pub mod record;
pub mod source;

pub use app_data::AppData;
pub use record::{CostEntry, DailyRecord};
pub use source::CostSource;
