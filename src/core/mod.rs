pub mod aggregate;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{CategoryTotal, Report, SalesRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
