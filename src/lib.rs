pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod server;
pub mod utils;

pub use adapters::storage::LocalStorage;
#[cfg(feature = "s3")]
pub use adapters::storage::{S3Settings, S3Storage};
pub use config::{PipelineSettings, ServerConfig};
pub use core::{etl::EtlEngine, pipeline::ReportPipeline};
pub use domain::model::{CategoryTotal, Report, SalesRecord};
pub use utils::error::{EtlError, PipelineError, Result};
