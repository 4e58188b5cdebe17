use crate::core::ConfigProvider;
use crate::render::RendererKind;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_bucket_name, validate_object_key, validate_required_field, validate_url, Validate,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_KEY: &str = "sales.csv";
pub const DEFAULT_REPORT_KEY: &str = "report.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "report-server")]
#[command(about = "Aggregates sales.csv from the landing zone and serves the report as HTML")]
pub struct ServerConfig {
    /// Bucket holding the raw sales CSV
    #[arg(long, env = "LANDING_ZONE_BUCKET")]
    pub landing_bucket: Option<String>,

    /// Bucket receiving the aggregated report
    #[arg(long, env = "PROCESSED_ZONE_BUCKET")]
    pub processed_bucket: Option<String>,

    #[arg(long, env = "SOURCE_KEY", default_value = DEFAULT_SOURCE_KEY)]
    pub source_key: String,

    #[arg(long, env = "REPORT_KEY", default_value = DEFAULT_REPORT_KEY)]
    pub report_key: String,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Renderer used by `GET /`
    #[arg(long, env = "RENDERER", value_enum, default_value = "template")]
    pub renderer: RendererKind,

    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value = "s3")]
    pub storage_backend: StorageBackend,

    /// Directory whose sub-directories act as buckets (local backend only)
    #[arg(long, env = "LOCAL_STORAGE_ROOT")]
    pub local_root: Option<String>,

    #[arg(long, env = "S3_REGION", default_value = "us-east-1")]
    pub s3_region: String,

    /// Custom endpoint, e.g. https://storage.googleapis.com for GCS interoperability
    #[arg(long, env = "S3_ENDPOINT_URL")]
    pub s3_endpoint_url: Option<String>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value = "compact")]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 啟動前一次驗證完，之後每個請求都使用同一份設定
    pub fn pipeline_settings(&self) -> Result<PipelineSettings> {
        self.validate()?;

        Ok(PipelineSettings {
            landing_bucket: validate_required_field("landing_bucket", &self.landing_bucket)?
                .clone(),
            processed_bucket: validate_required_field("processed_bucket", &self.processed_bucket)?
                .clone(),
            source_key: self.source_key.clone(),
            report_key: self.report_key.clone(),
        })
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        let landing = validate_required_field("landing_bucket", &self.landing_bucket)?;
        validate_bucket_name("landing_bucket", landing)?;

        let processed = validate_required_field("processed_bucket", &self.processed_bucket)?;
        validate_bucket_name("processed_bucket", processed)?;

        validate_object_key("source_key", &self.source_key)?;
        validate_object_key("report_key", &self.report_key)?;

        if landing == processed && self.source_key == self.report_key {
            return Err(EtlError::config(
                "report_key",
                "report would overwrite the source object",
            ));
        }

        if let Some(endpoint) = &self.s3_endpoint_url {
            validate_url("s3_endpoint_url", endpoint)?;
        }

        if self.storage_backend == StorageBackend::Local {
            validate_required_field("local_root", &self.local_root)?;
        }

        tracing::debug!("Server configuration validation passed");
        Ok(())
    }
}

/// 已驗證的管道設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub landing_bucket: String,
    pub processed_bucket: String,
    pub source_key: String,
    pub report_key: String,
}

impl PipelineSettings {
    pub fn new(landing_bucket: impl Into<String>, processed_bucket: impl Into<String>) -> Self {
        Self {
            landing_bucket: landing_bucket.into(),
            processed_bucket: processed_bucket.into(),
            source_key: DEFAULT_SOURCE_KEY.to_string(),
            report_key: DEFAULT_REPORT_KEY.to_string(),
        }
    }
}

impl ConfigProvider for PipelineSettings {
    fn landing_bucket(&self) -> &str {
        &self.landing_bucket
    }

    fn processed_bucket(&self) -> &str {
        &self.processed_bucket
    }

    fn source_key(&self) -> &str {
        &self.source_key
    }

    fn report_key(&self) -> &str {
        &self.report_key
    }
}
