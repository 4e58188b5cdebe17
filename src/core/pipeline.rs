use crate::core::aggregate::aggregate;
use crate::core::{ConfigProvider, Pipeline, Report, SalesRecord, Storage};
use crate::utils::error::{EtlError, Result, StorageError};

pub const CATEGORY_COLUMN: &str = "Categoria";
pub const AMOUNT_COLUMN: &str = "Valor";
pub const REPORT_CONTENT_TYPE: &str = "application/json";

pub struct ReportPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ReportPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

/// 解析來源 CSV：需要標題列，且包含 `Categoria` 與 `Valor`
pub fn parse_sales_csv(data: &[u8]) -> Result<Vec<SalesRecord>> {
    let text = std::str::from_utf8(data)
        .map_err(|e| EtlError::malformed(format!("source file is not valid UTF-8: {}", e)))?;
    // 試算表匯出的檔案常帶 BOM
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Fields)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| EtlError::malformed(format!("cannot read CSV header: {}", e)))?;

    for column in [CATEGORY_COLUMN, AMOUNT_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(EtlError::malformed(format!(
                "CSV header is missing required column '{}'",
                column
            )));
        }
    }

    let mut records = Vec::new();
    for (index, row) in reader.deserialize::<SalesRecord>().enumerate() {
        // 標題佔第 1 行
        let record = row
            .map_err(|e| EtlError::malformed(format!("line {}: {}", index + 2, e)))?;
        records.push(record);
    }

    Ok(records)
}

fn source_error(err: StorageError) -> EtlError {
    match err {
        StorageError::NotFound { bucket, key } => EtlError::SourceNotFoundError { bucket, key },
        StorageError::Read {
            bucket,
            key,
            message,
        }
        | StorageError::Write {
            bucket,
            key,
            message,
        } => EtlError::StorageReadError {
            bucket,
            key,
            message,
        },
    }
}

fn read_back_error(err: StorageError) -> EtlError {
    match err {
        StorageError::NotFound { bucket, key } => EtlError::StorageReadError {
            bucket,
            key,
            message: "report was not found after writing it".to_string(),
        },
        other => source_error(other),
    }
}

fn write_error(err: StorageError) -> EtlError {
    match err {
        StorageError::NotFound { bucket, key } => EtlError::StorageWriteError {
            bucket,
            key,
            message: "destination bucket does not exist".to_string(),
        },
        StorageError::Read {
            bucket,
            key,
            message,
        }
        | StorageError::Write {
            bucket,
            key,
            message,
        } => EtlError::StorageWriteError {
            bucket,
            key,
            message,
        },
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ReportPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SalesRecord>> {
        let bucket = self.config.landing_bucket();
        let key = self.config.source_key();

        tracing::debug!("Reading source object {}/{}", bucket, key);
        let data = self
            .storage
            .read_object(bucket, key)
            .await
            .map_err(source_error)?;
        tracing::debug!("Source object is {} bytes", data.len());

        parse_sales_csv(&data)
    }

    async fn transform(&self, records: Vec<SalesRecord>) -> Result<Report> {
        let totals = aggregate(&records);

        // JSON 無法表示 inf，寫入前就擋下
        if let Some(total) = totals.iter().find(|t| !t.total.is_finite()) {
            return Err(EtlError::malformed(format!(
                "total for category '{}' is not a finite number ({})",
                total.category, total.total
            )));
        }

        Ok(Report::new(totals))
    }

    async fn load(&self, report: Report) -> Result<Report> {
        let bucket = self.config.processed_bucket();
        let key = self.config.report_key();

        let json = report.to_pretty_json()?;
        tracing::debug!("Writing report ({} bytes) to {}/{}", json.len(), bucket, key);
        self.storage
            .write_object(bucket, key, json.as_bytes(), REPORT_CONTENT_TYPE)
            .await
            .map_err(write_error)?;

        // 讀回確認已寫入；只信任儲存服務本身的一致性
        let data = self
            .storage
            .read_object(bucket, key)
            .await
            .map_err(read_back_error)?;

        Report::from_json(&data).map_err(|e| EtlError::StorageReadError {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: format!("stored report is not valid JSON: {}", e),
        })
    }
}
