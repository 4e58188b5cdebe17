use crate::core::Storage;
use crate::utils::error::{StorageError, StorageResult};
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub region: String,
    /// 未設定時使用 AWS 預設端點
    pub endpoint_url: Option<String>,
}

/// S3 API 上的物件儲存，同一個 client 服務兩個桶
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
}

impl S3Storage {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// 憑證走 SDK 的預設鏈（環境變數、設定檔、執行個體身分）
    pub async fn from_settings(settings: &S3Settings) -> Self {
        let shared = aws_config::load_defaults(BehaviorVersion::latest()).await;
        let mut builder =
            aws_sdk_s3::config::Builder::from(&shared).region(Region::new(settings.region.clone()));

        if let Some(endpoint) = &settings.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::info!(
            "S3 client configured (region: {}, endpoint: {})",
            settings.region,
            settings.endpoint_url.as_deref().unwrap_or("default")
        );
        Self::new(S3Client::from_conf(builder.build()))
    }
}

fn is_not_found<E: ProvideErrorMetadata>(err: &SdkError<E, HttpResponse>) -> bool {
    if let Some(code) = err.as_service_error().and_then(|e| e.code()) {
        if matches!(code, "NoSuchKey" | "NoSuchBucket" | "NotFound") {
            return true;
        }
    }
    err.raw_response()
        .map(|response| response.status().as_u16() == 404)
        .unwrap_or(false)
}

impl Storage for S3Storage {
    async fn read_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Read {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        let data = resp.body.collect().await.map_err(|e| StorageError::Read {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: format!("failed to collect object body: {}", e),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorageResult<()> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(|e| {
                if is_not_found(&e) {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Write {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        tracing::debug!("Uploaded {} bytes to s3://{}/{}", data.len(), bucket, key);
        Ok(())
    }
}
