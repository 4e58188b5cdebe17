use crate::domain::model::{Report, SalesRecord};
use crate::utils::error::{Result, StorageResult};
use async_trait::async_trait;

/// 物件儲存能力：以 (bucket, key) 讀寫整個物件
pub trait Storage: Send + Sync {
    fn read_object(
        &self,
        bucket: &str,
        key: &str,
    ) -> impl std::future::Future<Output = StorageResult<Vec<u8>>> + Send;

    /// 覆寫同一 key 上既有的物件
    fn write_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> impl std::future::Future<Output = StorageResult<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn landing_bucket(&self) -> &str;
    fn processed_bucket(&self) -> &str;
    fn source_key(&self) -> &str;
    fn report_key(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SalesRecord>>;
    async fn transform(&self, records: Vec<SalesRecord>) -> Result<Report>;
    async fn load(&self, report: Report) -> Result<Report>;
}
