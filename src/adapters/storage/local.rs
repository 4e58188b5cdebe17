use crate::core::Storage;
use crate::utils::error::{StorageError, StorageResult};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// 本機目錄模擬的物件儲存：`<base>/<bucket>/<key>`，每個子目錄就是一個桶
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.base_path.join(bucket)
    }

    fn object_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        let key_path = Path::new(key);
        // key 不得跳出桶目錄
        if key_path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.bucket_path(bucket).join(key_path))
    }
}

impl Storage for LocalStorage {
    async fn read_object(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_path(bucket, key).ok_or_else(|| StorageError::Read {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: "invalid object key".to_string(),
        })?;

        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            },
            _ => StorageError::Read {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            },
        })
    }

    async fn write_object(
        &self,
        bucket: &str,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> StorageResult<()> {
        let write_error = |message: String| StorageError::Write {
            bucket: bucket.to_string(),
            key: key.to_string(),
            message,
        };

        let path = self
            .object_path(bucket, key)
            .ok_or_else(|| write_error("invalid object key".to_string()))?;

        // 和雲端一樣，桶必須事先存在
        if !tokio::fs::try_exists(self.bucket_path(bucket))
            .await
            .unwrap_or(false)
        {
            return Err(write_error("bucket does not exist".to_string()));
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(e.to_string()))?;
        }

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| write_error(e.to_string()))?;

        tracing::debug!(
            "Wrote {} bytes ({}) to {}",
            data.len(),
            content_type,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("processed-zone")).unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage
            .write_object("processed-zone", "report.json", b"[]", "application/json")
            .await
            .unwrap();
        let data = storage
            .read_object("processed-zone", "report.json")
            .await
            .unwrap();

        assert_eq!(data, b"[]");
    }

    #[tokio::test]
    async fn test_overwrite_keeps_last_write() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("processed-zone")).unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        for body in [&b"first"[..], &b"second"[..]] {
            storage
                .write_object("processed-zone", "report.json", body, "application/json")
                .await
                .unwrap();
        }

        let data = storage
            .read_object("processed-zone", "report.json")
            .await
            .unwrap();
        assert_eq!(data, b"second");
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage
            .read_object("landing-zone", "sales.csv")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StorageError::NotFound {
                bucket: "landing-zone".to_string(),
                key: "sales.csv".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_write_requires_existing_bucket() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage
            .write_object("processed-zone", "report.json", b"[]", "application/json")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
    }

    #[tokio::test]
    async fn test_key_cannot_escape_bucket() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("processed-zone")).unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage
            .write_object("processed-zone", "../escaped.json", b"[]", "application/json")
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::Write { .. }));
    }
}
