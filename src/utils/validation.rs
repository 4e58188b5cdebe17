use crate::utils::error::{EtlError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| EtlError::config(field_name, "value is required but was not set"))
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::config(
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(EtlError::config(field_name, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(EtlError::config(
                field_name,
                format!("unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(EtlError::config(
            field_name,
            format!("invalid URL format '{}': {}", url_str, e),
        )),
    }
}

/// 桶名稱規則取 S3 與 GCS 的交集再放寬底線
pub fn validate_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    validate_non_empty_string(field_name, bucket_name)?;

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(EtlError::config(
            field_name,
            format!(
                "bucket name '{}' must be between 3 and 63 characters",
                bucket_name
            ),
        ));
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'))
    {
        return Err(EtlError::config(
            field_name,
            format!(
                "bucket name '{}' can only contain lowercase letters, numbers, hyphens, underscores and dots",
                bucket_name
            ),
        ));
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(EtlError::config(
            field_name,
            format!("bucket name '{}' cannot start or end with a hyphen", bucket_name),
        ));
    }

    Ok(())
}

pub fn validate_object_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;

    if key.contains('\0') {
        return Err(EtlError::config(field_name, "object key contains null bytes"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("s3_endpoint_url", "https://storage.googleapis.com").is_ok());
        assert!(validate_url("s3_endpoint_url", "http://localhost:9000").is_ok());
        assert!(validate_url("s3_endpoint_url", "").is_err());
        assert!(validate_url("s3_endpoint_url", "invalid-url").is_err());
        assert!(validate_url("s3_endpoint_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_bucket_name() {
        assert!(validate_bucket_name("landing_bucket", "landing-zone").is_ok());
        assert!(validate_bucket_name("landing_bucket", "my_project.processed-zone").is_ok());
        assert!(validate_bucket_name("landing_bucket", "").is_err());
        assert!(validate_bucket_name("landing_bucket", "ab").is_err());
        assert!(validate_bucket_name("landing_bucket", "Landing").is_err());
        assert!(validate_bucket_name("landing_bucket", "-landing").is_err());
        assert!(validate_bucket_name("landing_bucket", &"a".repeat(64)).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let missing: Option<String> = None;
        match validate_required_field("processed_bucket", &missing) {
            Err(EtlError::ConfigurationError { field, .. }) => {
                assert_eq!(field, "processed_bucket")
            }
            other => panic!("expected configuration error, got {:?}", other),
        }

        let present = Some("processed-zone".to_string());
        assert_eq!(
            validate_required_field("processed_bucket", &present).unwrap(),
            "processed-zone"
        );
    }

    #[test]
    fn test_validate_object_key() {
        assert!(validate_object_key("source_key", "sales.csv").is_ok());
        assert!(validate_object_key("source_key", "  ").is_err());
        assert!(validate_object_key("source_key", "bad\0key").is_err());
    }
}
