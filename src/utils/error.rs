use thiserror::Error;

/// 所有管道失敗在頁面上都附帶同一段提示
pub const BUCKET_HINT: &str =
    "Verifique se os buckets existem e se o arquivo 'sales.csv' está na 'landing-zone'.";

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Configuration error in '{field}': {message}")]
    ConfigurationError { field: String, message: String },

    #[error("Source object '{key}' not found in bucket '{bucket}'")]
    SourceNotFoundError { bucket: String, key: String },

    #[error("Malformed input: {message}")]
    MalformedInputError { message: String },

    #[error("Failed to write '{key}' to bucket '{bucket}': {message}")]
    StorageWriteError {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Failed to read '{key}' from bucket '{bucket}': {message}")]
    StorageReadError {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),
}

/// 管道對外的錯誤型別
pub type PipelineError = EtlError;

pub type Result<T> = std::result::Result<T, EtlError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Input,
    Storage,
    Serialization,
    Presentation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn config(field: &str, message: impl Into<String>) -> Self {
        EtlError::ConfigurationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        EtlError::MalformedInputError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigurationError { .. } => ErrorCategory::Configuration,
            EtlError::SourceNotFoundError { .. } => ErrorCategory::Source,
            EtlError::MalformedInputError { .. } => ErrorCategory::Input,
            EtlError::StorageWriteError { .. } | EtlError::StorageReadError { .. } => {
                ErrorCategory::Storage
            }
            EtlError::SerializationError(_) => ErrorCategory::Serialization,
            EtlError::TemplateError(_) => ErrorCategory::Presentation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Source | ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Serialization => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Presentation => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Set LANDING_ZONE_BUCKET and PROCESSED_ZONE_BUCKET (or the matching flags) to valid bucket names"
            }
            ErrorCategory::Source => "Upload the source CSV to the landing zone bucket",
            ErrorCategory::Input => "Make sure the CSV has a header with 'Categoria' and numeric 'Valor' columns",
            ErrorCategory::Storage => "Check that both buckets exist and the service account can access them",
            ErrorCategory::Serialization => "The report could not be encoded; inspect the source values",
            ErrorCategory::Presentation => "The page template failed to render; check templates/index.html",
        }
    }

    /// 頁面上顯示的訊息，不區分錯誤種類
    pub fn user_friendly_message(&self) -> String {
        format!("Ocorreu um erro: {}. {}", self, BUCKET_HINT)
    }
}

/// 儲存後端回報的錯誤，由管道依所在階段轉成 [`EtlError`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("object '{key}' not found in bucket '{bucket}'")]
    NotFound { bucket: String, key: String },

    #[error("read of '{key}' from bucket '{bucket}' failed: {message}")]
    Read {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("write of '{key}' to bucket '{bucket}' failed: {message}")]
    Write {
        bucket: String,
        key: String,
        message: String,
    },
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_message_carries_hint() {
        let err = EtlError::SourceNotFoundError {
            bucket: "landing".to_string(),
            key: "sales.csv".to_string(),
        };
        let message = err.user_friendly_message();
        assert!(message.starts_with("Ocorreu um erro: "));
        assert!(message.contains("'sales.csv' not found in bucket 'landing'"));
        assert!(message.ends_with(BUCKET_HINT));
    }

    #[test]
    fn test_category_and_severity() {
        let err = EtlError::config("landing_bucket", "missing");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let err = EtlError::malformed("bad row");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.severity() < ErrorSeverity::High);

        let err = EtlError::StorageReadError {
            bucket: "processed".to_string(),
            key: "report.json".to_string(),
            message: "timeout".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
    }
}
