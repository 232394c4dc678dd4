use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// 原始內容無法解析成任何樹狀結構
    #[error("Document malformed: {message}")]
    DocumentMalformed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Report not found: {id}")]
    NotFound { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn malformed(message: impl Into<String>) -> Self {
        EtlError::DocumentMalformed {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::DocumentMalformed { .. } | EtlError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Storage,
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            EtlError::NotFound { .. } => ErrorCategory::NotFound,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Low,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::DocumentMalformed { .. } => {
                "Check that the file is well-formed XML with a single root element"
            }
            EtlError::ValidationError { .. } => "Only upload .xml files within the size limit",
            EtlError::IoError(_) => "Check that the path exists and is readable/writable",
            EtlError::SerializationError(_) => {
                "The stored report may be corrupted; delete it and upload again"
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => "Review the CLI flags and the TOML config file",
            EtlError::NotFound { .. } => "Run `list` to see the ids of stored reports",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::DocumentMalformed { .. } => {
                "Failed to parse XML. File may be malformed.".to_string()
            }
            EtlError::NotFound { .. } => "Report not found".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_is_high_severity_input_error() {
        let err = EtlError::malformed("unexpected end of file");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.to_string(), "Document malformed: unexpected end of file");
        assert_eq!(
            err.user_friendly_message(),
            "Failed to parse XML. File may be malformed."
        );
    }

    #[test]
    fn test_not_found_is_low_severity() {
        let err = EtlError::NotFound {
            id: "abc".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.to_string(), "Report not found: abc");
    }
}
