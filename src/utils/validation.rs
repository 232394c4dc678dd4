use crate::utils::error::{EtlError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_extension_list(field_name: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for ext in extensions {
        if ext.trim().is_empty() || ext.contains('.') || ext.contains('/') {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: ext.clone(),
                reason: "Extensions are bare names such as \"xml\"".to_string(),
            });
        }
    }
    Ok(())
}

/// 上傳檔案的副檔名檢查（不分大小寫）
pub fn validate_file_extension(file_name: &str, allowed_extensions: &[String]) -> Result<()> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext)) => Ok(()),
        Some(ext) => Err(EtlError::ValidationError {
            message: format!(
                "Invalid file type '{}' for {}. Allowed extensions: {}",
                ext,
                file_name,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(EtlError::ValidationError {
            message: format!("File {} has no extension", file_name),
        }),
    }
}

pub fn validate_file_size(file_name: &str, size: u64, max_bytes: u64) -> Result<()> {
    if size > max_bytes {
        return Err(EtlError::ValidationError {
            message: format!(
                "File {} is {} bytes, exceeding the {} byte limit",
                file_name, size, max_bytes
            ),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: "Expected one of trace, debug, info, warn, error".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml_only() -> Vec<String> {
        vec!["xml".to_string()]
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("store_path", "./reports").is_ok());
        assert!(validate_path("store_path", "").is_err());
        assert!(validate_path("store_path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_file_size_bytes", 5, 1).is_ok());
        assert!(validate_positive_number("max_file_size_bytes", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("report.xml", &xml_only()).is_ok());
        assert!(validate_file_extension("REPORT.XML", &xml_only()).is_ok());
        assert!(validate_file_extension("report.json", &xml_only()).is_err());
        assert!(validate_file_extension("report", &xml_only()).is_err());
    }

    #[test]
    fn test_validate_extension_list() {
        assert!(validate_extension_list("allowed_extensions", &xml_only()).is_ok());
        assert!(validate_extension_list("allowed_extensions", &[]).is_err());
        assert!(validate_extension_list("allowed_extensions", &[".xml".to_string()]).is_err());
    }

    #[test]
    fn test_validate_file_size() {
        assert!(validate_file_size("a.xml", 10, 10).is_ok());
        assert!(validate_file_size("a.xml", 11, 10).is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("logging.level", "DEBUG").is_ok());
        assert!(validate_log_level("logging.level", "loud").is_err());
    }
}
