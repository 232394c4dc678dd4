use crate::config::Settings;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_extension_list, validate_log_level, validate_path, validate_positive_number, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// 設定檔，每個區段都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub store: Option<StoreConfig>,
    pub upload: Option<UploadConfig>,
    pub parser: Option<ParserConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub allowed_extensions: Option<Vec<String>>,
    pub max_file_size_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    pub trim_text: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
                message: format!("cannot read config file {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPORT_STORE})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 套用到預設值之上
    pub fn into_settings(self) -> Settings {
        let mut settings = Settings::default();

        if let Some(store) = self.store {
            settings.store_path = store.path;
        }
        if let Some(upload) = self.upload {
            if let Some(extensions) = upload.allowed_extensions {
                settings.allowed_extensions = extensions;
            }
            if let Some(max) = upload.max_file_size_bytes {
                settings.max_file_size_bytes = max;
            }
        }
        if let Some(trim_text) = self.parser.and_then(|p| p.trim_text) {
            settings.parse.trim_text = trim_text;
        }
        if let Some(logging) = self.logging {
            settings.log_level = logging.level;
            settings.json_logs = logging.json.unwrap_or(false);
        }

        settings
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(store) = &self.store {
            validate_path("store.path", &store.path)?;
        }
        if let Some(upload) = &self.upload {
            if let Some(extensions) = &upload.allowed_extensions {
                validate_extension_list("upload.allowed_extensions", extensions)?;
            }
            if let Some(max) = upload.max_file_size_bytes {
                validate_positive_number("upload.max_file_size_bytes", max, 1)?;
            }
        }
        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            validate_log_level("logging.level", level)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    #[test]
    fn test_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[store]
path = "/var/lib/reports"

[upload]
allowed_extensions = ["xml", "txt"]
max_file_size_bytes = 1024

[parser]
trim_text = true

[logging]
level = "debug"
json = true
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());

        let settings = config.into_settings();
        assert_eq!(settings.store_path(), "/var/lib/reports");
        assert_eq!(settings.allowed_extensions(), &["xml".to_string(), "txt".to_string()]);
        assert_eq!(settings.max_file_size_bytes(), 1024);
        assert!(settings.parse_options().trim_text);
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert!(settings.json_logs);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = TomlConfig::from_toml_str("").unwrap().into_settings();
        let defaults = Settings::default();
        assert_eq!(settings.store_path, defaults.store_path);
        assert_eq!(settings.allowed_extensions, vec!["xml".to_string()]);
        assert!(!settings.parse.trim_text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("XML_REPORT_ETL_TEST_STORE", "/tmp/from-env");
        let config = TomlConfig::from_toml_str(
            "[store]\npath = \"${XML_REPORT_ETL_TEST_STORE}\"\n",
        )
        .unwrap();
        assert_eq!(config.store.unwrap().path, "/tmp/from-env");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = TomlConfig::from_toml_str("[upload]\nmax_file_size_bytes = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TomlConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[store\npath=").unwrap_err();
        assert!(matches!(err, EtlError::ConfigValidationError { .. }));
    }
}
