#[cfg(feature = "cli")]
pub mod cli;
pub mod store;
pub mod toml_config;

use crate::core::xml::ParseOptions;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_extension_list, validate_log_level, validate_path, validate_positive_number, Validate,
};

pub const DEFAULT_STORE_PATH: &str = "./report-store";
pub const DEFAULT_MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// 合併 CLI 旗標與設定檔之後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub store_path: String,
    pub allowed_extensions: Vec<String>,
    pub max_file_size_bytes: u64,
    pub parse: ParseOptions,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: DEFAULT_STORE_PATH.to_string(),
            allowed_extensions: vec!["xml".to_string()],
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            parse: ParseOptions::default(),
            log_level: None,
            json_logs: false,
        }
    }
}

impl ConfigProvider for Settings {
    fn store_path(&self) -> &str {
        &self.store_path
    }

    fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    fn parse_options(&self) -> ParseOptions {
        self.parse
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("store_path", &self.store_path)?;
        validate_extension_list("allowed_extensions", &self.allowed_extensions)?;
        validate_positive_number("max_file_size_bytes", self.max_file_size_bytes, 1)?;
        if let Some(level) = &self.log_level {
            validate_log_level("log_level", level)?;
        }
        Ok(())
    }
}
