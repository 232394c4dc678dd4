use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Parser)]
#[command(name = "xml-report-etl")]
#[command(about = "Normalize XML credit reports into stored JSON records")]
pub struct CliConfig {
    /// TOML 設定檔路徑
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 覆寫報告儲存目錄
    #[arg(long, global = true)]
    pub store_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Parse XML files and store the extracted reports
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List stored reports, newest first
    List,
    /// Print one stored report as JSON
    Show { id: Uuid },
    /// Delete a stored report
    Delete { id: Uuid },
}

impl CliConfig {
    /// 設定檔為底，CLI 旗標優先
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let file_config = TomlConfig::from_file(path)?;
                file_config.validate()?;
                file_config.into_settings()
            }
            None => Settings::default(),
        };

        if let Some(store_path) = &self.store_path {
            settings.store_path = store_path.clone();
        }
        if self.json_logs {
            settings.json_logs = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}
