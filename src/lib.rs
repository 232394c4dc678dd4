pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};
pub use config::store::{DocumentReportStore, LocalStorage, MemoryStorage};
pub use config::Settings;

pub use crate::core::assembler::{assemble, extract_report};
pub use crate::core::{etl::EtlEngine, pipeline::IngestPipeline};
pub use domain::model::{ExtractedReport, GenericRecord, NormalizedReport, ParsedTree, StoredReport};
pub use utils::error::{EtlError, Result};
