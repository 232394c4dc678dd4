pub mod account_processor;
pub mod assembler;
pub mod classifier;
pub mod coerce;
pub mod etl;
pub mod field_mapper;
pub mod navigator;
pub mod pipeline;
pub mod xml;

pub use crate::domain::model::{ExtractedReport, ParsedTree, SourceDocument, StoredReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, ReportStore, Storage};
pub use crate::utils::error::Result;
