use crate::core::assembler::extract_report;
use crate::core::{ConfigProvider, Pipeline, ReportStore, Storage};
use crate::domain::model::{SourceDocument, StoredReport};
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_file_size};

/// 單一上傳檔案的 extract → transform → load 流程
pub struct IngestPipeline<S: Storage, R: ReportStore, C: ConfigProvider> {
    storage: S,
    store: R,
    config: C,
    path: String,
}

impl<S: Storage, R: ReportStore, C: ConfigProvider> IngestPipeline<S, R, C> {
    pub fn new(storage: S, store: R, config: C, path: impl Into<String>) -> Self {
        Self {
            storage,
            store,
            config,
            path: path.into(),
        }
    }

    fn file_name(&self) -> String {
        std::path::Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
            .to_string()
    }
}

#[async_trait::async_trait]
impl<S: Storage, R: ReportStore, C: ConfigProvider> Pipeline for IngestPipeline<S, R, C> {
    async fn extract(&self) -> Result<SourceDocument> {
        let file_name = self.file_name();
        validate_file_extension(&file_name, self.config.allowed_extensions())?;

        tracing::debug!("Reading upload from: {}", self.path);
        let bytes = self.storage.read_file(&self.path).await?;
        validate_file_size(&file_name, bytes.len() as u64, self.config.max_file_size_bytes())?;

        Ok(SourceDocument { file_name, bytes })
    }

    async fn transform(&self, document: SourceDocument) -> Result<StoredReport> {
        let report = match extract_report(&document.bytes, &self.config.parse_options()) {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("⚠️ {}: {}", document.file_name, e);
                return Err(e);
            }
        };

        if report.is_generic() {
            tracing::info!("📄 {}: unrecognized schema, keeping raw tree", document.file_name);
        } else if let Some(normalized) = report.as_normalized() {
            tracing::info!(
                "📊 {}: credit report with {} card accounts, {} addresses",
                document.file_name,
                normalized.credit_card_accounts.len(),
                normalized.addresses.len()
            );
        }

        Ok(StoredReport::new(document.file_name, report))
    }

    async fn load(&self, report: StoredReport) -> Result<StoredReport> {
        let saved = self.store.insert(report).await?;
        tracing::debug!("Saved report {} ({})", saved.id, saved.file_name);
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::{DocumentReportStore, MemoryStorage};
    use crate::config::Settings;
    use crate::utils::error::EtlError;

    const CREDIT_REPORT: &str = r#"<INProfileResponse>
        <SCORE><BureauScore>719</BureauScore></SCORE>
        <CAIS_Account><CAIS_Account_DETAILS>
            <Account_Type>10</Account_Type>
            <Current_Balance>1500</Current_Balance>
        </CAIS_Account_DETAILS></CAIS_Account>
    </INProfileResponse>"#;

    async fn pipeline_for(
        path: &str,
        content: &[u8],
    ) -> IngestPipeline<MemoryStorage, DocumentReportStore<MemoryStorage>, Settings> {
        let uploads = MemoryStorage::new();
        uploads.write_file(path, content).await.unwrap();
        let store = DocumentReportStore::new(MemoryStorage::new());
        IngestPipeline::new(uploads, store, Settings::default(), path)
    }

    #[tokio::test]
    async fn test_extract_reads_document_with_base_name() {
        let pipeline = pipeline_for("uploads/report.xml", CREDIT_REPORT.as_bytes()).await;
        let document = pipeline.extract().await.unwrap();
        assert_eq!(document.file_name, "report.xml");
        assert_eq!(document.bytes, CREDIT_REPORT.as_bytes());
    }

    #[tokio::test]
    async fn test_extract_rejects_non_xml_files() {
        let pipeline = pipeline_for("report.json", b"{}").await;
        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_extract_rejects_oversized_files() {
        let uploads = MemoryStorage::new();
        uploads.write_file("big.xml", &[b' '; 64]).await.unwrap();
        let config = Settings {
            max_file_size_bytes: 16,
            ..Settings::default()
        };
        let pipeline = IngestPipeline::new(
            uploads,
            DocumentReportStore::new(MemoryStorage::new()),
            config,
            "big.xml",
        );

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_transform_stamps_identity_fields() {
        let pipeline = pipeline_for("report.xml", CREDIT_REPORT.as_bytes()).await;
        let document = pipeline.extract().await.unwrap();
        let stored = pipeline.transform(document).await.unwrap();

        assert_eq!(stored.file_name, "report.xml");
        let normalized = stored.report.as_normalized().unwrap();
        assert_eq!(normalized.identity.credit_score, 719);
        assert_eq!(normalized.credit_card_accounts[0].current_balance, 1500);
    }

    #[tokio::test]
    async fn test_transform_malformed_document_fails() {
        let pipeline = pipeline_for("broken.xml", b"<INProfileResponse><SCORE>").await;
        let document = pipeline.extract().await.unwrap();
        let err = pipeline.transform(document).await.unwrap_err();
        assert!(matches!(err, EtlError::DocumentMalformed { .. }));
    }
}
