use crate::core::Pipeline;
use crate::domain::model::StoredReport;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<StoredReport> {
        tracing::debug!("Extracting document...");
        let document = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Extracted {} ({} bytes)",
            document.file_name,
            document.bytes.len()
        );

        tracing::debug!("Transforming document...");
        let report = self.pipeline.transform(document).await?;

        tracing::debug!("Loading report...");
        let saved = self.pipeline.load(report).await?;
        tracing::info!("💾 Report {} saved for {}", saved.id, saved.file_name);

        Ok(saved)
    }
}
