use crate::core::xml::ParseOptions;
use crate::domain::model::{SourceDocument, StoredReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 列出目錄下的檔案（相對路徑），目錄不存在時回傳空集合
    fn list_files(&self, dir: &str)
        -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
    fn delete_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// 報告的持久化協作者：原樣存取 `StoredReport`
pub trait ReportStore: Send + Sync {
    fn insert(
        &self,
        report: StoredReport,
    ) -> impl std::future::Future<Output = Result<StoredReport>> + Send;
    /// 依建立時間由新到舊
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<StoredReport>>> + Send;
    fn get(&self, id: Uuid) -> impl std::future::Future<Output = Result<StoredReport>> + Send;
    fn delete(&self, id: Uuid) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn store_path(&self) -> &str;
    fn allowed_extensions(&self) -> &[String];
    fn max_file_size_bytes(&self) -> u64;
    fn parse_options(&self) -> ParseOptions;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceDocument>;
    async fn transform(&self, document: SourceDocument) -> Result<StoredReport>;
    async fn load(&self, report: StoredReport) -> Result<StoredReport>;
}
