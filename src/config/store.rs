use crate::core::{ReportStore, Storage, StoredReport};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// 以本機目錄為根的檔案存取
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(self.full_path(path)).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.full_path(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(self.full_path(dir)).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                files.push(format!("{}/{}", dir.trim_end_matches('/'), name));
            }
        }
        files.sort();
        Ok(files)
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        tokio::fs::remove_file(self.full_path(path)).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.full_path(path)).await?)
    }
}

/// 記憶體內的檔案存取，測試與 dry run 用
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self.files.lock().await;
        files.get(path).cloned().ok_or_else(|| {
            EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut files = self.files.lock().await;
        files.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn list_files(&self, dir: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        let files = self.files.lock().await;
        let mut matching: Vec<String> = files
            .keys()
            .filter(|path| {
                path.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
            })
            .cloned()
            .collect();
        matching.sort();
        Ok(matching)
    }

    async fn delete_file(&self, path: &str) -> Result<()> {
        let mut files = self.files.lock().await;
        files.remove(path).map(|_| ()).ok_or_else(|| {
            EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.lock().await.contains_key(path))
    }
}

const REPORTS_DIR: &str = "reports";

/// 每份報告一個 JSON 文件：`reports/<id>.json`
#[derive(Debug, Clone)]
pub struct DocumentReportStore<S: Storage> {
    storage: S,
}

impl<S: Storage> DocumentReportStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn document_path(id: Uuid) -> String {
        format!("{}/{}.json", REPORTS_DIR, id)
    }

    async fn read_document(&self, path: &str) -> Result<StoredReport> {
        let data = self.storage.read_file(path).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl<S: Storage> ReportStore for DocumentReportStore<S> {
    async fn insert(&self, report: StoredReport) -> Result<StoredReport> {
        let data = serde_json::to_vec_pretty(&report)?;
        self.storage
            .write_file(&Self::document_path(report.id), &data)
            .await?;
        Ok(report)
    }

    async fn list(&self) -> Result<Vec<StoredReport>> {
        let mut reports = Vec::new();
        for path in self.storage.list_files(REPORTS_DIR).await? {
            if !path.ends_with(".json") {
                continue;
            }
            let report = self.read_document(&path).await.map_err(|e| {
                tracing::error!("❌ Unreadable report {}: {}", path, e);
                e
            })?;
            reports.push(report);
        }

        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reports)
    }

    async fn get(&self, id: Uuid) -> Result<StoredReport> {
        let path = Self::document_path(id);
        if !self.storage.exists(&path).await? {
            return Err(EtlError::NotFound { id: id.to_string() });
        }
        self.read_document(&path).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let path = Self::document_path(id);
        if !self.storage.exists(&path).await? {
            return Err(EtlError::NotFound { id: id.to_string() });
        }
        self.storage.delete_file(&path).await?;
        tracing::debug!("Deleted report {}", id);
        Ok(())
    }
}
