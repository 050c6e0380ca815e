use crate::domain::model::{DailyRecord, FishCatch};
use crate::domain::ports::{CatchWriter, Notifier, RawArchive};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Filesystem backend for local dry runs: raw responses and normalized
/// records land under `base_path` instead of S3/DynamoDB.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[async_trait]
impl RawArchive for LocalStorage {
    async fn put_json(&self, key: &str, body: &Value) -> Result<()> {
        let data = serde_json::to_vec_pretty(body)?;
        self.write_file(key, &data)
    }
}

#[async_trait]
impl CatchWriter for LocalStorage {
    async fn put_daily(&self, record: &DailyRecord) -> Result<()> {
        let path = format!(
            "daily/{}/{}.json",
            record.summary.facility, record.summary.date
        );
        let data = serde_json::to_vec_pretty(record)?;
        self.write_file(&path, &data)
    }

    async fn put_catches(&self, catches: &[FishCatch]) -> Result<()> {
        let Some(first) = catches.first() else {
            tracing::debug!("no catches to write");
            return Ok(());
        };
        let path = format!("catches/{}/{}.json", first.facility, first.date);
        let data = serde_json::to_vec_pretty(catches)?;
        self.write_file(&path, &data)
    }
}

/// Notifier for local runs: the report goes to the log instead of SES.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        tracing::info!(subject, "notification:\n{}", body);
        Ok(())
    }
}
