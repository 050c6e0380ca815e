use crate::domain::model::{DailyRecord, FetchedPosts, FishCatch, QueryKind, StoredItem};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

/// Upstream source of posts (AppSync in production, a mock server in tests).
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn fetch_posts(
        &self,
        kind: QueryKind,
        facility: &str,
        date: NaiveDate,
    ) -> Result<FetchedPosts>;
}

/// Write-once archive for raw upstream responses (S3 or a local directory).
#[async_trait]
pub trait RawArchive: Send + Sync {
    async fn put_json(&self, key: &str, body: &Value) -> Result<()>;
}

/// Write side of the normalized catch data.
#[async_trait]
pub trait CatchWriter: Send + Sync {
    async fn put_daily(&self, record: &DailyRecord) -> Result<()>;
    async fn put_catches(&self, catches: &[FishCatch]) -> Result<()>;
}

/// Read side, backing the query API.
#[async_trait]
pub trait CatchReader: Send + Sync {
    /// Items for one `(facility, fish)` partition, optionally bounded by an
    /// inclusive date range. Ordering is not guaranteed; callers sort.
    async fn query_series(
        &self,
        facility: &str,
        fish: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<StoredItem>>;

    async fn get_day(&self, facility: &str, date: &str) -> Result<Option<StoredItem>>;
}

/// Operator notification channel (SES in production).
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}
