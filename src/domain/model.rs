use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One post as returned by the upstream AppSync API. The catch-count posts
/// carry up to 30 flat `fish{N}...` field groups, so the shape is kept as a
/// raw field map and read by name during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl RawPost {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    /// Posts may be edited and reposted; `updatedAt` decides which one wins.
    /// Missing timestamps sort before everything else.
    pub fn updated_at(&self) -> &str {
        self.str_field("updatedAt").unwrap_or("")
    }
}

/// Raw response plus the item list extracted from it. The raw response is
/// archived verbatim; the items feed normalization.
#[derive(Debug, Clone)]
pub struct FetchedPosts {
    pub raw: Value,
    pub items: Vec<RawPost>,
}

/// The three post kinds the upstream API serves for a `(facility, date)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// End-of-day post with the per-fish tallies. Required.
    CatchCount,
    /// Morning conditions post (weather, wind, tides). Optional.
    FieldCondition,
    /// Intraday progress posts. Optional.
    FishingReport,
}

impl QueryKind {
    /// Name used for archive object keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::CatchCount => "catch_count",
            QueryKind::FieldCondition => "field_condition",
            QueryKind::FishingReport => "fishing_report",
        }
    }

    /// Root field of the GraphQL response holding the item connection.
    pub fn items_root(&self) -> &'static str {
        match self {
            QueryKind::CatchCount => "lastPostsByFacilityAndDate",
            QueryKind::FieldCondition => "firstPostsByFacilityAndDate",
            QueryKind::FishingReport => "middlePostsByFacilityAndDate",
        }
    }
}

/// Normalized per-day summary extracted from the catch-count post.
/// Serialized field names are the stored attribute names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub facility: String,
    pub date: String,
    pub weather: Value,
    pub water_temp: Value,
    pub tide: Value,
    pub visitors: Option<i64>,
    pub sentence: Option<String>,
    pub source_id: Option<String>,
    pub updated_at: Option<String>,
    /// Extra fields merged in from the optional field-condition post.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Full daily item as persisted: the summary plus bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(flatten)]
    pub summary: DailySummary,
    /// Archive keys of the raw responses this record was built from.
    pub raw_keys: BTreeMap<String, String>,
    pub fishing_report_log: Vec<FishingReportEntry>,
}

/// One fish slot out of a catch-count post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishCatch {
    pub facility: String,
    pub date: String,
    pub fish: String,
    pub count: Option<i64>,
    pub min_size: Option<i64>,
    pub max_size: Option<i64>,
    pub unit: Option<String>,
    pub place: Option<String>,
    pub slot: u8,
}

/// One intraday progress post, kept as a compact log entry on the daily item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FishingReportEntry {
    pub time: Option<String>,
    pub sentence: Option<String>,
    pub weather: Option<String>,
    pub source_id: Option<String>,
    pub updated_at: Option<String>,
}

/// One point of the `/v1/series` response. Values pass through from storage;
/// absent attributes serialize as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: String,
    pub count: Value,
    pub min_size: Value,
    pub max_size: Value,
    pub unit: Value,
    pub place: Value,
}

/// Stored item as read back from the catch store, internal keys included.
pub type StoredItem = Map<String, Value>;
