//! Turns raw upstream posts into the normalized records the store keeps.

use crate::domain::model::{DailySummary, FishCatch, FishingReportEntry, RawPost};
use crate::utils::error::{Result, StatsError};
use crate::utils::numbers::lenient_int;
use serde_json::{Map, Value};

/// Maximum number of flat fish slots on a catch-count post.
pub const FISH_SLOTS: u8 = 30;

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Posts get edited and reposted during the day; the newest `updatedAt`
/// wins. An empty list is an error because the caller requires the post.
pub fn pick_latest(items: Vec<RawPost>) -> Result<RawPost> {
    items
        .into_iter()
        .max_by(|a, b| a.updated_at().cmp(b.updated_at()))
        .ok_or_else(|| StatsError::ProcessingError {
            message: "no posts returned".to_string(),
        })
}

/// Daily summary out of the catch-count post. The facility always posts
/// weather, water temperature, tide, and visitor count with the tallies;
/// if any is absent the post is incomplete and the date fails.
pub fn normalize_catch_count(item: &RawPost, facility: &str, date: &str) -> Result<DailySummary> {
    let required = ["weather", "waterTemp", "tide", "visitors"];
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| is_missing(item.field(name)))
        .collect();
    if !missing.is_empty() {
        return Err(StatsError::ProcessingError {
            message: format!("missing required fields in catch count: {:?}", missing),
        });
    }

    Ok(DailySummary {
        facility: facility.to_string(),
        date: date.to_string(),
        weather: item.field("weather").cloned().unwrap_or(Value::Null),
        water_temp: item.field("waterTemp").cloned().unwrap_or(Value::Null),
        tide: item.field("tide").cloned().unwrap_or(Value::Null),
        visitors: item.field("visitors").and_then(lenient_int),
        sentence: item.str_field("sentence").map(str::to_string),
        source_id: item.str_field("id").map(str::to_string),
        updated_at: item.str_field("updatedAt").map(str::to_string),
        extra: Map::new(),
    })
}

/// Per-fish records out of the flat `fish{N}...` slot groups. Unnamed slots
/// are skipped; a day with zero named slots is legitimate (nobody caught
/// anything worth reporting).
pub fn normalize_fishes(item: &RawPost, facility: &str, date: &str) -> Vec<FishCatch> {
    let mut fishes = Vec::new();
    for slot in 1..=FISH_SLOTS {
        let name = match item.str_field(&format!("fish{}Name", slot)) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let num = |suffix: &str| {
            item.field(&format!("fish{}{}", slot, suffix))
                .and_then(lenient_int)
        };
        let text = |suffix: &str| {
            item.str_field(&format!("fish{}{}", slot, suffix))
                .map(str::to_string)
        };

        fishes.push(FishCatch {
            facility: facility.to_string(),
            date: date.to_string(),
            fish: name,
            count: num("Count"),
            min_size: num("MinSize"),
            max_size: num("MaxSize"),
            unit: text("Unit"),
            place: text("Place"),
            slot,
        });
    }
    fishes
}

/// Flatten the morning conditions post into fields that merge onto the
/// daily summary. Names are prefixed/suffixed to avoid colliding with the
/// catch-count fields.
pub fn normalize_field_condition(item: &RawPost) -> Map<String, Value> {
    let mut out = Map::new();
    let mut copy = |target: &str, source: &str| {
        out.insert(
            target.to_string(),
            item.field(source).cloned().unwrap_or(Value::Null),
        );
    };

    copy("firstSentence", "sentence");
    copy("firstWeather", "weather");
    copy("temp", "temp");
    copy("waterTempFirst", "waterTemp");
    copy("windDirection", "windDirection");
    copy("windSpeed", "windSpeed");
    copy("tideFirst", "tide");
    copy("highTide", "highTide");
    copy("lowTide", "lowTide");
    copy("warning", "warning");
    copy("advisory", "advisory");
    copy("firstSourceId", "id");
    copy("firstUpdatedAt", "updatedAt");
    out
}

/// Compact, time-ordered log of the intraday posts.
pub fn normalize_fishing_reports(items: &[RawPost]) -> Vec<FishingReportEntry> {
    let mut sorted: Vec<&RawPost> = items.iter().collect();
    sorted.sort_by_key(|it| {
        (
            it.str_field("time").unwrap_or("").to_string(),
            it.updated_at().to_string(),
        )
    });

    sorted
        .into_iter()
        .map(|it| FishingReportEntry {
            time: it.str_field("time").map(str::to_string),
            sentence: it.str_field("sentence").map(str::to_string),
            weather: it.str_field("weather").map(str::to_string),
            source_id: it.str_field("id").map(str::to_string),
            updated_at: it.str_field("updatedAt").map(str::to_string),
        })
        .collect()
}
