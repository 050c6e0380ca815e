use async_trait::async_trait;
use catch_stats::api::{ApiRouter, HttpRequest};
use catch_stats::domain::model::StoredItem;
use catch_stats::domain::ports::CatchReader;
use catch_stats::utils::dates::ymd_dash;
use catch_stats::utils::keys::{catch_pk, catch_sk, daily_pk, daily_sk, date_from_sk};
use chrono::NaiveDate;
use serde_json::{json, Value};

/// In-memory stand-in for the DynamoDB store. Series results are returned
/// deliberately unsorted to exercise the handler's ordering.
#[derive(Default)]
struct MemoryReader {
    catches: Vec<StoredItem>,
    dailies: Vec<StoredItem>,
}

impl MemoryReader {
    fn with_catch(mut self, facility: &str, fish: &str, date: &str, slot: u8, count: i64) -> Self {
        let mut item = StoredItem::new();
        item.insert("PK".into(), json!(catch_pk(facility, fish)));
        item.insert("SK".into(), json!(catch_sk(date, slot, Some("pier"))));
        item.insert("fish".into(), json!(fish));
        item.insert("count".into(), json!(count));
        item.insert("unit".into(), json!("cm"));
        item.insert("place".into(), json!("pier"));
        self.catches.push(item);
        self
    }

    fn with_daily(mut self, facility: &str, date: &str, weather: &str) -> Self {
        let mut item = StoredItem::new();
        item.insert("PK".into(), json!(daily_pk(facility)));
        item.insert("SK".into(), json!(daily_sk(date)));
        item.insert("facility".into(), json!(facility));
        item.insert("date".into(), json!(date));
        item.insert("weather".into(), json!(weather));
        item.insert("visitors".into(), json!(42));
        self.dailies.push(item);
        self
    }
}

#[async_trait]
impl CatchReader for MemoryReader {
    async fn query_series(
        &self,
        facility: &str,
        fish: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> catch_stats::Result<Vec<StoredItem>> {
        let pk = catch_pk(facility, fish);
        let from = from.map(|d| ymd_dash(d));
        let to = to.map(|d| ymd_dash(d));

        Ok(self
            .catches
            .iter()
            .filter(|item| item.get("PK").and_then(Value::as_str) == Some(pk.as_str()))
            .filter(|item| {
                let date = date_from_sk(item.get("SK").and_then(Value::as_str).unwrap_or(""));
                from.as_deref().map_or(true, |f| date >= f)
                    && to.as_deref().map_or(true, |t| date <= t)
            })
            .cloned()
            .collect())
    }

    async fn get_day(&self, facility: &str, date: &str) -> catch_stats::Result<Option<StoredItem>> {
        let pk = daily_pk(facility);
        let sk = daily_sk(date);
        Ok(self
            .dailies
            .iter()
            .find(|item| {
                item.get("PK").and_then(Value::as_str) == Some(pk.as_str())
                    && item.get("SK").and_then(Value::as_str) == Some(sk.as_str())
            })
            .cloned())
    }
}

fn seeded_router() -> ApiRouter<MemoryReader> {
    let reader = MemoryReader::default()
        .with_catch("honmoku", "mackerel", "2026-03-05", 1, 30)
        .with_catch("honmoku", "mackerel", "2026-03-07", 1, 120)
        .with_catch("honmoku", "mackerel", "2026-03-06", 2, 55)
        .with_catch("honmoku", "flounder", "2026-03-06", 3, 2)
        .with_catch("isogo", "mackerel", "2026-03-06", 1, 9)
        .with_daily("honmoku", "2026-03-06", "cloudy")
        .with_daily("isogo", "2026-03-06", "rain");
    ApiRouter::new(reader, "honmoku".to_string())
}

fn get(path: &str, params: &[(&str, &str)]) -> HttpRequest {
    let qs: serde_json::Map<String, Value> = params
        .iter()
        .map(|(k, v)| (k.to_string(), json!(v)))
        .collect();
    // go through the wire shape the Lambda actually receives
    serde_json::from_value(json!({
        "rawPath": path,
        "queryStringParameters": if params.is_empty() { Value::Null } else { Value::Object(qs) }
    }))
    .unwrap()
}

fn body(response: &catch_stats::api::HttpResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

#[tokio::test]
async fn test_series_sorted_by_date() {
    let router = seeded_router();
    let response = router
        .handle(&get("/v1/series", &[("fish", "mackerel")]))
        .await;

    assert_eq!(response.status_code, 200);
    let payload = body(&response);
    assert_eq!(payload["facility"], "honmoku");
    assert_eq!(payload["fish"], "mackerel");

    let items = payload["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["date"], "2026-03-05");
    assert_eq!(items[1]["date"], "2026-03-06");
    assert_eq!(items[2]["date"], "2026-03-07");
    assert_eq!(items[2]["count"], 120);
    assert_eq!(items[0]["unit"], "cm");
    // minSize was never stored and must surface as null, not be dropped
    assert!(items[0].get("minSize").unwrap().is_null());
}

#[tokio::test]
async fn test_series_date_range_is_inclusive() {
    let router = seeded_router();
    let response = router
        .handle(&get(
            "/v1/series",
            &[("fish", "mackerel"), ("from", "2026-03-06"), ("to", "2026-03-07")],
        ))
        .await;

    let items = body(&response)["items"].as_array().unwrap().clone();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["date"], "2026-03-06");
    assert_eq!(items[1]["date"], "2026-03-07");
}

#[tokio::test]
async fn test_series_from_only() {
    let router = seeded_router();
    let response = router
        .handle(&get(
            "/v1/series",
            &[("fish", "mackerel"), ("from", "2026-03-06")],
        ))
        .await;

    let payload = body(&response);
    assert_eq!(payload["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_series_missing_fish_is_400() {
    let router = seeded_router();
    let response = router.handle(&get("/v1/series", &[])).await;

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response)["error"], "missing query param: fish");
}

#[tokio::test]
async fn test_series_malformed_date_is_400() {
    let router = seeded_router();
    let response = router
        .handle(&get(
            "/v1/series",
            &[("fish", "mackerel"), ("from", "03/06/2026")],
        ))
        .await;

    assert_eq!(response.status_code, 400);
    assert!(body(&response)["error"]
        .as_str()
        .unwrap()
        .contains("expected YYYY-MM-DD"));
}

#[tokio::test]
async fn test_series_facility_override() {
    let router = seeded_router();
    let response = router
        .handle(&get(
            "/v1/series",
            &[("fish", "mackerel"), ("facility", "isogo")],
        ))
        .await;

    let payload = body(&response);
    assert_eq!(payload["facility"], "isogo");
    assert_eq!(payload["items"].as_array().unwrap().len(), 1);
    assert_eq!(payload["items"][0]["count"], 9);
}

#[tokio::test]
async fn test_day_found() {
    let router = seeded_router();
    let response = router
        .handle(&get("/v1/day", &[("date", "2026-03-06")]))
        .await;

    assert_eq!(response.status_code, 200);
    let payload = body(&response);
    assert_eq!(payload["weather"], "cloudy");
    assert_eq!(payload["visitors"], 42);
    // table keys are stripped from the public payload
    assert!(payload.get("PK").is_none());
    assert!(payload.get("SK").is_none());
}

#[tokio::test]
async fn test_day_not_found_is_404() {
    let router = seeded_router();
    let response = router
        .handle(&get("/v1/day", &[("date", "2026-01-01")]))
        .await;

    assert_eq!(response.status_code, 404);
    assert_eq!(body(&response)["error"], "not found");
}

#[tokio::test]
async fn test_day_missing_date_is_400() {
    let router = seeded_router();
    let response = router.handle(&get("/v1/day", &[])).await;

    assert_eq!(response.status_code, 400);
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let router = seeded_router();
    let response = router.handle(&get("/v1/somewhere", &[])).await;

    assert_eq!(response.status_code, 404);
}

#[tokio::test]
async fn test_rest_api_path_field_also_routes() {
    let router = seeded_router();
    let request: HttpRequest = serde_json::from_value(json!({
        "path": "/prod/V1/Day",
        "queryStringParameters": { "date": "2026-03-06" }
    }))
    .unwrap();

    let response = router.handle(&request).await;
    assert_eq!(response.status_code, 200);
}
