use crate::domain::model::{FetchedPosts, QueryKind, RawPost};
use crate::domain::ports::PostSource;
use crate::utils::dates::ymd_slash;
use crate::utils::error::{Result, StatsError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::Duration;

const MAX_ATTEMPTS: usize = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Morning conditions post for a facility and date.
const FIELD_CONDITION_QUERY: &str = r#"
query FirstPostsByFacilityAndDate($facility: String!, $date: ModelStringKeyConditionInput, $sortDirection: ModelSortDirection, $filter: ModelFirstPostFilterInput, $limit: Int, $nextToken: String) {
  firstPostsByFacilityAndDate(
    facility: $facility
    date: $date
    sortDirection: $sortDirection
    filter: $filter
    limit: $limit
    nextToken: $nextToken
  ) {
    items {
      id
      date
      facility
      sentence
      weather
      temp
      waterTemp
      windDirection
      windSpeed
      tide
      highTide
      lowTide
      warning
      advisory
      images
      createdAt
      updatedAt
      __typename
    }
    nextToken
    __typename
  }
}
"#;

/// Intraday progress posts.
const FISHING_REPORT_QUERY: &str = r#"
query MiddlePostsByFacilityAndDate($facility: String!, $date: ModelStringKeyConditionInput, $sortDirection: ModelSortDirection, $filter: ModelMiddlePostFilterInput, $limit: Int, $nextToken: String) {
  middlePostsByFacilityAndDate(
    facility: $facility
    date: $date
    sortDirection: $sortDirection
    filter: $filter
    limit: $limit
    nextToken: $nextToken
  ) {
    items {
      id
      date
      time
      facility
      sentence
      weather
      images
      createdAt
      updatedAt
      __typename
    }
    nextToken
    __typename
  }
}
"#;

/// End-of-day catch-count post. The schema flattens up to 30 fish slots
/// into `fish{N}...` field groups, so the selection set is generated.
fn catch_count_query() -> &'static str {
    static QUERY: OnceLock<String> = OnceLock::new();
    QUERY.get_or_init(|| {
        let mut fish_fields = String::new();
        for i in 1..=30 {
            fish_fields.push_str(&format!(
                "      fish{i}Name fish{i}MinSize fish{i}MaxSize fish{i}Unit fish{i}Count fish{i}Place\n"
            ));
        }
        format!(
            r#"
query LastPostsByFacilityAndDate($facility: String!, $date: ModelStringKeyConditionInput, $sortDirection: ModelSortDirection, $filter: ModelLastPostFilterInput, $limit: Int, $nextToken: String) {{
  lastPostsByFacilityAndDate(
    facility: $facility
    date: $date
    sortDirection: $sortDirection
    filter: $filter
    limit: $limit
    nextToken: $nextToken
  ) {{
    items {{
      id
      date
      month
      facility
      sentence
      weather
      waterTemp
      tide
      visitors
{fish_fields}      images
      createdAt
      updatedAt
      __typename
    }}
    nextToken
    __typename
  }}
}}
"#
        )
    })
}

fn query_for(kind: QueryKind) -> &'static str {
    match kind {
        QueryKind::CatchCount => catch_count_query(),
        QueryKind::FieldCondition => FIELD_CONDITION_QUERY,
        QueryKind::FishingReport => FISHING_REPORT_QUERY,
    }
}

/// GraphQL-over-HTTP client for the upstream AppSync endpoint.
#[derive(Debug, Clone)]
pub struct AppSyncClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AppSyncClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// POST one GraphQL document, retrying transient failures. A response
    /// carrying an `errors` array counts as a failure even on HTTP 200.
    pub async fn post(&self, query: &str, variables: Value) -> Result<Value> {
        let payload = json!({ "query": query, "variables": variables });

        let mut last_err: Option<StatsError> = None;
        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_post(&payload).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "AppSync request failed");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| StatsError::GraphQlError {
            message: "request failed without an attempt".to_string(),
        }))
    }

    async fn try_post(&self, payload: &Value) -> Result<Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("content-type", "application/json; charset=UTF-8")
            .header("x-api-key", &self.api_key)
            .header("accept", "application/json")
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let data: Value = response.json().await?;
        if let Some(errors) = data.get("errors") {
            return Err(StatsError::GraphQlError {
                message: errors.to_string(),
            });
        }
        Ok(data)
    }
}

#[async_trait]
impl PostSource for AppSyncClient {
    async fn fetch_posts(
        &self,
        kind: QueryKind,
        facility: &str,
        date: NaiveDate,
    ) -> Result<FetchedPosts> {
        let variables = json!({
            "facility": facility,
            "date": { "eq": ymd_slash(date) },
        });

        tracing::debug!(kind = kind.as_str(), facility, date = %date, "fetching posts");
        let raw = self.post(query_for(kind), variables).await?;

        let items = raw
            .get("data")
            .and_then(|d| d.get(kind.items_root()))
            .and_then(|conn| conn.get("items"))
            .cloned()
            .ok_or_else(|| StatsError::GraphQlError {
                message: format!("response missing data.{}.items", kind.items_root()),
            })?;
        let items: Vec<RawPost> = serde_json::from_value(items)?;

        Ok(FetchedPosts { raw, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_catch_count_query_covers_all_slots() {
        let query = catch_count_query();
        assert!(query.contains("lastPostsByFacilityAndDate"));
        assert!(query.contains("fish1Name"));
        assert!(query.contains("fish30Place"));
        assert!(!query.contains("fish31Name"));
    }

    #[tokio::test]
    async fn test_fetch_posts_extracts_items() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("x-api-key", "secret");
            then.status(200).json_body(serde_json::json!({
                "data": { "lastPostsByFacilityAndDate": {
                    "items": [
                        {"id": "a", "weather": "sunny", "updatedAt": "2026-03-07T10:00:00Z"},
                        {"id": "b", "weather": "cloudy", "updatedAt": "2026-03-07T18:00:00Z"}
                    ],
                    "nextToken": null
                }}
            }));
        });

        let client = AppSyncClient::new(server.url("/graphql"), "secret").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let fetched = client
            .fetch_posts(QueryKind::CatchCount, "honmoku", date)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].str_field("id"), Some("a"));
        assert!(fetched.raw.get("data").is_some());
    }

    #[tokio::test]
    async fn test_graphql_errors_fail_even_with_http_200() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "errors": [{"message": "Validation error"}]
            }));
        });

        let client = AppSyncClient::new(server.url("/graphql"), "secret").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let result = client
            .fetch_posts(QueryKind::CatchCount, "honmoku", date)
            .await;

        // all attempts are burned on the persistent error
        mock.assert_hits(3);
        assert!(matches!(result, Err(StatsError::GraphQlError { .. })));
    }

    #[tokio::test]
    async fn test_empty_item_list_is_not_an_error() {
        let server = MockServer::start();
        let ok = server.mock(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(serde_json::json!({
                "data": { "firstPostsByFacilityAndDate": { "items": [], "nextToken": null } }
            }));
        });

        let client = AppSyncClient::new(server.url("/graphql"), "secret").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let fetched = client
            .fetch_posts(QueryKind::FieldCondition, "honmoku", date)
            .await
            .unwrap();

        ok.assert();
        assert!(fetched.items.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_exhausts_attempts() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/down");
            then.status(502);
        });

        let client = AppSyncClient::new(server.url("/down"), "secret").unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let result = client
            .fetch_posts(QueryKind::FishingReport, "honmoku", date)
            .await;

        mock.assert_hits(3);
        assert!(result.is_err());
    }
}
