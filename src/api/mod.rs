//! HTTP/JSON query API served behind API Gateway.
//!
//! The event shape covers both HTTP APIs (`rawPath`) and REST APIs
//! (`path`); responses use the Lambda proxy contract.

pub mod day;
pub mod series;

use crate::domain::ports::CatchReader;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HttpRequest {
    pub raw_path: Option<String>,
    pub path: Option<String>,
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl HttpRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|qs| qs.get(name))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

pub fn json_response(status: u16, body: &Value) -> HttpResponse {
    let mut headers = HashMap::new();
    headers.insert(
        "content-type".to_string(),
        "application/json; charset=utf-8".to_string(),
    );
    HttpResponse {
        status_code: status,
        headers,
        body: body.to_string(),
    }
}

pub fn error_response(status: u16, message: &str) -> HttpResponse {
    json_response(status, &serde_json::json!({ "error": message }))
}

/// Routes requests to the series/day handlers by path suffix.
pub struct ApiRouter<R: CatchReader> {
    reader: R,
    default_facility: String,
}

impl<R: CatchReader> ApiRouter<R> {
    pub fn new(reader: R, default_facility: String) -> Self {
        Self {
            reader,
            default_facility,
        }
    }

    /// Facility from the query string, falling back to the configured
    /// default. Stray whitespace comes in from hand-typed URLs.
    fn facility<'a>(&'a self, request: &'a HttpRequest) -> &'a str {
        match request.param("facility").map(str::trim) {
            Some(f) if !f.is_empty() => f,
            _ => &self.default_facility,
        }
    }

    pub async fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let path = request
            .raw_path
            .as_deref()
            .or(request.path.as_deref())
            .unwrap_or("")
            .to_lowercase();

        tracing::debug!(path, "routing request");

        if path.ends_with("/v1/series") {
            series::handle(&self.reader, self.facility(request), request).await
        } else if path.ends_with("/v1/day") {
            day::handle(&self.reader, self.facility(request), request).await
        } else {
            error_response(404, "not found")
        }
    }
}
