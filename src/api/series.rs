use crate::api::{error_response, json_response, HttpRequest, HttpResponse};
use crate::domain::model::SeriesPoint;
use crate::domain::ports::CatchReader;
use crate::utils::dates::parse_ymd;
use crate::utils::keys::date_from_sk;
use chrono::NaiveDate;
use serde_json::{json, Value};

/// GET /v1/series?fish=&facility=&from=&to=
///
/// Per-fish time series over the catch table, sorted by date ascending.
pub async fn handle<R: CatchReader>(
    reader: &R,
    facility: &str,
    request: &HttpRequest,
) -> HttpResponse {
    let Some(fish) = request.param("fish").map(str::trim).filter(|f| !f.is_empty()) else {
        return error_response(400, "missing query param: fish");
    };

    let from = match parse_date_param(request, "from") {
        Ok(date) => date,
        Err(response) => return response,
    };
    let to = match parse_date_param(request, "to") {
        Ok(date) => date,
        Err(response) => return response,
    };

    let mut items = match reader.query_series(facility, fish, from, to).await {
        Ok(items) => items,
        Err(e) => {
            tracing::error!(error = %e, fish, "series query failed");
            return error_response(500, "internal error");
        }
    };

    // Sort keys carry the date, so items mostly arrive ordered; not
    // guaranteed across pages though.
    items.sort_by(|a, b| sk_date(a).cmp(&sk_date(b)));

    let points: Vec<SeriesPoint> = items
        .iter()
        .map(|item| SeriesPoint {
            date: sk_date(item),
            count: item.get("count").cloned().unwrap_or(Value::Null),
            min_size: item.get("minSize").cloned().unwrap_or(Value::Null),
            max_size: item.get("maxSize").cloned().unwrap_or(Value::Null),
            unit: item.get("unit").cloned().unwrap_or(Value::Null),
            place: item.get("place").cloned().unwrap_or(Value::Null),
        })
        .collect();

    json_response(
        200,
        &json!({
            "facility": facility,
            "fish": fish,
            "items": points,
        }),
    )
}

fn sk_date(item: &serde_json::Map<String, Value>) -> String {
    let sk = item.get("SK").and_then(Value::as_str).unwrap_or("");
    date_from_sk(sk).to_string()
}

fn parse_date_param(
    request: &HttpRequest,
    name: &str,
) -> Result<Option<NaiveDate>, HttpResponse> {
    match request.param(name) {
        None => Ok(None),
        Some(value) => parse_ymd(value).map(Some).map_err(|_| {
            error_response(
                400,
                &format!("invalid query param: {} (expected YYYY-MM-DD)", name),
            )
        }),
    }
}
