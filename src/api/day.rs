use crate::api::{error_response, json_response, HttpRequest, HttpResponse};
use crate::domain::ports::CatchReader;
use serde_json::Value;

/// GET /v1/day?date=&facility=
///
/// Single daily summary. The date is used verbatim as part of the storage
/// key; an unknown or malformed date simply finds nothing.
pub async fn handle<R: CatchReader>(
    reader: &R,
    facility: &str,
    request: &HttpRequest,
) -> HttpResponse {
    let Some(date) = request.param("date").map(str::trim).filter(|d| !d.is_empty()) else {
        return error_response(400, "missing query param: date (YYYY-MM-DD)");
    };

    let item = match reader.get_day(facility, date).await {
        Ok(item) => item,
        Err(e) => {
            tracing::error!(error = %e, date, "day lookup failed");
            return error_response(500, "internal error");
        }
    };

    let Some(mut item) = item else {
        return error_response(404, "not found");
    };

    // internal table keys are of no use to clients
    item.remove("PK");
    item.remove("SK");

    json_response(200, &Value::Object(item))
}
