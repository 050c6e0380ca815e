use crate::utils::error::{Result, StatsError};
use serde_json::Value;

fn secret_error(secret_id: &str, reason: String) -> StatsError {
    StatsError::InvalidConfigValueError {
        field: "appsync_api_key_secret_id".to_string(),
        value: secret_id.to_string(),
        reason,
    }
}

/// Resolve the AppSync API key from a Secrets Manager secret holding a JSON
/// document with an `apiKey` field. The secret id may be a name or an ARN.
pub async fn resolve_api_key(config: &aws_config::SdkConfig, secret_id: &str) -> Result<String> {
    let client = aws_sdk_secretsmanager::Client::new(config);

    let output = client
        .get_secret_value()
        .secret_id(secret_id)
        .send()
        .await
        .map_err(|e| secret_error(secret_id, format!("failed to read secret: {}", e)))?;

    let secret = output
        .secret_string()
        .ok_or_else(|| secret_error(secret_id, "secret has no string value".to_string()))?;

    let parsed: Value = serde_json::from_str(secret)
        .map_err(|e| secret_error(secret_id, format!("secret is not valid JSON: {}", e)))?;

    parsed
        .get("apiKey")
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or_else(|| secret_error(secret_id, "secret JSON has no apiKey field".to_string()))
}
