use serde_json::Value;

/// Best-effort integer extraction for upstream fields that arrive as
/// numbers, numeric strings, floats, empty strings, or null.
pub fn lenient_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().map(|f| f.trunc() as i64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(lenient_int(&json!(42)), Some(42));
        assert_eq!(lenient_int(&json!(-3)), Some(-3));
        assert_eq!(lenient_int(&json!(12.9)), Some(12));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(lenient_int(&json!("42")), Some(42));
        assert_eq!(lenient_int(&json!(" 17 ")), Some(17));
        assert_eq!(lenient_int(&json!("12.5")), Some(12));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(lenient_int(&json!("")), None);
        assert_eq!(lenient_int(&json!("   ")), None);
        assert_eq!(lenient_int(&json!("many")), None);
        assert_eq!(lenient_int(&json!(null)), None);
        assert_eq!(lenient_int(&json!([1])), None);
        assert_eq!(lenient_int(&json!(true)), None);
    }
}
