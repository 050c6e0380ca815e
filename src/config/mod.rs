#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

use crate::utils::dates::{date_range, parse_ymd, yesterday_jst};
use crate::utils::error::{Result, StatsError};
use chrono::NaiveDate;

/// Resolve which dates a run targets. An explicit range wins, then a single
/// target date, then yesterday in the facility's timezone.
pub fn resolve_target_dates(
    target_date: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Result<Vec<NaiveDate>> {
    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            let start = parse_ymd(start)?;
            let end = parse_ymd(end)?;
            if start > end {
                return Err(StatsError::InvalidConfigValueError {
                    field: "start_date".to_string(),
                    value: start.to_string(),
                    reason: format!("must be on or before end_date ({})", end),
                });
            }
            Ok(date_range(start, end))
        }
        (None, None) => match target_date {
            Some(target) => Ok(vec![parse_ymd(target)?]),
            None => Ok(vec![yesterday_jst()]),
        },
        _ => Err(StatsError::InvalidConfigValueError {
            field: "start_date/end_date".to_string(),
            value: format!("{:?}/{:?}", start_date, end_date),
            reason: "both must be set together".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_takes_precedence() {
        let dates =
            resolve_target_dates(Some("2026-05-01"), Some("2026-03-01"), Some("2026-03-03"))
                .unwrap();
        assert_eq!(dates.len(), 3);
        assert_eq!(dates[0].to_string(), "2026-03-01");
        assert_eq!(dates[2].to_string(), "2026-03-03");
    }

    #[test]
    fn test_single_target_date() {
        let dates = resolve_target_dates(Some("2026-03-07"), None, None).unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].to_string(), "2026-03-07");
    }

    #[test]
    fn test_default_is_yesterday() {
        let dates = resolve_target_dates(None, None, None).unwrap();
        assert_eq!(dates.len(), 1);
    }

    #[test]
    fn test_half_open_range_is_rejected() {
        assert!(resolve_target_dates(None, Some("2026-03-01"), None).is_err());
        assert!(resolve_target_dates(None, None, Some("2026-03-01")).is_err());
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        assert!(resolve_target_dates(None, Some("2026-03-05"), Some("2026-03-01")).is_err());
    }

    #[test]
    fn test_malformed_dates_are_rejected() {
        assert!(resolve_target_dates(Some("03/07/2026"), None, None).is_err());
        assert!(resolve_target_dates(None, Some("bad"), Some("2026-03-01")).is_err());
    }
}
