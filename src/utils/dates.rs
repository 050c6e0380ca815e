use crate::utils::error::{Result, StatsError};
use chrono::{Duration, NaiveDate, Utc};

/// Dash format used for storage keys and the query API.
pub fn ymd_dash(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Slash format used by the upstream AppSync API.
pub fn ymd_slash(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

pub fn parse_ymd(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| StatsError::InvalidDateError {
        value: value.to_string(),
    })
}

/// Yesterday as seen from the facility's timezone (JST, UTC+9).
/// Lambda clocks run in UTC, so shifting before taking the date matters
/// around midnight.
pub fn yesterday_jst() -> NaiveDate {
    let jst_now = Utc::now() + Duration::hours(9);
    jst_now.date_naive() - Duration::days(1)
}

/// Inclusive list of dates from `start` to `end`.
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_formats() {
        let d = date(2026, 3, 7);
        assert_eq!(ymd_dash(d), "2026-03-07");
        assert_eq!(ymd_slash(d), "2026/03/07");
    }

    #[test]
    fn test_parse_ymd() {
        assert_eq!(parse_ymd("2026-03-07").unwrap(), date(2026, 3, 7));
        assert_eq!(parse_ymd(" 2026-03-07 ").unwrap(), date(2026, 3, 7));
        assert!(parse_ymd("2026/03/07").is_err());
        assert!(parse_ymd("not-a-date").is_err());
        assert!(parse_ymd("").is_err());
    }

    #[test]
    fn test_yesterday_jst_is_recent() {
        let yesterday = yesterday_jst();
        let today_utc = Utc::now().date_naive();
        let spread = (today_utc - yesterday).num_days();
        // JST is ahead of UTC, so "yesterday" in JST is within a day of UTC's.
        assert!((0..=2).contains(&spread), "unexpected spread: {}", spread);
    }

    #[test]
    fn test_date_range_inclusive() {
        let dates = date_range(date(2026, 1, 30), date(2026, 2, 2));
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[0], date(2026, 1, 30));
        assert_eq!(dates[3], date(2026, 2, 2));
    }

    #[test]
    fn test_date_range_single_day() {
        let dates = date_range(date(2026, 1, 1), date(2026, 1, 1));
        assert_eq!(dates, vec![date(2026, 1, 1)]);
    }

    #[test]
    fn test_date_range_empty_when_reversed() {
        assert!(date_range(date(2026, 1, 2), date(2026, 1, 1)).is_empty());
    }
}
