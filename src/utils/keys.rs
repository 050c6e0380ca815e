//! Key scheme for the two DynamoDB tables.
//!
//! Daily table:  PK = FACILITY#{facility}           SK = DATE#{date}
//! Catch table:  PK = FACILITY#{facility}#FISH#{fish}
//!               SK = DATE#{date}#SLOT#{slot}#PLACE#{place}
//!
//! The sort keys lead with the dash-formatted date, so date ranges map
//! directly onto sort-key conditions.

pub fn daily_pk(facility: &str) -> String {
    format!("FACILITY#{}", facility)
}

pub fn daily_sk(date: &str) -> String {
    format!("DATE#{}", date)
}

pub fn catch_pk(facility: &str, fish: &str) -> String {
    format!("FACILITY#{}#FISH#{}", facility, fish)
}

pub fn catch_sk(date: &str, slot: u8, place: Option<&str>) -> String {
    let place_clean = match place {
        Some(p) if !p.is_empty() => p.replace('\n', " ").trim().to_string(),
        _ => "UNKNOWN".to_string(),
    };
    format!("DATE#{}#SLOT#{:02}#PLACE#{}", date, slot, place_clean)
}

/// Extract the date part out of a catch/daily sort key. Unparseable keys
/// get a value that sorts before any real date.
pub fn date_from_sk(sk: &str) -> &str {
    sk.split('#').nth(1).unwrap_or("0000-00-00")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_keys() {
        assert_eq!(daily_pk("honmoku"), "FACILITY#honmoku");
        assert_eq!(daily_sk("2026-03-07"), "DATE#2026-03-07");
    }

    #[test]
    fn test_catch_keys() {
        assert_eq!(catch_pk("honmoku", "mackerel"), "FACILITY#honmoku#FISH#mackerel");
        assert_eq!(
            catch_sk("2026-03-07", 3, Some("north pier")),
            "DATE#2026-03-07#SLOT#03#PLACE#north pier"
        );
    }

    #[test]
    fn test_catch_sk_place_fallbacks() {
        assert_eq!(
            catch_sk("2026-03-07", 1, None),
            "DATE#2026-03-07#SLOT#01#PLACE#UNKNOWN"
        );
        assert_eq!(
            catch_sk("2026-03-07", 1, Some("")),
            "DATE#2026-03-07#SLOT#01#PLACE#UNKNOWN"
        );
        assert_eq!(
            catch_sk("2026-03-07", 1, Some("pier\nnorth ")),
            "DATE#2026-03-07#SLOT#01#PLACE#pier north"
        );
    }

    #[test]
    fn test_date_from_sk() {
        assert_eq!(date_from_sk("DATE#2026-03-07#SLOT#01#PLACE#X"), "2026-03-07");
        assert_eq!(date_from_sk("DATE#2026-03-07"), "2026-03-07");
        assert_eq!(date_from_sk("garbage"), "0000-00-00");
        assert_eq!(date_from_sk(""), "0000-00-00");
    }
}
