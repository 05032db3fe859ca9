// Adapters: per-platform CSV readers and import-file writers.

pub mod booktracker;
pub mod goodreads;

use chrono::NaiveDate;

/// Try an ordered list of date formats until one parses. Exhausting the
/// list yields an absent date, not an error.
pub(crate) fn parse_date(raw: &str, formats: &[String]) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_format_priority() {
        let formats: Vec<String> = ["%Y-%m-%d", "%Y/%m/%d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            parse_date("2025-07-04", &formats),
            NaiveDate::from_ymd_opt(2025, 7, 4)
        );
        assert_eq!(
            parse_date("2025/07/04", &formats),
            NaiveDate::from_ymd_opt(2025, 7, 4)
        );
        assert_eq!(parse_date("July 4th", &formats), None);
        assert_eq!(parse_date("   ", &formats), None);
    }
}
