//! Display formatting for bill dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::patterns::DISPLAY_DATE;

/// Date-only shapes accepted besides `D/M/YYYY`.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-time shapes accepted; only the date part is kept.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Format a bill date as `DD/MM/YYYY`.
///
/// A value already shaped `D/M/YYYY` is returned trimmed and otherwise
/// untouched. Other recognised shapes are reformatted; anything else is
/// returned unchanged.
pub fn to_display_date(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if DISPLAY_DATE.is_match(trimmed) {
        return trimmed.to_string();
    }

    match parse_date(trimmed) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => s.to_string(),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_date_is_identity() {
        assert_eq!(to_display_date("01/04/2024"), "01/04/2024");
        assert_eq!(to_display_date("1/4/2024"), "1/4/2024");
        assert_eq!(to_display_date(" 31/12/2023 "), "31/12/2023");
    }

    #[test]
    fn test_iso_is_reformatted() {
        assert_eq!(to_display_date("2024-04-01"), "01/04/2024");
        assert_eq!(to_display_date("2024-04-01T10:30:00"), "01/04/2024");
        assert_eq!(to_display_date("2024-04-01T10:30:00+05:30"), "01/04/2024");
    }

    #[test]
    fn test_other_shapes() {
        assert_eq!(to_display_date("2024/04/01"), "01/04/2024");
        assert_eq!(to_display_date("April 1, 2024"), "01/04/2024");
        assert_eq!(to_display_date("1 Apr 2024"), "01/04/2024");
    }

    #[test]
    fn test_unparseable_passes_through() {
        assert_eq!(to_display_date("next tuesday"), "next tuesday");
        assert_eq!(to_display_date("2024-13-45"), "2024-13-45");
        assert_eq!(to_display_date(""), "");
    }
}
