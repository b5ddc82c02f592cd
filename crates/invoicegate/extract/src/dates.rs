//! Invoice-date normalization.

use chrono::{Datelike, NaiveDate};

/// Date formats tried in order when normalizing a matched date string.
/// US month-first forms come before day-first, matching the vocabulary
/// bias of the pattern tables.
pub const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%Y-%m-%d",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Normalize a matched date substring to ISO 8601 (YYYY-MM-DD).
///
/// Tries [`DATE_FORMATS`] in order and stops at the first success. When
/// no format parses the raw substring is returned unmodified; an
/// unrecognized format is data for downstream checks, not an error.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            // chrono accepts two-digit years for %Y; those stay raw so
            // "01/15/26" is not silently read as the year 26.
            if date.year() >= 1000 {
                return date.format("%Y-%m-%d").to_string();
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_numeric_date_normalizes() {
        assert_eq!(normalize("01/15/2026"), "2026-01-15");
    }

    #[test]
    fn day_first_date_normalizes_when_month_slot_invalid() {
        // 25 cannot be a month, so the day-first format wins.
        assert_eq!(normalize("25/03/2026"), "2026-03-25");
    }

    #[test]
    fn iso_date_passes_through() {
        assert_eq!(normalize("2026-01-15"), "2026-01-15");
    }

    #[test]
    fn month_name_dates_normalize() {
        assert_eq!(normalize("January 15, 2026"), "2026-01-15");
        assert_eq!(normalize("Mar 3, 2026"), "2026-03-03");
    }

    #[test]
    fn unparseable_date_returned_raw() {
        assert_eq!(normalize("01/15/26"), "01/15/26");
        assert_eq!(normalize("sometime soon"), "sometime soon");
    }

    #[test]
    fn ambiguous_date_prefers_month_first() {
        // Both formats could parse 02/03; the fixed order makes the
        // month-first reading canonical.
        assert_eq!(normalize("02/03/2026"), "2026-02-03");
    }
}
