//! Timeframe formatting for resume entries.
//!
//! A timeframe string is `YYYY`, `YYYY-MM`, or the literal `present`.
//! Formatting is lenient: anything that does not parse is echoed back
//! unchanged, so these functions never fail.

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const PRESENT: &str = "Present";

/// Separator between the two ends of a range (en dash).
pub const RANGE_SEPARATOR: &str = " \u{2013} ";

/// Formats a single timeframe for display.
///
/// - `None` or blank → `""`
/// - `present` (any case) → `"Present"`
/// - `2020` → `"2020"`
/// - `2023-01` → `"Jan 2023"`
/// - `2023-13`, `2023-ab` → returned unchanged
pub fn format_date(input: Option<&str>) -> String {
    let raw = match input {
        Some(s) if !s.trim().is_empty() => s,
        _ => return String::new(),
    };
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("present") {
        return PRESENT.to_string();
    }

    let Some((year, month)) = trimmed.split_once('-') else {
        return raw.to_string();
    };

    match month_abbreviation(month) {
        Some(abbrev) => format!("{abbrev} {year}"),
        None => raw.to_string(),
    }
}

/// Formats a start/end pair as `"Jan 2022 – Jun 2023"`.
///
/// An empty end means the entry is ongoing and renders as `Present`.
/// Two empty ends render as `""`; an empty start renders the end alone.
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start_blank = is_blank(start);
    if start_blank && is_blank(end) {
        return String::new();
    }

    let formatted_start = format_date(start);
    let formatted_end = match format_date(end) {
        e if e.is_empty() => PRESENT.to_string(),
        e => e,
    };

    if start_blank {
        return formatted_end;
    }

    format!("{formatted_start}{RANGE_SEPARATOR}{formatted_end}")
}

/// Strict check used when accepting resume dates: `YYYY`, `YYYY-MM` with a
/// month in 1..=12, or `present`.
pub fn is_timeframe(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("present") {
        return true;
    }
    match trimmed.split_once('-') {
        None => is_year(trimmed),
        Some((year, month)) => {
            is_year(year)
                && month.len() <= 2
                && month.chars().all(|c| c.is_ascii_digit())
                && month_abbreviation(month).is_some()
        }
    }
}

fn month_abbreviation(month: &str) -> Option<&'static str> {
    let index = month.trim().parse::<usize>().ok()?;
    if (1..=12).contains(&index) {
        Some(MONTH_ABBREVIATIONS[index - 1])
    } else {
        None
    }
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

fn is_blank(s: Option<&str>) -> bool {
    s.map(|v| v.trim().is_empty()).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_month_formats_with_abbreviation() {
        assert_eq!(format_date(Some("2023-01")), "Jan 2023");
        assert_eq!(format_date(Some("1999-12")), "Dec 1999");
        assert_eq!(format_date(Some("2021-6")), "Jun 2021");
    }

    #[test]
    fn test_every_month_maps_to_its_abbreviation() {
        for (i, abbrev) in MONTH_ABBREVIATIONS.iter().enumerate() {
            let input = format!("2024-{:02}", i + 1);
            assert_eq!(format_date(Some(&input)), format!("{abbrev} 2024"));
        }
    }

    #[test]
    fn test_year_only_is_identity() {
        assert_eq!(format_date(Some("2020")), "2020");
    }

    #[test]
    fn test_present_any_case() {
        assert_eq!(format_date(Some("Present")), "Present");
        assert_eq!(format_date(Some("present")), "Present");
        assert_eq!(format_date(Some("PRESENT")), "Present");
    }

    #[test]
    fn test_empty_and_missing_input() {
        assert_eq!(format_date(Some("")), "");
        assert_eq!(format_date(Some("   ")), "");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_invalid_month_returned_unchanged() {
        assert_eq!(format_date(Some("2023-13")), "2023-13");
        assert_eq!(format_date(Some("2023-00")), "2023-00");
        assert_eq!(format_date(Some("2023-ab")), "2023-ab");
        assert_eq!(format_date(Some("2023-")), "2023-");
    }

    #[test]
    fn test_garbage_never_panics() {
        for input in ["-", "--", "abc", "2023-01-15", "\u{1F600}-\u{1F600}", "9999999999-1"] {
            let _ = format_date(Some(input));
        }
        assert_eq!(format_date(Some("2023-01-15")), "2023-01-15");
    }

    #[test]
    fn test_range_both_ends() {
        assert_eq!(
            format_date_range(Some("2022-01"), Some("2023-06")),
            "Jan 2022 \u{2013} Jun 2023"
        );
    }

    #[test]
    fn test_range_empty_end_is_present() {
        assert_eq!(
            format_date_range(Some("2022-01"), Some("")),
            "Jan 2022 \u{2013} Present"
        );
        assert_eq!(
            format_date_range(Some("2022-01"), None),
            "Jan 2022 \u{2013} Present"
        );
    }

    #[test]
    fn test_range_both_empty() {
        assert_eq!(format_date_range(Some(""), Some("")), "");
        assert_eq!(format_date_range(None, None), "");
    }

    #[test]
    fn test_range_empty_start_returns_end_alone() {
        assert_eq!(format_date_range(Some(""), Some("2023-06")), "Jun 2023");
        assert_eq!(format_date_range(None, Some("present")), "Present");
    }

    #[test]
    fn test_range_keeps_unparseable_ends() {
        assert_eq!(
            format_date_range(Some("2019"), Some("2023-13")),
            "2019 \u{2013} 2023-13"
        );
    }

    #[test]
    fn test_is_timeframe() {
        assert!(is_timeframe("2020"));
        assert!(is_timeframe("2020-01"));
        assert!(is_timeframe("2020-9"));
        assert!(is_timeframe("PRESENT"));
        assert!(!is_timeframe("2020-13"));
        assert!(!is_timeframe("20-01"));
        assert!(!is_timeframe("Jan 2020"));
        assert!(!is_timeframe("2020-01-01"));
        assert!(!is_timeframe(""));
    }
}
