// Utility functions
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Converts a date string into `DateTime<Utc>` if possible.
/// Accepts RFC 3339, `dd/mm/yyyy HH:MM`, `dd/mm/yyyy` and `yyyy-mm-dd`.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    let s = date_str.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%d/%m/%Y %H:%M") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    parse_date(s)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses a date without a time part (`dd/mm/yyyy` or `yyyy-mm-dd`).
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let s = date_str.trim();
    ["%d/%m/%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Like `parse_datetime`, but a bare date resolves to the last instant of that day.
pub fn parse_end_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    match parse_date(date_str) {
        Some(day) => day
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .map(|naive| Utc.from_utc_datetime(&naive)),
        None => parse_datetime(date_str),
    }
}

/// Parses a currency amount such as `-1.500.000 €` or `+250.000`.
/// Returns 0 when unparsable or when the magnitude does not fit an `i64`.
pub fn parse_amount(text: &str) -> i64 {
    let cleaned: String = text
        .replace('\u{2212}', "-")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '+')
        .collect();
    cleaned
        .trim_start_matches('+')
        .parse::<i64>()
        .ok()
        .filter(|v| v.checked_abs().is_some())
        .unwrap_or(0)
}

/// Sum that clamps at the `i64` bounds instead of overflowing.
pub fn saturating_sum(values: impl IntoIterator<Item = i64>) -> i64 {
    values.into_iter().fold(0, i64::saturating_add)
}

/// Ratio that yields 0 instead of dividing by zero.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Formats an amount with dot thousands separators, e.g. `-1.500.000 €`.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}{} €", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_supported_date_formats() {
        let dt = parse_datetime("2024-03-01T10:30:00+01:00").unwrap();
        assert_eq!(dt.hour(), 9);

        let dt = parse_datetime("05/08/2024 18:45").unwrap();
        assert_eq!((dt.day(), dt.month(), dt.hour(), dt.minute()), (5, 8, 18, 45));

        let dt = parse_datetime("05/08/2024").unwrap();
        assert_eq!((dt.day(), dt.month(), dt.year()), (5, 8, 2024));

        assert!(parse_datetime("2024-08-05").is_some());
        assert!(parse_datetime("yesterday").is_none());
        assert!(parse_datetime("").is_none());
    }

    #[test]
    fn parses_amounts_with_separators_and_signs() {
        assert_eq!(parse_amount("-1.500.000 €"), -1_500_000);
        assert_eq!(parse_amount("+250.000€"), 250_000);
        assert_eq!(parse_amount("\u{2212}3.000"), -3_000);
        assert_eq!(parse_amount(" 12 "), 12);
        assert_eq!(parse_amount("n/a"), 0);
        assert_eq!(parse_amount("-9.223.372.036.854.775.808 €"), 0);
        assert_eq!(parse_amount("99.999.999.999.999.999.999 €"), 0);
        assert_eq!(parse_amount("-9.223.372.036.854.775.807 €"), -i64::MAX);
        assert_eq!(parse_amount(""), 0);
    }

    #[test]
    fn end_datetime_covers_the_whole_day() {
        let end = parse_end_datetime("30/09/2024").unwrap();
        assert!(parse_datetime("30/09/2024 23:59").unwrap() <= end);
        assert!(end < parse_datetime("2024-10-01").unwrap());
        assert_eq!(parse_end_datetime("2024-09-30"), Some(end));
        assert_eq!(parse_end_datetime("30/09/2024 18:00"), parse_datetime("30/09/2024 18:00"));
        assert!(parse_end_datetime("later").is_none());
    }

    #[test]
    fn saturating_sum_clamps() {
        assert_eq!(saturating_sum([i64::MAX, 1, 5]), i64::MAX);
        assert_eq!(saturating_sum([-i64::MAX, -10]), i64::MIN);
        assert_eq!(saturating_sum([3, -1]), 2);
        assert_eq!(saturating_sum(std::iter::empty::<i64>()), 0);
    }

    #[test]
    fn safe_ratio_guards_zero_denominator() {
        assert_eq!(safe_ratio(5.0, 0.0), 0.0);
        assert_eq!(safe_ratio(1.0, 4.0), 0.25);
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_amount(0), "0 €");
        assert_eq!(format_amount(999), "999 €");
        assert_eq!(format_amount(1000), "1.000 €");
        assert_eq!(format_amount(-1_500_000), "-1.500.000 €");
    }
}
