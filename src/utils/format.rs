use chrono::{DateTime, Local, NaiveDate};

/// Uppercase the first character, e.g. `paid` -> `Paid`
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// RFC 3339 timestamp in local time (`2024-05-01 14:03`); unparseable input is returned as-is
pub fn format_datetime(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Calendar date of a timestamp or plain `YYYY-MM-DD` value
pub fn format_date(raw: &str) -> String {
    parse_date(raw)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Date part of a `YYYY-MM-DD` or RFC 3339 value, read in the value's own offset
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    // "2024-06-30T00:00:00.000Z" without offset handling, or plain dates
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Two decimals, the way fees and amounts are shown
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("unfulfilled"), "Unfulfilled");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("élan"), "Élan");
    }

    #[test]
    fn test_dates() {
        assert_eq!(format_date("2024-06-30T00:00:00.000Z"), "2024-06-30");
        assert_eq!(format_date("2024-06-30T23:30:00+03:00"), "2024-06-30");
        assert_eq!(format_date("2024-06-30"), "2024-06-30");
        assert_eq!(format_date("soon"), "soon");
        assert_eq!(format_datetime("not a date"), "not a date");
    }

    #[test]
    fn test_fixed2() {
        assert_eq!(format_fixed2(15.0), "15.00");
        assert_eq!(format_fixed2(7.4567), "7.46");
    }
}
