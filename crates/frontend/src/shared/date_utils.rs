/// Date formatting for tables and `<input type="date">` binding
use chrono::{DateTime, NaiveDate, Utc};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format an RFC 3339 timestamp as DD.MM.YYYY HH:MM
/// Example: "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    match DateTime::parse_from_rfc3339(datetime_str) {
        Ok(dt) => dt.format("%d.%m.%Y %H:%M").to_string(),
        Err(_) => format_date(datetime_str),
    }
}

/// Format the date part of an ISO string as DD.MM.YYYY
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    match NaiveDate::parse_from_str(date_part, INPUT_DATE_FORMAT) {
        Ok(date) => date.format("%d.%m.%Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Optional timestamp for table cells; missing values render as a dash
pub fn format_optional_datetime(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .map(format_datetime)
        .unwrap_or_else(|| "-".to_string())
}

/// Value of a date input ("" when unset)
pub fn to_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

pub fn parse_input_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).ok()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "15.03.2024 14:02"
        );
        assert_eq!(format_datetime("2024-12-31T23:59:59+00:00"), "31.12.2024 23:59");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
        assert_eq!(format_datetime("2024-03-15"), "15.03.2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_optional_datetime(None), "-");
        assert_eq!(format_optional_datetime(Some("")), "-");
    }

    #[test]
    fn test_input_value_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(to_input_value(Some(date)), "2025-01-01");
        assert_eq!(to_input_value(None), "");
        assert_eq!(parse_input_value(" 2025-01-01 "), Some(date));
        assert_eq!(parse_input_value(""), None);
    }
}
