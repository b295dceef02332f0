/// Money display and amount input parsing

/// Two decimals with space-grouped thousands: 1234567.5 -> "1 234 567.50"
pub fn format_money(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, fraction)
}

/// Accepts "100000", "100 000", "100,000.50"; blank or garbage is `None`
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',' && *c != '\u{a0}')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Input value for an optional amount ("" when unset)
pub fn amount_input_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(999.0), "999.00");
        assert_eq!(format_money(1000.0), "1 000.00");
        assert_eq!(format_money(1234567.5), "1 234 567.50");
        assert_eq!(format_money(-2500.5), "-2 500.50");
        assert_eq!(format_money(f64::NAN), "-");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100000"), Some(100000.0));
        assert_eq!(parse_amount("100 000"), Some(100000.0));
        assert_eq!(parse_amount("100,000.50"), Some(100000.5));
        assert_eq!(parse_amount("  "), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn test_amount_input_value() {
        assert_eq!(amount_input_value(Some(60000.0)), "60000");
        assert_eq!(amount_input_value(None), "");
    }
}
