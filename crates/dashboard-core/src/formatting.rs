use chrono::NaiveDate;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals as usize);

    let (int_str, frac_str) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut result = group_thousands(int_str);
    if let Some(frac) = frac_str {
        result.push('.');
        result.push_str(frac);
    }

    if negative && result.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a rental count with thousands separators.
///
/// ```
/// use dashboard_core::formatting::format_count;
///
/// assert_eq!(format_count(3_292_679), "3,292,679");
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(-1_200), "-1,200");
/// ```
pub fn format_count(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Share of `part` in `whole` as a one-decimal percentage, e.g. `"69.6%"`.
///
/// A zero `whole` yields `"0.0%"`.
pub fn format_share(part: i64, whole: i64) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 / whole as f64 * 100.0)
}

/// Month label used on chart axes, e.g. `"Sep 2012"`.
pub fn format_month(month: NaiveDate) -> String {
    month.format("%b %Y").to_string()
}

/// Correlation coefficient with four decimals.
pub fn format_correlation(r: f64) -> String {
    format!("{:.4}", r)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(12_345_678.9, 1), "12,345,678.9");
    }

    #[test]
    fn test_format_number_negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.001, 1), "0.0");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(985), "985");
        assert_eq!(format_count(1_000_000), "1,000,000");
        assert_eq!(format_count(-5), "-5");
        assert_eq!(format_count(-12_345), "-12,345");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(696, 1000), "69.6%");
        assert_eq!(format_share(1, 3), "33.3%");
        assert_eq!(format_share(5, 0), "0.0%");
    }

    #[test]
    fn test_format_month() {
        let d = NaiveDate::from_ymd_opt(2012, 9, 1).unwrap();
        assert_eq!(format_month(d), "Sep 2012");
    }

    #[test]
    fn test_format_correlation() {
        assert_eq!(format_correlation(0.627494), "0.6275");
        assert_eq!(format_correlation(-0.234545), "-0.2345");
    }
}
