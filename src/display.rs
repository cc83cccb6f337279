//! Small presentation helpers for addresses and large numbers

use crate::accrual::round_decimal;

/// Shorten an address to `head...tail`.
///
/// Addresses that already fit in `start_chars + end_chars` are returned as is.
pub fn truncate_address(address: &str, start_chars: usize, end_chars: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= start_chars + end_chars {
        return address.to_string();
    }

    let head: String = chars[..start_chars].iter().collect();
    let tail: String = chars[chars.len() - end_chars..].iter().collect();
    format!("{head}...{tail}")
}

/// [`truncate_address`] with four characters on each side
pub fn short_address(address: &str) -> String {
    truncate_address(address, 4, 4)
}

/// Group thousands with commas, keeping at most three fraction digits.
///
/// `1234567.891` becomes `"1,234,567.891"` and `2.5` stays `"2.5"`. Rounding
/// works on the shortest decimal form of `value` (so `1.0005` gives `"1.001"`),
/// large magnitudes are written out in full and negative values keep their
/// sign even when they round to zero.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    // f64 Display never switches to exponent notation
    let fixed = round_decimal(&value.abs().to_string(), 3);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_address() {
        assert_eq!(truncate_address("ABCDEFGHIJ", 4, 4), "ABCD...GHIJ");
        assert_eq!(truncate_address("ABCDEFGH", 4, 4), "ABCDEFGH");
        assert_eq!(truncate_address("", 4, 4), "");
        assert_eq!(truncate_address("ABCDEFGHIJ", 2, 3), "AB...HIJ");
        assert_eq!(short_address("So11111111111111111111111111111111111111112"), "So11...1112");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1234567.891), "1,234,567.891");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn test_format_number_rounding_and_sign() {
        assert_eq!(format_number(1.23456), "1.235");
        assert_eq!(format_number(-1234.5), "-1,234.5");
        assert_eq!(format_number(999999.9999), "1,000,000");
    }

    #[test]
    fn test_format_number_matches_locale_output() {
        assert_eq!(format_number(1.0005), "1.001");
        assert_eq!(format_number(-0.0001), "-0");
        assert_eq!(format_number(1e21), "1,000,000,000,000,000,000,000");
        assert_eq!(format_number(-1.5e22), "-15,000,000,000,000,000,000,000");
    }

    #[test]
    fn test_format_number_special_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
    }
}
