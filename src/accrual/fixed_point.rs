//! Shared decoding for fixed-point decimal strings
//!
//! Every amount or rate read off the wire goes through [`decode_fixed_point`]
//! so that all call sites agree on precision and on what counts as malformed.

use super::FIXED_POINT_SCALE;

/// Decode a fixed-point decimal string into raw (unscaled) units.
///
/// Surrounding whitespace is ignored and an empty string decodes to zero.
/// Plain decimal and exponent notation are accepted, as are the spelled-out
/// infinities `Infinity`/`-Infinity`. Anything else decodes to NaN, which then
/// propagates through all arithmetic instead of raising an error.
pub fn decode_fixed_point(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    // f64::from_str also accepts "inf" and "nan"; the API never sends those
    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if numeric {
        return trimmed.parse::<f64>().unwrap_or(f64::NAN);
    }

    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ => f64::NAN,
    }
}

/// Convert a raw fixed-point value to human scale when `scale_down` is set
pub fn scale_amount(raw: f64, scale_down: bool) -> f64 {
    if scale_down {
        raw / FIXED_POINT_SCALE
    } else {
        raw
    }
}

/// Decode and scale down an amount that is not projected (e.g. settled points)
pub fn scaled_amount(raw: &str) -> f64 {
    scale_amount(decode_fixed_point(raw), true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_integers_and_decimals() {
        assert_eq!(decode_fixed_point("1000000"), 1_000_000.0);
        assert_eq!(decode_fixed_point("12.5"), 12.5);
        assert_eq!(decode_fixed_point("-3"), -3.0);
        assert_eq!(decode_fixed_point("1e3"), 1000.0);
        assert_eq!(decode_fixed_point("  42 \n"), 42.0);
    }

    #[test]
    fn test_decode_empty_is_zero() {
        assert_eq!(decode_fixed_point(""), 0.0);
        assert_eq!(decode_fixed_point("   "), 0.0);
    }

    #[test]
    fn test_decode_malformed_is_nan() {
        assert!(decode_fixed_point("abc").is_nan());
        assert!(decode_fixed_point("12abc").is_nan());
        assert!(decode_fixed_point("1.2.3").is_nan());
        assert!(decode_fixed_point("inf").is_nan());
        assert!(decode_fixed_point("nan").is_nan());
    }

    #[test]
    fn test_decode_infinities() {
        assert_eq!(decode_fixed_point("Infinity"), f64::INFINITY);
        assert_eq!(decode_fixed_point("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_scaled_amount() {
        assert_eq!(scaled_amount("1000000"), 100.0);
        assert_eq!(scale_amount(1_000_000.0, false), 1_000_000.0);
        assert!(scaled_amount("oops").is_nan());
    }
}
