//! Display formatting for balances and rank changes

use serde::Serialize;

/// Largest fractional precision honoured by [`format_amount`]
const MAX_PRECISION: usize = 100;

/// Enough fractional digits to print any f64 exactly
const EXACT_DIGITS: usize = 1074;

/// Format `amount` with exactly `precision` fractional digits.
///
/// Rounds half away from zero on the exact binary value, so `0.125` at two
/// digits gives `"0.13"` where `format!("{:.2}")` would give `"0.12"`.
/// NaN prints as `NaN`, infinities as `Infinity`/`-Infinity`, and magnitudes
/// of 1e21 or more fall back to exponent notation (`1e+21`).
pub fn format_amount(amount: f64, precision: usize) -> String {
    if amount.is_nan() {
        return "NaN".to_string();
    }
    if amount.is_infinite() {
        let text = if amount > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    if amount.abs() >= 1e21 {
        return format!("{:e}", amount).replacen('e', "e+", 1);
    }

    let body = round_half_away(amount.abs(), precision.min(MAX_PRECISION));
    // -0.0 prints unsigned, small negatives keep their sign ("-0.00")
    if amount < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

fn round_half_away(magnitude: f64, precision: usize) -> String {
    // With the exact expansion, "next digit >= 5" is precisely half-up
    round_decimal(&format!("{:.*}", EXACT_DIGITS, magnitude), precision)
}

/// Round a plain unsigned decimal string (`"12.3456"`) half away from zero,
/// padding with zeros to exactly `precision` fractional digits.
pub(crate) fn round_decimal(text: &str, precision: usize) -> String {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(precision))
        .map(|b| b - b'0')
        .collect();

    let round_up = frac_part.as_bytes().get(precision).is_some_and(|&d| d >= b'5');
    if round_up {
        let mut idx = digits.len();
        loop {
            if idx == 0 {
                digits.insert(0, 1);
                break;
            }
            idx -= 1;
            if digits[idx] == 9 {
                digits[idx] = 0;
            } else {
                digits[idx] += 1;
                break;
            }
        }
    }

    let int_len = digits.len() - precision;
    let mut out = String::with_capacity(digits.len() + 1);
    for (i, d) in digits.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Visual treatment for a rank change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Neutral,
    Positive,
    Negative,
}

/// Rank change ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankDelta {
    pub text: String,
    pub emphasis: Emphasis,
}

/// Classify a signed rank change.
///
/// Positive deltas get an explicit `+`; negative ones already carry their sign.
pub fn format_rank_delta(delta: i64) -> RankDelta {
    match delta {
        0 => RankDelta {
            text: "0".to_string(),
            emphasis: Emphasis::Neutral,
        },
        d if d > 0 => RankDelta {
            text: format!("+{d}"),
            emphasis: Emphasis::Positive,
        },
        d => RankDelta {
            text: d.to_string(),
            emphasis: Emphasis::Negative,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_basic() {
        assert_eq!(format_amount(100.1, 2), "100.10");
        assert_eq!(format_amount(0.0, 6), "0.000000");
        assert_eq!(format_amount(100.1, 4), "100.1000");
        assert_eq!(format_amount(12.0, 0), "12");
        assert_eq!(format_amount(1234.56789, 4), "1234.5679");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(0.125, 2), "0.13");
        assert_eq!(format_amount(-0.125, 2), "-0.13");
        assert_eq!(format_amount(2.5, 0), "3");
        assert_eq!(format_amount(1.005, 2), "1.00"); // 1.005 is just below the tie in binary
        assert_eq!(format_amount(99.5, 0), "100");
        assert_eq!(format_amount(0.9999, 2), "1.00");
    }

    #[test]
    fn test_format_amount_signs() {
        assert_eq!(format_amount(-0.0, 2), "0.00");
        assert_eq!(format_amount(-0.0001, 2), "-0.00");
        assert_eq!(format_amount(-3.5, 1), "-3.5");
    }

    #[test]
    fn test_format_amount_special_values() {
        assert_eq!(format_amount(f64::NAN, 4), "NaN");
        assert_eq!(format_amount(f64::INFINITY, 4), "Infinity");
        assert_eq!(format_amount(f64::NEG_INFINITY, 4), "-Infinity");
        assert_eq!(format_amount(1e21, 2), "1e+21");
        assert_eq!(format_amount(-1.5e22, 2), "-1.5e+22");
    }

    #[test]
    fn test_format_amount_tiny_values() {
        assert_eq!(format_amount(f64::MIN_POSITIVE, 4), "0.0000");
        assert_eq!(format_amount(0.000_06, 4), "0.0001");
    }

    #[test]
    fn test_round_decimal_string() {
        assert_eq!(round_decimal("1.0005", 3), "1.001");
        assert_eq!(round_decimal("2.5", 3), "2.500");
        assert_eq!(round_decimal("999.9996", 3), "1000.000");
        assert_eq!(round_decimal("42", 0), "42");
    }

    #[test]
    fn test_rank_delta() {
        assert_eq!(
            format_rank_delta(0),
            RankDelta { text: "0".into(), emphasis: Emphasis::Neutral }
        );
        assert_eq!(
            format_rank_delta(5),
            RankDelta { text: "+5".into(), emphasis: Emphasis::Positive }
        );
        assert_eq!(
            format_rank_delta(-3),
            RankDelta { text: "-3".into(), emphasis: Emphasis::Negative }
        );
    }
}
