//! Parsing of numeric registry fields.
//!
//! Registry values arrive as strings. All default-on-invalid behavior lives
//! here so every component coerces the same way.

/// Step size used when a wallet row carries no usable delta.
pub const DEFAULT_DELTA: f64 = 1.0;

/// Parse a decimal field, treating empty or malformed input as absent.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a threshold field. Malformed or missing values become `0`,
/// negative values are clamped to `0`.
pub fn parse_threshold(raw: &str) -> f64 {
    parse_decimal(raw).map(|v| v.max(0.0)).unwrap_or(0.0)
}

/// Parse a delta field. Absent, zero, negative, or non-numeric values all
/// fall back to [`DEFAULT_DELTA`]; the decision engine requires a positive
/// step.
pub fn parse_delta(raw: &str) -> f64 {
    match parse_decimal(raw) {
        Some(v) if v > 0.0 => v,
        _ => DEFAULT_DELTA,
    }
}

/// Convert a string-encoded integer count of base units into display units,
/// rounded to the 3 decimal places used everywhere downstream.
pub fn from_base_units(raw: &str, decimals: u8) -> Option<f64> {
    let units = raw.trim().parse::<u128>().ok()?;
    let scaled = units as f64 / 10f64.powi(decimals as i32);
    Some(round3(scaled))
}

/// Round to 3 decimal places.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("12.5"), Some(12.5));
        assert_eq!(parse_decimal("  3 "), Some(3.0));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
    }

    #[test]
    fn test_parse_threshold_defaults_to_zero() {
        assert_eq!(parse_threshold("20"), 20.0);
        assert_eq!(parse_threshold(""), 0.0);
        assert_eq!(parse_threshold("garbage"), 0.0);
        assert_eq!(parse_threshold("-5"), 0.0);
    }

    #[test]
    fn test_parse_delta_defaults_to_one() {
        assert_eq!(parse_delta("5"), 5.0);
        assert_eq!(parse_delta("0.25"), 0.25);
        // Absent, zero, negative, and garbage all fall back to the default.
        assert_eq!(parse_delta(""), DEFAULT_DELTA);
        assert_eq!(parse_delta("0"), DEFAULT_DELTA);
        assert_eq!(parse_delta("-3"), DEFAULT_DELTA);
        assert_eq!(parse_delta("five"), DEFAULT_DELTA);
    }

    #[test]
    fn test_from_base_units() {
        // 1.5 ETH in wei
        assert_eq!(from_base_units("1500000000000000000", 18), Some(1.5));
        assert_eq!(from_base_units("0", 18), Some(0.0));
        // Rounded to 3 decimals
        assert_eq!(from_base_units("1234567890000000000", 18), Some(1.235));
        // Non-integer payloads are rejected, not coerced
        assert_eq!(from_base_units("12.5", 18), None);
        assert_eq!(from_base_units("not a number", 18), None);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(1.2344), 1.234);
        assert_eq!(round3(1.2345), 1.235);
        assert_eq!(round3(100.0), 100.0);
    }
}
