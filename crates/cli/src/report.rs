//! Number rendering for the stdout reports.

/// Significant digits used for the `tsample` and `fsin` lines.
pub const REPORT_PRECISION: usize = 6;

/// Render `value` in C `%g` style with `precision` significant digits.
///
/// Trailing zeros are stripped. Exponent form (`1.25e-07`, `2e+06`) is used
/// when the decimal exponent is below -4 or at least `precision`.
pub fn general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            strip_fraction_zeros(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_fraction_zeros(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn strip_fraction_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_use_exponent() {
        assert_eq!(general(1.25e-7, 6), "1.25e-07");
        assert_eq!(general(1e-7, 6), "1e-07");
        assert_eq!(general(0.0001, 6), "0.0001");
    }

    #[test]
    fn test_mid_range_is_fixed_without_trailing_zeros() {
        assert_eq!(general(50_000.0, 6), "50000");
        assert_eq!(general(123_456.0, 6), "123456");
        assert_eq!(general(1234.5678, 6), "1234.57");
        assert_eq!(general(-2.5, 6), "-2.5");
    }

    #[test]
    fn test_large_values_use_exponent() {
        assert_eq!(general(2_000_000.0, 6), "2e+06");
        assert_eq!(general(1_234_567.0, 6), "1.23457e+06");
        // Rounding carries into the next decade
        assert_eq!(general(999_999.7, 6), "1e+06");
    }

    #[test]
    fn test_zero() {
        assert_eq!(general(0.0, 6), "0");
    }
}
