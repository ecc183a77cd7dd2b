//! Significant-figure aware rounding and formatting
//!
//! Reported intervals are rounded to the magnitude implied by their own
//! width, so `1234.5678 (1230.1 to 1240.9)` is shown as
//! `1,235. (1,230. to 1,241.)` rather than with meaningless digits.
//!
//! [`sigfig_resolution`] goes the other way: it reads the precision a user
//! implied by how they wrote a decimal literal.

use super::interval::{interval, median, DEFAULT_ALPHA};
use crate::error::{FermiError, Result};

/// Magnitude reported for zero. Not a real magnitude; it only keeps the
/// formatting helpers away from `log10(0)`.
pub const ZERO_MAGNITUDE: i32 = 3;

/// Default number of extra digits kept beyond the interval's magnitude.
pub const DEFAULT_PADDING: i32 = 2;

/// `floor(log10(|x|))`, or [`ZERO_MAGNITUDE`] for zero.
pub fn magnitude(x: f64) -> i32 {
    if x == 0.0 {
        return ZERO_MAGNITUDE;
    }
    x.abs().log10().floor() as i32
}

#[inline]
fn pow10(exponent: i32) -> f64 {
    if exponent >= 0 {
        10f64.powi(exponent)
    } else {
        1.0 / 10f64.powi(exponent.saturating_neg())
    }
}

/// Round to `digits` decimal places (negative rounds left of the point),
/// ties to even.
pub fn round_mag(x: f64, digits: i32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    if digits >= 0 {
        let scale = pow10(digits);
        (x * scale).round_ties_even() / scale
    } else {
        let scale = pow10(-digits);
        (x / scale).round_ties_even() * scale
    }
}

/// Round to `sig` significant digits.
pub fn round_sig(x: f64, sig: i32) -> f64 {
    round_mag(x, sig - magnitude(x) - 1)
}

/// General format with `sig` significant digits: trailing zeros kept,
/// thousands grouped, scientific notation outside `1e-4 ..= 10^sig`.
pub fn repr_sig(x: f64, sig: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let precision = sig.max(1);
    let scientific = format!("{:.*e}", precision - 1, x);
    let exponent: i32 = scientific
        .rsplit_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let (mantissa, _) = scientific.split_once('e').unwrap_or((&scientific, ""));
        let mantissa = if mantissa.contains('.') {
            mantissa.to_owned()
        } else {
            format!("{mantissa}.")
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    let fixed = format!("{:.*}", decimals, x);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, ""));
    format!("{}.{}", group_thousands(int_part), frac_part)
}

fn group_thousands(int_part: &str) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}

/// Format `x` with enough significant digits to show magnitude `mag` plus
/// `padding` extra digits.
pub fn repr_mag(x: f64, mag: i32, padding: i32) -> String {
    let sig = (-mag + magnitude(x) + padding).max(0);
    repr_sig(round_sig(x, sig), sig as usize)
}

/// Format a (center, low, high) triple at the magnitude of `high - low`.
pub fn round_repr(center: f64, left: f64, right: f64, padding: i32) -> (String, String, String) {
    let mag = magnitude(right - left);
    (
        repr_mag(center, mag, padding),
        repr_mag(left, mag, padding),
        repr_mag(right, mag, padding),
    )
}

/// Median and default symmetric interval of a sorted array, formatted.
pub fn summarize(sorted: &[f64], padding: i32) -> Option<(String, String, String)> {
    let (left, right) = interval(sorted, DEFAULT_ALPHA)?;
    let center = median(sorted)?;
    Some(round_repr(center, left, right, padding))
}

/// Value of one unit in the last significant place of a decimal literal.
///
/// - digits after a decimal point set the resolution at the last written
///   digit, trailing zeros included (`"234.04"` → `0.01`, `"1.50"` → `0.01`);
/// - a trailing point means unit resolution (`"100."` → `1`);
/// - without a point, the last non-zero digit sets it (`"2300"` → `100`);
/// - an exponent suffix scales the result (`"2342e3"` → `1000`);
/// - any literal whose value is zero returns `0.0`.
///
/// The result is always non-negative.
///
/// # Errors
/// `ParseError` if `literal` is not `[+-]digits[.digits][(e|E)[+-]digits]`.
pub fn sigfig_resolution(literal: &str) -> Result<f64> {
    let parsed = DecimalLiteral::parse(literal)?;
    let value: f64 = literal
        .trim()
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| FermiError::parse(literal, "not a finite number"))?;
    if value == 0.0 {
        return Ok(0.0);
    }

    let place = match parsed.fraction {
        Some(fraction) => -(fraction.len() as i32),
        None => parsed
            .integer
            .bytes()
            .rev()
            .take_while(|&b| b == b'0')
            .count() as i32,
    };
    let exponent = parsed
        .exponent
        .checked_add(place)
        .ok_or_else(|| FermiError::parse(literal, "exponent out of range"))?;
    Ok(pow10(exponent))
}

/// Pieces of a decimal literal, sign dropped.
struct DecimalLiteral<'a> {
    integer: &'a str,
    fraction: Option<&'a str>,
    exponent: i32,
}

impl<'a> DecimalLiteral<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        let text = input.trim();
        let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);

        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
            None => (unsigned, None),
        };

        let exponent = match exponent {
            None => 0,
            Some(exp) => {
                let digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(FermiError::parse(input, "malformed exponent"));
                }
                exp.parse::<i32>()
                    .map_err(|_| FermiError::parse(input, "exponent out of range"))?
            }
        };

        let (integer, fraction) = match mantissa.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (mantissa, None),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !fraction.is_none_or(all_digits) {
            return Err(FermiError::parse(input, "unexpected character in mantissa"));
        }
        if integer.is_empty() && fraction.is_none_or(str::is_empty) {
            return Err(FermiError::parse(input, "no digits"));
        }

        Ok(Self {
            integer,
            fraction,
            exponent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude() {
        assert_eq!(magnitude(1234.0), 3);
        assert_eq!(magnitude(-0.05), -2);
        assert_eq!(magnitude(1.0), 0);
        assert_eq!(magnitude(0.0), ZERO_MAGNITUDE);
    }

    #[test]
    fn test_rounding() {
        assert_relative_eq!(round_sig(1234.5678, 2), 1200.0);
        assert_relative_eq!(round_sig(0.012345, 3), 0.0123);
        assert_relative_eq!(round_mag(3.14159, 2), 3.14);
        assert_relative_eq!(round_mag(1234.0, -2), 1200.0);
    }

    #[test]
    fn test_repr_sig() {
        assert_eq!(repr_sig(1234.5, 6), "1,234.50");
        assert_eq!(repr_sig(0.5, 2), "0.50");
        assert_eq!(repr_sig(1200.0, 2), "1.2e+03");
        assert_eq!(repr_sig(0.00001234, 3), "1.23e-05");
        assert_eq!(repr_sig(-1234567.0, 7), "-1,234,567.");
    }

    #[test]
    fn test_round_repr_uses_interval_width() {
        let (c, l, r) = round_repr(1234.5678, 1230.1, 1240.9, DEFAULT_PADDING);
        assert_eq!(c, "1,235.");
        assert_eq!(l, "1,230.");
        assert_eq!(r, "1,241.");

        // a wider interval leaves fewer digits, which switches to scientific
        let (c, l, r) = round_repr(1234.5678, 1200.1, 1300.9, DEFAULT_PADDING);
        assert_eq!(c, "1.23e+03");
        assert_eq!(l, "1.20e+03");
        assert_eq!(r, "1.30e+03");
    }

    #[test]
    fn test_summarize() {
        let sorted: Vec<f64> = (0..1001).map(f64::from).collect();
        let (center, _, _) = summarize(&sorted, DEFAULT_PADDING).unwrap();
        assert_eq!(center, "5.0e+02");
        assert!(summarize(&[], DEFAULT_PADDING).is_none());
    }

    #[test]
    fn test_sigfig_resolution() {
        assert_eq!(sigfig_resolution("234.04").unwrap(), 0.01);
        assert_eq!(sigfig_resolution("2342e3").unwrap(), 1000.0);
        assert_eq!(sigfig_resolution("0").unwrap(), 0.0);
        assert_eq!(sigfig_resolution("0.000").unwrap(), 0.0);
        assert_eq!(sigfig_resolution("2300").unwrap(), 100.0);
        assert_eq!(sigfig_resolution("100.").unwrap(), 1.0);
        assert_eq!(sigfig_resolution("-7").unwrap(), 1.0);
        assert_relative_eq!(sigfig_resolution("3.323e4").unwrap(), 10.0);
        assert_relative_eq!(sigfig_resolution("-2342e-3").unwrap(), 0.001);
        assert_relative_eq!(sigfig_resolution("1.50").unwrap(), 0.01);
    }

    #[test]
    fn test_sigfig_resolution_extreme_exponents() {
        for huge in ["10e2147483647", "1e2147483647", "1e400"] {
            assert!(
                matches!(sigfig_resolution(huge), Err(FermiError::ParseError { .. })),
                "{huge:?} should be out of range"
            );
        }
        assert_eq!(sigfig_resolution("1e-2147483648").unwrap(), 0.0);
        assert_eq!(pow10(i32::MIN), 0.0);
        assert!(pow10(i32::MAX).is_infinite());
    }

    #[test]
    fn test_sigfig_resolution_rejects_garbage() {
        for bad in ["", ".", "abc", "1.2.3", "1e", "1e+", "--1", "1,000", "0x10"] {
            assert!(
                matches!(sigfig_resolution(bad), Err(FermiError::ParseError { .. })),
                "{bad:?} should not parse"
            );
        }
    }
}
