//! The JSON number production.
//!
//! Accepts exactly `-? (0 | [1-9][0-9]*) (.[0-9]+)? ([eE][+-]?[0-9]+)?` and
//! classifies every rejection by the sub-stage that failed:
//!
//! | input           | kind                | offset               |
//! |-----------------|---------------------|----------------------|
//! | `x`, empty      | `NumberSignificand` | start                |
//! | `-`, `-x`       | `NumberSignificand` | just past the `-`    |
//! | `.`, `-.`, `.5` | `NumberDecimal`     | just past the `.`    |
//! | `1.`, `0.x`     | `NumberDecimal`     | just past the `.`    |
//! | `1e`, `1e+`     | `NumberExp`         | just past `e` / sign |
//!
//! The magnitude is folded from the digits while validating, so grammar and
//! conversion see the same bytes.

use crate::error::ErrorKind;

/// Powers of ten that are exactly representable as `f64`.
const POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Largest integer below which every `u64` converts to `f64` exactly.
const MAX_EXACT_SIGNIFICAND: u64 = 1 << 53;

/// Exponent magnitude beyond which every value is 0 or infinity anyway.
const EXP_SATURATION: i64 = 100_000;

/// A validated number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    pub value: f64,
    /// Offset just past the last byte of the number.
    pub end: usize,
}

/// A number rejected at one of the grammar sub-stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberError {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl NumberError {
    fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Accumulates decimal digits into a `u64` significand.
#[derive(Debug, Default)]
struct Significand {
    digits: u64,
    /// Set once a digit no longer fits.
    truncated: bool,
}

impl Significand {
    #[inline]
    fn push(&mut self, digit: u8) {
        let d = u64::from(digit - b'0');
        match self.digits.checked_mul(10).and_then(|v| v.checked_add(d)) {
            Some(v) => self.digits = v,
            None => self.truncated = true,
        }
    }
}

/// Validate a number starting at `start` and compute its value.
///
/// Never reads past the first byte that cannot continue the production;
/// that byte is left for the caller.
pub fn scan_number(input: &[u8], start: usize) -> Result<Number, NumberError> {
    let at = |pos: usize| input.get(pos).copied();
    let mut pos = start;
    let mut significand = Significand::default();

    let negative = at(pos) == Some(b'-');
    if negative {
        pos += 1;
    }

    // Integer part. A lone leading zero ends it.
    match at(pos) {
        Some(b'0') => {
            pos += 1;
        }
        Some(b'1'..=b'9') => {
            while let Some(d @ b'0'..=b'9') = at(pos) {
                significand.push(d);
                pos += 1;
            }
        }
        Some(b'.') => {
            return Err(NumberError::new(ErrorKind::NumberDecimal, pos + 1));
        }
        // Also covers a `-` with no digits after it.
        _ => {
            return Err(NumberError::new(ErrorKind::NumberSignificand, pos));
        }
    }

    // Fraction.
    let mut frac_len: i64 = 0;
    if at(pos) == Some(b'.') {
        pos += 1;
        while let Some(d @ b'0'..=b'9') = at(pos) {
            significand.push(d);
            frac_len += 1;
            pos += 1;
        }
        if frac_len == 0 {
            return Err(NumberError::new(ErrorKind::NumberDecimal, pos));
        }
    }

    // Exponent.
    let mut exp: i64 = 0;
    if let Some(b'e' | b'E') = at(pos) {
        pos += 1;
        let exp_negative = match at(pos) {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };
        let digits_start = pos;
        while let Some(d @ b'0'..=b'9') = at(pos) {
            exp = (exp * 10 + i64::from(d - b'0')).min(EXP_SATURATION);
            pos += 1;
        }
        if pos == digits_start {
            return Err(NumberError::new(ErrorKind::NumberExp, pos));
        }
        if exp_negative {
            exp = -exp;
        }
    }

    let magnitude = magnitude(&significand, exp - frac_len)
        .unwrap_or_else(|| slow_magnitude(&input[start..pos]));
    let value = if negative { -magnitude } else { magnitude };
    Ok(Number { value, end: pos })
}

/// `significand * 10^scale` when both factors are exact, so the single
/// multiply or divide rounds correctly.
#[inline]
fn magnitude(significand: &Significand, scale: i64) -> Option<f64> {
    if significand.truncated || significand.digits > MAX_EXACT_SIGNIFICAND {
        return None;
    }
    let digits = significand.digits as f64;
    if digits == 0.0 {
        return Some(0.0);
    }
    let power = *POW10.get(scale.unsigned_abs() as usize)?;
    Some(if scale >= 0 {
        digits * power
    } else {
        digits / power
    })
}

/// Correctly rounded conversion of an already validated number span.
///
/// The span is ASCII and the JSON number grammar is a subset of what
/// `f64::from_str` accepts, so the fallback value is never produced.
#[cold]
fn slow_magnitude(span: &[u8]) -> f64 {
    let span = span.strip_prefix(b"-").unwrap_or(span);
    std::str::from_utf8(span)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}
