//! Base-N number conversion
//!
//! Parses and formats doubles in any base from 2 to 36. Digits above 9 are
//! the uppercase letters `A`-`Z`; lowercase letters are reserved for
//! operator spellings, so `dec` is an operator while `DEC` is 0xDEC in
//! base 16.
//!
//! # Formatting
//!
//! Precision counts significant digits: every digit of the integer part
//! uses up one, and only what remains is spent on the fraction. Rounding is
//! round-half-up in the target base, applied once by adding half a unit in
//! the last fractional place before the digits are produced. Trailing zero
//! fraction digits are trimmed, and the radix point goes with them when
//! nothing is left.
//!
//! # Exponents
//!
//! A lowercase `e` is tolerated once inside a literal and the digits after
//! it are checked against the base, but no scaling is applied: `1.2e4`
//! parses as `1.2`.

use crate::error::{CalcError, CalcResult};
use std::f64::consts::LN_2;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Mantissa bits of an IEEE 754 double
const MANTISSA_BITS: f64 = 53.0;

/// Largest precision a double can honour in `base`: floor(53 ln 2 / ln base)
pub fn significant_digits(base: u32) -> u32 {
    (MANTISSA_BITS * LN_2 / f64::from(base).ln()) as u32
}

/// Whether `base` is supported
pub fn is_valid_base(base: i64) -> bool {
    (i64::from(MIN_BASE)..=i64::from(MAX_BASE)).contains(&base)
}

fn check_base(base: u32) -> CalcResult<()> {
    if is_valid_base(i64::from(base)) {
        Ok(())
    } else {
        Err(CalcError::InvalidBase(i64::from(base)))
    }
}

/// Value of an ASCII digit in `base`, if it is one
pub fn digit_value(c: u8, base: u32) -> Option<u32> {
    let d = match c {
        b'0'..=b'9' => u32::from(c - b'0'),
        b'A'..=b'Z' => u32::from(c - b'A') + 10,
        _ => return None,
    };
    (d < base).then_some(d)
}

/// Character for digit `d`; out-of-range digits render as '0'
pub fn digit_char(d: u32, base: u32) -> char {
    if d >= base {
        return '0';
    }
    char::from_digit(d, base)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('0')
}

// =============================================================================
// Parsing
// =============================================================================

/// Parse the first whitespace-delimited token of `text` as a number in `base`.
///
/// Accepts one optional leading sign, digits of the base, and at most one
/// radix point. Anything else, including a literal with no digits at all,
/// is a [`CalcError::ParseError`].
pub fn parse(text: &str, base: u32) -> CalcResult<f64> {
    let token = text.split_ascii_whitespace().next().unwrap_or("");
    let malformed = || CalcError::ParseError(token.to_string());

    if token.is_empty() || check_base(base).is_err() {
        return Err(malformed());
    }

    let radix = f64::from(base);
    let mut num = 0.0;
    let mut started = false;
    let mut got_digit = false;
    let mut negative = false;
    let mut in_exponent = false;
    // 0 while in the integer part, then the place of the next fraction digit
    let mut frac_place = 0u32;

    for c in token.bytes() {
        match c {
            b'-' | b'+' => {
                if started {
                    return Err(malformed());
                }
                negative = c == b'-';
                started = true;
            }
            b'e' => {
                if !started || in_exponent {
                    return Err(malformed());
                }
                in_exponent = true;
            }
            b'.' => {
                if frac_place > 0 || in_exponent {
                    return Err(malformed());
                }
                frac_place = 1;
                started = true;
            }
            _ => {
                let d = digit_value(c, base).ok_or_else(malformed)?;
                started = true;
                if in_exponent {
                    continue;
                }
                if frac_place > 0 {
                    let mut part = f64::from(d);
                    for _ in 0..frac_place {
                        part /= radix;
                    }
                    num += part;
                    frac_place += 1;
                } else {
                    num = num * radix + f64::from(d);
                }
                got_digit = true;
            }
        }
    }

    if !got_digit {
        return Err(malformed());
    }
    Ok(if negative { -num } else { num })
}

// =============================================================================
// Formatting
// =============================================================================

/// Output buffer with a hard length limit
struct Bounded {
    text: String,
    room: usize,
}

impl Bounded {
    /// `max_len` counts a terminator slot, as C buffers do
    fn new(max_len: usize) -> Self {
        Bounded {
            text: String::new(),
            room: max_len.saturating_sub(1),
        }
    }

    fn put(&mut self, c: char) -> CalcResult<()> {
        if self.text.len() >= self.room {
            return Err(CalcError::BufferTooSmall {
                partial: self.text.clone(),
            });
        }
        self.text.push(c);
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> CalcResult<()> {
        s.chars().try_for_each(|c| self.put(c))
    }
}

/// Format `x` in `base` with `precision` significant digits, no length limit
pub fn format(x: f64, base: u32, precision: i32) -> CalcResult<String> {
    format_bounded(x, base, precision, usize::MAX)
}

/// Format `x` into at most `max_len - 1` characters.
///
/// On overflow returns [`CalcError::BufferTooSmall`] holding the output
/// written so far (with trailing fraction zeros already trimmed).
pub fn format_bounded(x: f64, base: u32, precision: i32, max_len: usize) -> CalcResult<String> {
    check_base(base)?;
    let mut out = Bounded::new(max_len);

    if x.is_nan() {
        out.put_str("nan")?;
        return Ok(out.text);
    }

    let mut x = x;
    if x < 0.0 {
        out.put('-')?;
        x = -x;
    }
    if x.is_infinite() {
        out.put_str("inf")?;
        return Ok(out.text);
    }

    let radix = f64::from(base);
    let mut prec = precision.max(0);

    let mut place_value = 1.0;
    for _ in 0..prec {
        place_value *= radix;
    }
    x += 0.5 / place_value;

    let mut whole = x.floor();
    let mut frac = x - whole;

    if whole <= 0.0 {
        out.put('0')?;
    }

    // Integer digits come out least significant first
    let mut digits = Vec::new();
    while whole >= 1.0 {
        let digit = whole - (whole / radix).floor() * radix;
        digits.push(digit_char(digit as u32, base));
        whole /= radix;
        prec -= 1;
    }
    for c in digits.into_iter().rev() {
        out.put(c)?;
    }

    if prec <= 0 {
        return Ok(out.text);
    }

    // Everything after `keep` is a trailing zero (or the bare radix point)
    let mut keep = out.text.len();
    out.put('.')?;

    for _ in 0..prec {
        frac *= radix;
        let digit = frac.trunc();
        frac -= digit;
        let c = digit_char(digit as u32, base);
        if let Err(e) = out.put(c) {
            return Err(match e {
                CalcError::BufferTooSmall { mut partial } => {
                    partial.truncate(keep);
                    CalcError::BufferTooSmall { partial }
                }
                other => other,
            });
        }
        if c != '0' {
            keep = out.text.len();
        }
    }

    out.text.truncate(keep);
    Ok(out.text)
}
