// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number formatting for indicator text and gauge tick labels.
//!
//! [`ValueFormat`] understands the d3-format specifier mini-language that chart configurations
//! are usually written in:
//!
//! ```text
//! [[fill]align][sign][0][width][,][.precision][~][type]
//! ```
//!
//! Supported types are `d`, `e`, `f`, `g`, `r`, `s`, `%` and the empty type. A missing precision
//! means zero decimals for `e`, `f` and `%`, six significant digits for `g`, `r` and `s`, and the
//! shortest round-trip representation for the empty type.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Largest precision for the decimal-count types `e`, `f` and `%`.
const MAX_DECIMALS: usize = 20;
/// Largest precision for the significant-digit types `g`, `r`, `s` and the empty type.
const MAX_SIGNIFICANT_DIGITS: usize = 21;

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Errors from parsing a format specifier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The specifier does not follow the grammar.
    #[error("invalid format specifier {0:?}")]
    Invalid(String),
    /// The specifier names a type this formatter does not implement.
    #[error("unsupported format type {0:?}")]
    UnsupportedType(char),
}

/// Alignment of padded output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum PadAlign {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    #[default]
    Right,
    /// Pad on both sides.
    Center,
    /// Pad between the sign and the digits.
    AfterSign,
}

/// Sign display policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum Sign {
    /// `-` for negatives only.
    #[default]
    Minus,
    /// `+` for positives, `-` for negatives.
    Plus,
    /// A space for positives, `-` for negatives.
    Space,
    /// Parentheses around negatives.
    Parens,
}

/// Presentation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormatType {
    /// Shortest representation (or `~g` when a precision is given).
    #[default]
    None,
    /// Integer, rounded.
    Integer,
    /// Exponent notation.
    Exponent,
    /// Fixed point.
    Fixed,
    /// Fixed or exponent notation, whichever is shorter for the precision.
    General,
    /// Fixed point rounded to significant digits.
    Rounded,
    /// SI-prefixed significant digits.
    Si,
    /// Fixed point, multiplied by 100, with a `%` suffix.
    Percent,
}

/// A parsed number format.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ValueFormat {
    fill: char,
    align: PadAlign,
    sign: Sign,
    width: usize,
    comma: bool,
    precision: Option<usize>,
    trim: bool,
    ty: FormatType,
}

impl ValueFormat {
    /// Parses a d3-format specifier.
    pub fn parse(spec: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::Invalid(spec.to_string());
        let chars: alloc::vec::Vec<char> = spec.chars().collect();
        let mut i = 0;
        let mut out = Self {
            fill: ' ',
            ..Self::default()
        };

        if let Some(align) = chars.get(1).copied().and_then(parse_align) {
            out.fill = chars[0];
            out.align = align;
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(parse_align) {
            out.align = align;
            i = 1;
        }

        match chars.get(i) {
            Some('+') => {
                out.sign = Sign::Plus;
                i += 1;
            }
            Some('-') => {
                out.sign = Sign::Minus;
                i += 1;
            }
            Some(' ') => {
                out.sign = Sign::Space;
                i += 1;
            }
            Some('(') => {
                out.sign = Sign::Parens;
                i += 1;
            }
            _ => {}
        }

        if chars.get(i) == Some(&'0') {
            out.fill = '0';
            out.align = PadAlign::AfterSign;
            i += 1;
        }

        let (width, next) = parse_digits(&chars, i);
        out.width = width.unwrap_or(0);
        i = next;

        if chars.get(i) == Some(&',') {
            out.comma = true;
            i += 1;
        }

        if chars.get(i) == Some(&'.') {
            let (precision, next) = parse_digits(&chars, i + 1);
            out.precision = Some(precision.ok_or_else(invalid)?);
            i = next;
        }

        if chars.get(i) == Some(&'~') {
            out.trim = true;
            i += 1;
        }

        if let Some(&c) = chars.get(i) {
            out.ty = match c {
                'd' => FormatType::Integer,
                'e' => FormatType::Exponent,
                'f' => FormatType::Fixed,
                'g' => FormatType::General,
                'r' => FormatType::Rounded,
                's' => FormatType::Si,
                '%' => FormatType::Percent,
                c if c.is_ascii_alphabetic() => return Err(FormatError::UnsupportedType(c)),
                _ => return Err(invalid()),
            };
            i += 1;
        }

        if i != chars.len() {
            return Err(invalid());
        }
        out.precision = match out.ty {
            FormatType::Integer => Some(0),
            FormatType::Exponent | FormatType::Fixed | FormatType::Percent => {
                out.precision.map(|p| p.min(MAX_DECIMALS))
            }
            _ => out.precision.map(|p| p.clamp(1, MAX_SIGNIFICANT_DIGITS)),
        };
        Ok(out)
    }

    /// Shortcut for `.{precision}s`.
    pub fn si(precision: usize) -> Self {
        Self {
            fill: ' ',
            precision: Some(precision.clamp(1, MAX_SIGNIFICANT_DIGITS)),
            ty: FormatType::Si,
            ..Self::default()
        }
    }

    /// Shortcut for `.{precision}f`.
    pub fn fixed(precision: usize) -> Self {
        Self {
            fill: ' ',
            precision: Some(precision.min(MAX_DECIMALS)),
            ty: FormatType::Fixed,
            ..Self::default()
        }
    }

    /// Returns the presentation type.
    pub fn format_type(&self) -> FormatType {
        self.ty
    }

    /// Formats `value`.
    pub fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return self.pad(String::new(), String::from("NaN"), String::new());
        }

        let negative = value < 0.0;
        let x = value.abs();
        let mut body = if x.is_infinite() {
            String::from("Infinity")
        } else {
            self.body(x)
        };

        // A value that rounds to zero drops its sign.
        let negative =
            negative && (x.is_infinite() || body.bytes().any(|b| matches!(b, b'1'..=b'9')));

        if self.comma {
            body = group_thousands(&body);
        }

        let (prefix, suffix) = match (negative, self.sign) {
            (true, Sign::Parens) => ("(", ")"),
            (true, _) => ("-", ""),
            (false, Sign::Plus) => ("+", ""),
            (false, Sign::Space) => (" ", ""),
            (false, _) => ("", ""),
        };
        self.pad(String::from(prefix), body, String::from(suffix))
    }

    fn body(&self, x: f64) -> String {
        let body = match self.ty {
            FormatType::None => match self.precision {
                Some(p) => {
                    return trim_zeros(&to_precision(x, p.max(1)));
                }
                None => format!("{x}"),
            },
            FormatType::Integer => format!("{:.0}", x),
            FormatType::Fixed => format!("{:.*}", self.precision.unwrap_or(0), x),
            FormatType::Percent => {
                let s = format!("{:.*}", self.precision.unwrap_or(0), x * 100.0);
                let s = if self.trim { trim_zeros(&s) } else { s };
                return s + "%";
            }
            FormatType::Exponent => {
                let s = to_exponential(x, self.precision.unwrap_or(0));
                return if self.trim { trim_zeros(&s) } else { s };
            }
            FormatType::General => to_precision(x, self.precision.unwrap_or(6).max(1)),
            FormatType::Rounded => to_rounded(x, self.precision.unwrap_or(6).max(1)),
            FormatType::Si => {
                let (s, prefix) = to_si(x, self.precision.unwrap_or(6).max(1));
                let s = if self.trim { trim_zeros(&s) } else { s };
                return s + prefix;
            }
        };
        if self.trim { trim_zeros(&body) } else { body }
    }

    fn pad(&self, prefix: String, body: String, suffix: String) -> String {
        let len = prefix.chars().count() + body.chars().count() + suffix.chars().count();
        if len >= self.width {
            return prefix + &body + &suffix;
        }
        let n = self.width - len;
        let fill = |n: usize| core::iter::repeat_n(self.fill, n).collect::<String>();
        match self.align {
            PadAlign::Left => prefix + &body + &suffix + &fill(n),
            PadAlign::Right => fill(n) + &prefix + &body + &suffix,
            PadAlign::Center => fill(n / 2) + &prefix + &body + &suffix + &fill(n - n / 2),
            PadAlign::AfterSign => prefix + &fill(n) + &body + &suffix,
        }
    }
}

impl FromStr for ValueFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Formats an axis tick value with just enough decimals for the tick spacing `step`.
pub fn format_tick(v: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 && step.is_finite() {
        let d = -step.log10().floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "step is in (0, 1), so d is a small positive integer"
        )]
        {
            (d as usize).min(12)
        }
    } else {
        0
    };
    let s = format!("{:.*}", decimals, v);
    // Avoid "-0" for ticks that straddle zero.
    if s.bytes().all(|b| matches!(b, b'-' | b'0' | b'.')) {
        format!("{:.*}", decimals, 0.0)
    } else {
        s
    }
}

fn parse_align(c: char) -> Option<PadAlign> {
    match c {
        '<' => Some(PadAlign::Left),
        '>' => Some(PadAlign::Right),
        '^' => Some(PadAlign::Center),
        '=' => Some(PadAlign::AfterSign),
        _ => None,
    }
}

fn parse_digits(chars: &[char], start: usize) -> (Option<usize>, usize) {
    let mut i = start;
    let mut value: Option<usize> = None;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        i += 1;
    }
    (value, i)
}

/// Splits `x >= 0` into `p` significant digits and a decimal exponent.
fn decompose(x: f64, p: usize) -> (String, i32) {
    let s = format!("{:.*e}", p.saturating_sub(1), x);
    let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    (digits, exp.parse().unwrap_or(0))
}

fn to_exponential(x: f64, decimals: usize) -> String {
    let s = format!("{:.*e}", decimals, x);
    match s.split_once('e') {
        Some((mantissa, exp)) if exp.starts_with('-') => format!("{mantissa}e{exp}"),
        Some((mantissa, exp)) => format!("{mantissa}e+{exp}"),
        None => s,
    }
}

fn to_precision(x: f64, p: usize) -> String {
    let (digits, exp) = decompose(x, p);
    let p_i32 = i32::try_from(p).unwrap_or(i32::MAX);
    if exp < -6 || exp >= p_i32 {
        let (first, rest) = digits.split_at(1);
        let mantissa = if rest.is_empty() {
            String::from(first)
        } else {
            format!("{first}.{rest}")
        };
        let sign = if exp < 0 { "-" } else { "+" };
        format!("{mantissa}e{sign}{}", exp.unsigned_abs())
    } else {
        place_point(&digits, exp)
    }
}

fn to_rounded(x: f64, p: usize) -> String {
    let (digits, exp) = decompose(x, p);
    place_point(&digits, exp)
}

/// Writes `digits` (first digit at 10^exp) in fixed notation.
fn place_point(digits: &str, exp: i32) -> String {
    let int_len = exp + 1;
    if int_len <= 0 {
        let zeros = "0".repeat(int_len.unsigned_abs() as usize);
        format!("0.{zeros}{digits}")
    } else {
        let int_len = int_len.unsigned_abs() as usize;
        if int_len >= digits.len() {
            let mut s = String::from(digits);
            s.push_str(&"0".repeat(int_len - digits.len()));
            s
        } else {
            format!("{}.{}", &digits[..int_len], &digits[int_len..])
        }
    }
}

/// Prefixes stop at yocto and yotta; magnitudes outside that range keep the end prefix and
/// spell out the remaining digits (`1e30` with `.3s` is `1000000Y`).
fn to_si(x: f64, p: usize) -> (String, &'static str) {
    if x == 0.0 {
        return (place_point(&"0".repeat(p), 0), "");
    }
    let (digits, exp) = decompose(x, p);
    let k = exp.div_euclid(3).clamp(-8, 8);
    let shifted = exp - 3 * k;
    // Below yocto the shift goes negative and the digits pick up leading zeros.
    (place_point(&digits, shifted), SI_PREFIXES[(k + 8).unsigned_abs() as usize])
}

fn trim_zeros(s: &str) -> String {
    if !s.contains('.') {
        return String::from(s);
    }
    // Keep any exponent suffix intact.
    let (num, tail) = match s.find('e') {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };
    let num = num.trim_end_matches('0').trim_end_matches('.');
    format!("{num}{tail}")
}

fn group_thousands(body: &str) -> String {
    let int_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    let (int, rest) = body.split_at(int_end);
    let mut out = String::with_capacity(body.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push_str(rest);
    out
}
