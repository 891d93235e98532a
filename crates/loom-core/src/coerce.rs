//! Coercion from dynamic values into native types.
//!
//! Scalar coercions (`to_bool`, `to_int`, `to_float`, `to_text`) are tolerant:
//! every value maps to *some* result and shapes that make no sense degrade to
//! the zero value of the target. Everything else is strict about the shape of
//! its input and fails with a [`ConversionError`] naming the wanted and the
//! received type:
//!
//! - `to_duration` takes only numeric or duration values
//! - `to_bool_seq`, `to_int_seq`, `to_float_seq` and `to_text_seq` take only
//!   sequences, but convert each element tolerantly
//! - `to_byte_seq` and `to_rune_seq` take only text
//!
//! `Nil` is accepted everywhere and produces the zero value or an empty
//! sequence.

use crate::errors::{ConversionError, ParseDurationError};
use crate::kind::Kind;
use crate::value::{Handle, Value};

const TRUE_TOKENS: &[&str] = &[
    "1", "t", "T", "true", "TRUE", "True", "y", "Y", "yes", "Yes", "YES",
];

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(n) | Value::Duration(n) => *n != 0,
        Value::Float(n) => *n != 0.0,
        Value::Text(s) => TRUE_TOKENS.contains(&s.as_str()),
        Value::Nil | Value::Sequence(_) | Value::Mapping(_) | Value::Native(_) => false,
    }
}

pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Int(n) | Value::Duration(n) => *n,
        Value::Float(n) => truncate(*n),
        Value::Bool(b) => *b as i64,
        Value::Text(s) => parse_int(s),
        Value::Nil | Value::Sequence(_) | Value::Mapping(_) | Value::Native(_) => 0,
    }
}

pub fn to_float(value: &Value) -> f64 {
    match value {
        Value::Float(n) => *n,
        Value::Int(n) | Value::Duration(n) => *n as f64,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Text(s) => s.parse().unwrap_or(0.0),
        Value::Nil | Value::Sequence(_) | Value::Mapping(_) | Value::Native(_) => 0.0,
    }
}

/// Display form of any value. See the `Display` impl of [`Value`].
pub fn to_text(value: &Value) -> String {
    value.to_string()
}

/// The one-character text for a code point. Code points that are not
/// Unicode scalar values become U+FFFD.
pub fn to_char(code_point: i64) -> String {
    u32::try_from(code_point)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
        .to_string()
}

/// First scalar value of `text`, or `'\0'` when it is empty.
pub fn to_rune(text: &str) -> char {
    text.chars().next().unwrap_or('\0')
}

/// Nanosecond count of a numeric or duration value.
///
/// Text is rejected even when it spells a duration; use [`parse_duration`]
/// explicitly for that.
pub fn to_duration(value: &Value) -> Result<i64, ConversionError> {
    match value {
        Value::Nil => Ok(0),
        Value::Int(n) | Value::Duration(n) => Ok(*n),
        Value::Float(n) => Ok(truncate(*n)),
        other => Err(ConversionError::new(Kind::Int, other.kind())),
    }
}

pub fn to_bool_seq(value: &Value) -> Result<Vec<bool>, ConversionError> {
    map_sequence(value, to_bool)
}

pub fn to_int_seq(value: &Value) -> Result<Vec<i64>, ConversionError> {
    map_sequence(value, to_int)
}

pub fn to_float_seq(value: &Value) -> Result<Vec<f64>, ConversionError> {
    map_sequence(value, to_float)
}

/// Elements that are not already text become empty text.
pub fn to_text_seq(value: &Value) -> Result<Vec<String>, ConversionError> {
    map_sequence(value, |item| match item {
        Value::Text(s) => s.clone(),
        _ => String::new(),
    })
}

/// UTF-8 encoding of a text value.
pub fn to_byte_seq(value: &Value) -> Result<Vec<u8>, ConversionError> {
    match value {
        Value::Nil => Ok(Vec::new()),
        Value::Text(s) => Ok(s.as_bytes().to_vec()),
        Value::Native(Handle::Bytes(bytes)) => Ok(bytes.clone()),
        // Kept for compatibility: a bare integer yields its low byte.
        Value::Int(n) => Ok(vec![*n as u8]),
        other => Err(ConversionError::new(Kind::Text, other.kind())),
    }
}

/// Unicode scalar values of a text value.
pub fn to_rune_seq(value: &Value) -> Result<Vec<char>, ConversionError> {
    match value {
        Value::Nil => Ok(Vec::new()),
        Value::Text(s) => Ok(s.chars().collect()),
        Value::Native(Handle::Runes(runes)) => Ok(runes.clone()),
        // Same low-byte quirk as `to_byte_seq`.
        Value::Int(n) => Ok(vec![char::from(*n as u8)]),
        other => Err(ConversionError::new(Kind::Text, other.kind())),
    }
}

fn map_sequence<T>(value: &Value, f: impl Fn(&Value) -> T) -> Result<Vec<T>, ConversionError> {
    match value {
        Value::Nil => Ok(Vec::new()),
        Value::Sequence(items) => Ok(items.borrow().iter().map(f).collect()),
        other => Err(ConversionError::new(Kind::Sequence, other.kind())),
    }
}

/// Rounds toward zero; out of range values saturate and NaN becomes 0.
fn truncate(n: f64) -> i64 {
    n.trunc() as i64
}

/// Decimal integer, falling back to a float literal with its fraction dropped.
fn parse_int(text: &str) -> i64 {
    match text.parse::<i64>() {
        Ok(n) => n,
        Err(_) => text.parse::<f64>().map(truncate).unwrap_or(0),
    }
}

/// Human-readable form of a nanosecond count, e.g. `2h3m0.5s` or `250ms`.
pub fn format_duration(nanos: i64) -> String {
    if nanos == 0 {
        return "0s".to_string();
    }

    let magnitude = nanos.unsigned_abs();
    let mut out = String::new();
    if nanos < 0 {
        out.push('-');
    }

    if magnitude < SECOND {
        let (scale, unit) = if magnitude < MICROSECOND {
            (NANOSECOND, "ns")
        } else if magnitude < MILLISECOND {
            (MICROSECOND, "µs")
        } else {
            (MILLISECOND, "ms")
        };
        out.push_str(&decimal(magnitude, scale));
        out.push_str(unit);
        return out;
    }

    let hours = magnitude / HOUR;
    let minutes = (magnitude % HOUR) / MINUTE;
    let rest = magnitude % MINUTE;
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    out.push_str(&decimal(rest, SECOND));
    out.push('s');
    out
}

/// `value / scale` written with the shortest exact fraction.
fn decimal(value: u64, scale: u64) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parses text such as `300ms`, `-1.5h` or `2h45m` into nanoseconds.
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
pub fn parse_duration(text: &str) -> Result<i64, ParseDurationError> {
    let invalid = || ParseDurationError(text.to_string());

    let (negative, mut rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if rest == "0" {
        return Ok(0);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_part, after) = rest.split_at(int_len);
        let (frac_part, after) = match after.strip_prefix('.') {
            Some(after) => {
                let frac_len = after.bytes().take_while(u8::is_ascii_digit).count();
                after.split_at(frac_len)
            }
            None => ("", after),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, after) = after.split_at(unit_len);
        let scale = u128::from(match unit {
            "ns" => NANOSECOND,
            "us" | "µs" | "μs" => MICROSECOND,
            "ms" => MILLISECOND,
            "s" => SECOND,
            "m" => MINUTE,
            "h" => HOUR,
            _ => return Err(invalid()),
        });

        if !int_part.is_empty() {
            let whole: u128 = int_part.parse().map_err(|_| invalid())?;
            total = whole
                .checked_mul(scale)
                .and_then(|n| total.checked_add(n))
                .ok_or_else(invalid)?;
        }
        if !frac_part.is_empty() {
            // Digits past nanosecond precision of an hour cannot matter.
            let digits = &frac_part[..frac_part.len().min(18)];
            let frac: u128 = digits.parse().map_err(|_| invalid())?;
            total = frac
                .checked_mul(scale)
                .map(|n| n / 10u128.pow(digits.len() as u32))
                .and_then(|n| total.checked_add(n))
                .ok_or_else(invalid)?;
        }
        rest = after;
    }

    if negative {
        if total > i64::MAX as u128 + 1 {
            return Err(invalid());
        }
        Ok((total as i128).wrapping_neg() as i64)
    } else {
        i64::try_from(total).map_err(|_| invalid())
    }
}
