//! The `bytes` library: operations over byte sequences.
//!
//! Parameters are declared as `bytes`, so text arguments arrive here already
//! encoded as UTF-8.

use super::helpers::*;
use loom_core::value::Value;
use loom_core::{DispatchError, Kind, Registry, RegistryError};

pub const LIBRARY: &str = "bytes";

pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_library(LIBRARY);

    let pair = &[Kind::Bytes, Kind::Bytes];
    registry.register(LIBRARY, "contains", pair, Kind::Bool, native_bytes_contains)?;
    registry.register(LIBRARY, "equal", pair, Kind::Bool, native_bytes_equal)?;
    registry.register(LIBRARY, "has_prefix", pair, Kind::Bool, native_bytes_has_prefix)?;
    registry.register(LIBRARY, "has_suffix", pair, Kind::Bool, native_bytes_has_suffix)?;
    registry.register(LIBRARY, "index", pair, Kind::Int, native_bytes_index)?;
    registry.register(LIBRARY, "to_upper", &[Kind::Bytes], Kind::Bytes, native_bytes_to_upper)?;
    registry.register(LIBRARY, "to_lower", &[Kind::Bytes], Kind::Bytes, native_bytes_to_lower)?;
    Ok(())
}

/// Extension unit: `bytes.contains_rune`.
pub fn install_contains_rune(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        LIBRARY,
        "contains_rune",
        &[Kind::Bytes, Kind::Int],
        Kind::Bool,
        native_bytes_contains_rune,
    )
}

/// Byte offset of the first occurrence of `needle`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Apply a text case mapping when the bytes are UTF-8, otherwise map ASCII only.
fn map_case(bytes: &[u8], text: fn(&str) -> String, ascii: fn(&u8) -> u8) -> Vec<u8> {
    match std::str::from_utf8(bytes) {
        Ok(s) => text(s).into_bytes(),
        Err(_) => bytes.iter().map(ascii).collect(),
    }
}

/// Native function: bytes.contains(b: bytes, sub: bytes) -> bool
pub fn native_bytes_contains(args: &[Value]) -> Result<Value, DispatchError> {
    let found = find(bytes_arg(args, 0)?, bytes_arg(args, 1)?).is_some();
    Ok(Value::Bool(found))
}

/// Native function: bytes.equal(a: bytes, b: bytes) -> bool
pub fn native_bytes_equal(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Bool(bytes_arg(args, 0)? == bytes_arg(args, 1)?))
}

/// Native function: bytes.has_prefix(b: bytes, prefix: bytes) -> bool
pub fn native_bytes_has_prefix(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Bool(bytes_arg(args, 0)?.starts_with(bytes_arg(args, 1)?)))
}

/// Native function: bytes.has_suffix(b: bytes, suffix: bytes) -> bool
pub fn native_bytes_has_suffix(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Bool(bytes_arg(args, 0)?.ends_with(bytes_arg(args, 1)?)))
}

/// Native function: bytes.index(b: bytes, sub: bytes) -> int
/// Returns -1 when `sub` does not occur.
pub fn native_bytes_index(args: &[Value]) -> Result<Value, DispatchError> {
    let index = find(bytes_arg(args, 0)?, bytes_arg(args, 1)?)
        .map(|i| i as i64)
        .unwrap_or(-1);
    Ok(Value::Int(index))
}

pub fn native_bytes_to_upper(args: &[Value]) -> Result<Value, DispatchError> {
    let upper = map_case(bytes_arg(args, 0)?, str::to_uppercase, u8::to_ascii_uppercase);
    Ok(Value::from(upper))
}

pub fn native_bytes_to_lower(args: &[Value]) -> Result<Value, DispatchError> {
    let lower = map_case(bytes_arg(args, 0)?, str::to_lowercase, u8::to_ascii_lowercase);
    Ok(Value::from(lower))
}

/// Native function: bytes.contains_rune(b: bytes, rune: int) -> bool
/// Invalid UTF-8 sequences in `b` are read as U+FFFD.
pub fn native_bytes_contains_rune(args: &[Value]) -> Result<Value, DispatchError> {
    let bytes = bytes_arg(args, 0)?;
    let Some(rune) = u32::try_from(int_arg(args, 1)?).ok().and_then(char::from_u32) else {
        return Ok(Value::Bool(false));
    };
    let found = String::from_utf8_lossy(bytes).contains(rune);
    Ok(Value::Bool(found))
}
