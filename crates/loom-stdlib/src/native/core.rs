//! Conversion natives of the `core` library: toBool, toInt, toString, ...
//!
//! Each one exposes a coercion to scripts. Strictly shaped inputs are
//! validated by the call adapter before the body runs, so the bodies only
//! convert.

use super::helpers::*;
use loom_core::coerce;
use loom_core::value::Value;
use loom_core::{DispatchError, Kind, Registry, RegistryError};

pub const LIBRARY: &str = "core";

pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_library(LIBRARY);

    registry.register(LIBRARY, "toBool", &[Kind::Any], Kind::Bool, native_to_bool)?;
    registry.register(LIBRARY, "toInt", &[Kind::Any], Kind::Int, native_to_int)?;
    registry.register(LIBRARY, "toFloat", &[Kind::Any], Kind::Float, native_to_float)?;
    registry.register(LIBRARY, "toString", &[Kind::Any], Kind::Text, native_to_string)?;
    registry.register(LIBRARY, "toChar", &[Kind::Int], Kind::Text, native_to_char)?;
    registry.register(LIBRARY, "toRune", &[Kind::Text], Kind::Int, native_to_rune)?;

    registry.register(
        LIBRARY,
        "toBoolSlice",
        &[Kind::Sequence],
        Kind::BoolSlice,
        native_to_bool_slice,
    )?;
    registry.register(
        LIBRARY,
        "toIntSlice",
        &[Kind::Sequence],
        Kind::IntSlice,
        native_to_int_slice,
    )?;
    registry.register(
        LIBRARY,
        "toFloatSlice",
        &[Kind::Sequence],
        Kind::FloatSlice,
        native_to_float_slice,
    )?;
    registry.register(
        LIBRARY,
        "toStringSlice",
        &[Kind::Sequence],
        Kind::TextSlice,
        native_to_string_slice,
    )?;
    registry.register(LIBRARY, "toByteSlice", &[Kind::Bytes], Kind::Bytes, native_passthrough)?;
    registry.register(LIBRARY, "toRuneSlice", &[Kind::Runes], Kind::Runes, native_passthrough)?;
    registry.register(
        LIBRARY,
        "toDuration",
        &[Kind::Duration],
        Kind::Duration,
        native_passthrough,
    )?;

    registry.register(LIBRARY, "typeOf", &[Kind::Any], Kind::Text, native_type_of)?;
    registry.register(LIBRARY, "len", &[Kind::Any], Kind::Int, native_len)?;
    Ok(())
}

/// Native function: toBool(value: Any) -> bool
pub fn native_to_bool(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Bool(coerce::to_bool(arg(args, 0))))
}

/// Native function: toInt(value: Any) -> int
pub fn native_to_int(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Int(coerce::to_int(arg(args, 0))))
}

/// Native function: toFloat(value: Any) -> float
pub fn native_to_float(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Float(coerce::to_float(arg(args, 0))))
}

/// Native function: toString(value: Any) -> text
pub fn native_to_string(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Text(coerce::to_text(arg(args, 0))))
}

/// Native function: toChar(code_point: int) -> text
pub fn native_to_char(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Text(coerce::to_char(int_arg(args, 0)?)))
}

/// Native function: toRune(text: text) -> int
/// Returns the code point of the first character, 0 for empty text.
pub fn native_to_rune(args: &[Value]) -> Result<Value, DispatchError> {
    let rune = coerce::to_rune(text_arg(args, 0)?);
    Ok(Value::Int(rune as i64))
}

pub fn native_to_bool_slice(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::from(coerce::to_bool_seq(arg(args, 0))?))
}

pub fn native_to_int_slice(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::from(coerce::to_int_seq(arg(args, 0))?))
}

pub fn native_to_float_slice(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::from(coerce::to_float_seq(arg(args, 0))?))
}

pub fn native_to_string_slice(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::from(coerce::to_text_seq(arg(args, 0))?))
}

/// Used by conversions whose whole work is done while binding the argument
/// (toByteSlice, toRuneSlice, toDuration).
pub fn native_passthrough(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(arg(args, 0).clone())
}

/// Native function: typeOf(value: Any) -> text
pub fn native_type_of(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::from(arg(args, 0).kind().name()))
}

/// Native function: len(value: Any) -> int
/// Byte length for text, element count for containers and slices.
pub fn native_len(args: &[Value]) -> Result<Value, DispatchError> {
    let value = arg(args, 0);
    let len = match value {
        Value::Text(s) => Some(s.len()),
        Value::Sequence(items) => Some(items.borrow().len()),
        Value::Mapping(entries) => Some(entries.borrow().len()),
        Value::Native(handle) => handle.len(),
        _ => None,
    };
    let len = len
        .ok_or_else(|| native_error(format!("len() is not defined for {}", value.kind())))?;
    Ok(Value::Int(len as i64))
}
