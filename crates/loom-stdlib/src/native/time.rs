//! The `time` library. Instants are integers counting nanoseconds since the
//! Unix epoch; spans are duration values.

use super::helpers::*;
use loom_core::coerce;
use loom_core::value::Value;
use loom_core::{DispatchError, Kind, Registry, RegistryError};
use std::time::{SystemTime, UNIX_EPOCH};

pub const LIBRARY: &str = "time";

pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_library(LIBRARY);
    registry.register(LIBRARY, "now", &[], Kind::Int, native_time_now)?;
    registry.register(LIBRARY, "since", &[Kind::Int], Kind::Duration, native_time_since)?;
    registry.register(
        LIBRARY,
        "duration_string",
        &[Kind::Duration],
        Kind::Text,
        native_time_duration_string,
    )?;

    registry.register(LIBRARY, "nanosecond", &[], Kind::Duration, |_| {
        Ok(Value::Duration(1))
    })?;
    registry.register(LIBRARY, "microsecond", &[], Kind::Duration, |_| {
        Ok(Value::Duration(1_000))
    })?;
    registry.register(LIBRARY, "millisecond", &[], Kind::Duration, |_| {
        Ok(Value::Duration(1_000_000))
    })?;
    registry.register(LIBRARY, "second", &[], Kind::Duration, |_| {
        Ok(Value::Duration(1_000_000_000))
    })?;
    registry.register(LIBRARY, "minute", &[], Kind::Duration, |_| {
        Ok(Value::Duration(60_000_000_000))
    })?;
    registry.register(LIBRARY, "hour", &[], Kind::Duration, |_| {
        Ok(Value::Duration(3_600_000_000_000))
    })?;
    Ok(())
}

/// Extension unit: `time.until`.
pub fn install_until(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(LIBRARY, "until", &[Kind::Int], Kind::Duration, native_time_until)
}

/// Extension unit: `time.parse_duration`.
pub fn install_parse_duration(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(
        LIBRARY,
        "parse_duration",
        &[Kind::Text],
        Kind::Duration,
        native_time_parse_duration,
    )
}

/// Nanoseconds since the Unix epoch; negative before it.
fn unix_nanos() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_nanos()).unwrap_or(i64::MAX),
    }
}

/// Native function: time.now() -> int
pub fn native_time_now(_args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Int(unix_nanos()))
}

/// Native function: time.since(instant: int) -> duration
pub fn native_time_since(args: &[Value]) -> Result<Value, DispatchError> {
    let instant = int_arg(args, 0)?;
    Ok(Value::Duration(unix_nanos().saturating_sub(instant)))
}

/// Native function: time.until(instant: int) -> duration
pub fn native_time_until(args: &[Value]) -> Result<Value, DispatchError> {
    let instant = int_arg(args, 0)?;
    Ok(Value::Duration(instant.saturating_sub(unix_nanos())))
}

/// Native function: time.duration_string(d: duration) -> text
pub fn native_time_duration_string(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Text(coerce::format_duration(duration_arg(args, 0)?)))
}

/// Native function: time.parse_duration(text: text) -> duration
pub fn native_time_parse_duration(args: &[Value]) -> Result<Value, DispatchError> {
    let nanos = coerce::parse_duration(text_arg(args, 0)?)
        .map_err(|e| native_error(e.to_string()))?;
    Ok(Value::Duration(nanos))
}
