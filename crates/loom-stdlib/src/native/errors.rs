//! The `errors` library: error values scripts can create and inspect.

use super::helpers::*;
use loom_core::value::Value;
use loom_core::{DispatchError, Kind, Registry, RegistryError};

pub const LIBRARY: &str = "errors";

pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_library(LIBRARY);
    registry.register(LIBRARY, "new", &[Kind::Text], Kind::Error, native_errors_new)?;
    registry.register(LIBRARY, "message", &[Kind::Error], Kind::Text, native_errors_message)?;
    Ok(())
}

/// Native function: errors.new(message: text) -> error
pub fn native_errors_new(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::error(text_arg(args, 0)?))
}

/// Native function: errors.message(err: error) -> text
pub fn native_errors_message(args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::from(error_arg(args, 0)?))
}
