//! Helper functions for native function implementations.
//!
//! Arguments reach natives already bound to their declared kinds, so these
//! only fail when a function is registered with a signature that does not
//! match what its body reads.

use loom_core::value::{Handle, Value};
use loom_core::{DispatchError, Kind};

fn mismatch(wanted: Kind, value: &Value) -> DispatchError {
    DispatchError::TypeMismatch {
        wanted,
        received: value.kind(),
    }
}

/// The argument at `index`, or `Nil` when the call supplied fewer.
pub fn arg(args: &[Value], index: usize) -> &Value {
    const NIL: &Value = &Value::Nil;
    args.get(index).unwrap_or(NIL)
}

pub fn text_arg(args: &[Value], index: usize) -> Result<&str, DispatchError> {
    match arg(args, index) {
        Value::Text(s) => Ok(s),
        other => Err(mismatch(Kind::Text, other)),
    }
}

pub fn int_arg(args: &[Value], index: usize) -> Result<i64, DispatchError> {
    match arg(args, index) {
        Value::Int(n) => Ok(*n),
        other => Err(mismatch(Kind::Int, other)),
    }
}

pub fn duration_arg(args: &[Value], index: usize) -> Result<i64, DispatchError> {
    match arg(args, index) {
        Value::Duration(n) => Ok(*n),
        other => Err(mismatch(Kind::Duration, other)),
    }
}

pub fn bytes_arg(args: &[Value], index: usize) -> Result<&[u8], DispatchError> {
    match arg(args, index) {
        Value::Native(Handle::Bytes(bytes)) => Ok(bytes),
        other => Err(mismatch(Kind::Bytes, other)),
    }
}

pub fn error_arg(args: &[Value], index: usize) -> Result<&str, DispatchError> {
    match arg(args, index) {
        Value::Native(Handle::Error(message)) => Ok(message),
        other => Err(mismatch(Kind::Error, other)),
    }
}

/// Wrap a failure raised inside a native body.
pub fn native_error(message: impl Into<String>) -> DispatchError {
    DispatchError::Native(message.into())
}
