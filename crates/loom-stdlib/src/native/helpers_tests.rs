//! Tests for helper functions

use super::helpers::*;
use loom_core::value::Value;
use loom_core::{DispatchError, Kind};

#[test]
fn test_arg_defaults_to_nil() {
    let args = [Value::Int(1)];
    assert_eq!(arg(&args, 0), &Value::Int(1));
    assert_eq!(arg(&args, 1), &Value::Nil);
}

#[test]
fn test_text_arg() {
    let args = [Value::from("hi"), Value::Int(3)];
    assert_eq!(text_arg(&args, 0), Ok("hi"));
    assert_eq!(
        text_arg(&args, 1),
        Err(DispatchError::TypeMismatch {
            wanted: Kind::Text,
            received: Kind::Int
        })
    );
}

#[test]
fn test_int_and_duration_args() {
    let args = [Value::Int(3), Value::Duration(5)];
    assert_eq!(int_arg(&args, 0), Ok(3));
    assert_eq!(duration_arg(&args, 1), Ok(5));
    assert!(int_arg(&args, 1).is_err());
    assert!(duration_arg(&args, 0).is_err());
}

#[test]
fn test_bytes_and_error_args() {
    let args = [Value::from(b"abc".to_vec()), Value::error("bad")];
    assert_eq!(bytes_arg(&args, 0), Ok(&b"abc"[..]));
    assert_eq!(error_arg(&args, 1), Ok("bad"));
    assert!(bytes_arg(&args, 1).is_err());
    assert!(error_arg(&args, 0).is_err());
}

#[test]
fn test_native_error() {
    assert_eq!(
        native_error("broken"),
        DispatchError::Native("broken".to_string())
    );
}
