//! Call adapter between script values and native entry points.

use log::trace;

use crate::coerce;
use crate::errors::DispatchError;
use crate::kind::Kind;
use crate::registry::{Descriptor, Registry};
use crate::value::{Handle, Value};

/// Resolves `(library, symbol)` pairs and invokes them with adapted
/// arguments. Holds nothing but the borrowed registry.
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher<'r> {
    registry: &'r Registry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Dispatcher { registry }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn invoke(
        &self,
        library: &str,
        symbol: &str,
        args: &[Value],
    ) -> Result<Value, DispatchError> {
        let descriptor = self.registry.resolve(library, symbol)?;
        self.call(descriptor, args)
    }

    /// Check arity, bind each argument to its declared kind, then run the
    /// native entry point.
    pub fn call(&self, descriptor: &Descriptor, args: &[Value]) -> Result<Value, DispatchError> {
        let params = descriptor.params();
        if args.len() != params.len() {
            return Err(DispatchError::ArgumentCount {
                wanted: params.len(),
                received: args.len(),
            });
        }

        let bound = params
            .iter()
            .zip(args)
            .map(|(kind, arg)| bind(*kind, arg))
            .collect::<Result<Vec<_>, _>>()?;

        trace!("calling {descriptor}");
        (descriptor.func())(&bound)
    }
}

/// Adapt one argument to a declared parameter kind.
///
/// Exact shapes bind as-is and `Nil` binds as the zero value. Numbers convert
/// among int, float and duration, and text converts to bytes or runes. Scalars
/// are never wrapped into sequences.
pub fn bind(kind: Kind, value: &Value) -> Result<Value, DispatchError> {
    if kind == Kind::Any || kind == value.kind() {
        return Ok(value.clone());
    }

    let mismatch = || DispatchError::TypeMismatch {
        wanted: kind,
        received: value.kind(),
    };

    let bound = match (kind, value) {
        (Kind::Int, Value::Nil | Value::Float(_) | Value::Duration(_)) => {
            Value::Int(coerce::to_int(value))
        }
        (Kind::Float, Value::Nil | Value::Int(_) | Value::Duration(_)) => {
            Value::Float(coerce::to_float(value))
        }
        (Kind::Bool, Value::Nil) => Value::Bool(false),
        (Kind::Text, Value::Nil) => Value::Text(String::new()),
        (Kind::Duration, _) => Value::Duration(coerce::to_duration(value)?),
        (Kind::Bytes, _) => Value::Native(Handle::Bytes(coerce::to_byte_seq(value)?)),
        (Kind::Runes, _) => Value::Native(Handle::Runes(coerce::to_rune_seq(value)?)),
        (Kind::Sequence, Value::Nil) => Value::sequence(Vec::new()),
        (Kind::Mapping, Value::Nil) => Value::empty_mapping(),
        _ => return Err(mismatch()),
    };
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(args: &[Value]) -> Result<Value, DispatchError> {
        Ok(args.first().cloned().unwrap_or(Value::Nil))
    }

    fn failing(_args: &[Value]) -> Result<Value, DispatchError> {
        Err(DispatchError::Native("boom".to_string()))
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_library("test");
        registry
            .register("test", "int", &[Kind::Int], Kind::Int, identity)
            .unwrap();
        registry
            .register("test", "list", &[Kind::Sequence], Kind::Sequence, identity)
            .unwrap();
        registry
            .register("test", "wait", &[Kind::Duration], Kind::Duration, identity)
            .unwrap();
        registry
            .register("test", "fail", &[], Kind::Nil, failing)
            .unwrap();
        registry
    }

    #[test]
    fn test_invoke_unknown_library() {
        let registry = registry();
        let result = Dispatcher::new(&registry).invoke("nope", "int", &[]);
        assert_eq!(result, Err(DispatchError::UnknownLibrary("nope".to_string())));
    }

    #[test]
    fn test_invoke_unknown_function() {
        let registry = registry();
        let result = Dispatcher::new(&registry).invoke("test", "nope", &[]);
        assert!(matches!(result, Err(DispatchError::UnknownFunction { .. })));
    }

    #[test]
    fn test_invoke_argument_count() {
        let registry = registry();
        let result = Dispatcher::new(&registry).invoke("test", "int", &[]);
        assert_eq!(
            result,
            Err(DispatchError::ArgumentCount {
                wanted: 1,
                received: 0
            })
        );
    }

    #[test]
    fn test_invoke_coerces_float_to_int() {
        let registry = registry();
        let result = Dispatcher::new(&registry).invoke("test", "int", &[Value::Float(2.9)]);
        assert_eq!(result, Ok(Value::Int(2)));
    }

    #[test]
    fn test_invoke_rejects_text_for_int() {
        let registry = registry();
        let err = Dispatcher::new(&registry)
            .invoke("test", "int", &[Value::from("2")])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "function wants argument type int but received type text"
        );
    }

    #[test]
    fn test_invoke_does_not_wrap_scalars() {
        let registry = registry();
        let err = Dispatcher::new(&registry)
            .invoke("test", "list", &[Value::Int(1)])
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::TypeMismatch {
                wanted: Kind::Sequence,
                received: Kind::Int
            }
        );
    }

    #[test]
    fn test_invoke_duration_names_int() {
        let registry = registry();
        let err = Dispatcher::new(&registry)
            .invoke("test", "wait", &[Value::Bool(true)])
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::TypeMismatch {
                wanted: Kind::Int,
                received: Kind::Bool
            }
        );
    }

    #[test]
    fn test_invoke_propagates_native_errors() {
        let registry = registry();
        let result = Dispatcher::new(&registry).invoke("test", "fail", &[]);
        assert_eq!(result, Err(DispatchError::Native("boom".to_string())));
    }

    #[test]
    fn test_bind_nil_as_zero_values() {
        assert_eq!(bind(Kind::Int, &Value::Nil), Ok(Value::Int(0)));
        assert_eq!(bind(Kind::Float, &Value::Nil), Ok(Value::Float(0.0)));
        assert_eq!(bind(Kind::Bool, &Value::Nil), Ok(Value::Bool(false)));
        assert_eq!(bind(Kind::Text, &Value::Nil), Ok(Value::from("")));
        assert_eq!(bind(Kind::Duration, &Value::Nil), Ok(Value::Duration(0)));
        assert_eq!(bind(Kind::Sequence, &Value::Nil), Ok(Value::sequence(vec![])));
        assert_eq!(bind(Kind::Bytes, &Value::Nil), Ok(Value::from(Vec::<u8>::new())));
    }

    #[test]
    fn test_bind_text_to_bytes_and_runes() {
        assert_eq!(
            bind(Kind::Bytes, &Value::from("hi")),
            Ok(Value::from(b"hi".to_vec()))
        );
        assert_eq!(
            bind(Kind::Runes, &Value::from("世界")),
            Ok(Value::from(vec!['世', '界']))
        );
        assert_eq!(
            bind(Kind::Bytes, &Value::Bool(true)),
            Err(DispatchError::TypeMismatch {
                wanted: Kind::Text,
                received: Kind::Bool
            })
        );
    }

    #[test]
    fn test_bind_exact_and_any() {
        let seq = Value::sequence(vec![Value::Int(1)]);
        assert_eq!(bind(Kind::Sequence, &seq), Ok(seq.clone()));
        assert_eq!(bind(Kind::Any, &seq), Ok(seq));
        assert_eq!(
            bind(Kind::Error, &Value::error("x")),
            Ok(Value::error("x"))
        );
        assert!(bind(Kind::Error, &Value::from("x")).is_err());
        assert!(bind(Kind::Bool, &Value::Int(1)).is_err());
    }

    #[test]
    fn test_invoke_is_deterministic() {
        let registry = registry();
        let dispatcher = Dispatcher::new(&registry);
        let args = [Value::from("x")];
        let first = dispatcher.invoke("test", "int", &args);
        for _ in 0..3 {
            assert_eq!(dispatcher.invoke("test", "int", &args), first);
        }
    }
}
