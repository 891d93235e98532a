//! End-to-end calls through a seeded registry and the call adapter.

use loom_core::{
    Capabilities, DispatchError, Dispatcher, Kind, Platform, Registry, RuntimeVersion, Value,
};
use loom_stdlib::build_registry;

fn caps(sandboxed: bool, minor: u32) -> Capabilities {
    Capabilities {
        platform: Platform::Linux,
        sandboxed,
        runtime: RuntimeVersion::new(0, minor),
    }
}

fn registry() -> Registry {
    build_registry(&caps(false, 3)).unwrap()
}

fn call(registry: &Registry, library: &str, symbol: &str, args: &[Value]) -> Result<Value, DispatchError> {
    Dispatcher::new(registry).invoke(library, symbol, args)
}

fn message(result: Result<Value, DispatchError>) -> String {
    result.unwrap_err().to_string()
}

#[test]
fn test_base_libraries_are_seeded() {
    let registry = registry();
    assert_eq!(
        registry.libraries(),
        vec!["bytes", "core", "errors", "os", "time"]
    );
}

#[test]
fn test_scalar_conversions() {
    let registry = registry();
    assert_eq!(
        call(&registry, "core", "toInt", &[Value::from("2.1")]),
        Ok(Value::Int(2))
    );
    assert_eq!(
        call(&registry, "core", "toBool", &[Value::Float(-0.5)]),
        Ok(Value::Bool(true))
    );
    assert_eq!(
        call(&registry, "core", "toFloat", &[Value::Nil]),
        Ok(Value::Float(0.0))
    );
    assert_eq!(
        call(&registry, "core", "toString", &[Value::Int(42)]),
        Ok(Value::from("42"))
    );
}

#[test]
fn test_utf8_fidelity() {
    let registry = registry();
    let bytes = call(&registry, "core", "toByteSlice", &[Value::from("世界")]).unwrap();
    let runes = call(&registry, "core", "toRuneSlice", &[Value::from("世界")]).unwrap();
    assert_eq!(call(&registry, "core", "len", &[bytes.clone()]), Ok(Value::Int(6)));
    assert_eq!(call(&registry, "core", "len", &[runes]), Ok(Value::Int(2)));
    assert_eq!(
        call(&registry, "core", "toString", &[bytes]),
        Ok(Value::from("世界"))
    );
}

#[test]
fn test_byte_slice_rejects_sequences() {
    let registry = registry();
    let items = Value::sequence(vec![Value::Int(104), Value::Int(105)]);
    assert_eq!(
        message(call(&registry, "core", "toByteSlice", &[items])),
        "function wants argument type text but received type sequence"
    );
}

#[test]
fn test_bool_slice_rejects_scalars() {
    let registry = registry();
    assert_eq!(
        message(call(&registry, "core", "toBoolSlice", &[Value::Int(1)])),
        "function wants argument type sequence but received type int"
    );
}

#[test]
fn test_duration_rejects_text() {
    let registry = registry();
    assert_eq!(
        message(call(&registry, "core", "toDuration", &[Value::from("1s")])),
        "function wants argument type int but received type text"
    );
    assert_eq!(
        call(&registry, "core", "toDuration", &[Value::Float(1.5)]),
        Ok(Value::Duration(1))
    );
}

#[test]
fn test_typed_parameters_reject_bools() {
    let registry = registry();
    assert_eq!(
        message(call(&registry, "core", "toChar", &[Value::Bool(true)])),
        "function wants argument type int but received type bool"
    );
    assert_eq!(
        call(&registry, "core", "toChar", &[Value::Float(65.9)]),
        Ok(Value::from("A"))
    );
}

#[test]
fn test_sequence_elements_are_tolerant() {
    let registry = registry();
    let items = Value::sequence(vec![Value::Bool(true), Value::from("7"), Value::Nil]);
    assert_eq!(
        call(&registry, "core", "toIntSlice", &[items]),
        Ok(Value::from(vec![1i64, 7, 0]))
    );
    assert_eq!(
        call(&registry, "core", "toIntSlice", &[Value::Nil]),
        Ok(Value::from(Vec::<i64>::new()))
    );
}

#[test]
fn test_unknown_targets_and_arity() {
    let registry = registry();
    assert_eq!(
        call(&registry, "net", "dial", &[]),
        Err(DispatchError::UnknownLibrary("net".to_string()))
    );
    assert_eq!(
        message(call(&registry, "core", "toWidget", &[])),
        "unknown function 'toWidget' in library 'core'"
    );
    assert_eq!(
        call(&registry, "core", "toInt", &[]),
        Err(DispatchError::ArgumentCount {
            wanted: 1,
            received: 0
        })
    );
}

#[test]
fn test_errors_library() {
    let registry = registry();
    let err = call(&registry, "errors", "new", &[Value::from("no route")]).unwrap();
    assert_eq!(err.kind(), Kind::Error);
    assert_eq!(
        call(&registry, "errors", "message", &[err]),
        Ok(Value::from("no route"))
    );
}

#[test]
fn test_bytes_library_binds_text() {
    let registry = registry();
    assert_eq!(
        call(
            &registry,
            "bytes",
            "has_prefix",
            &[Value::from("loom runtime"), Value::from("loom")]
        ),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_time_constants_and_format() {
    let registry = registry();
    let hour = call(&registry, "time", "hour", &[]).unwrap();
    assert_eq!(hour, Value::Duration(3_600_000_000_000));
    assert_eq!(
        call(&registry, "time", "duration_string", &[hour]),
        Ok(Value::from("1h0m0s"))
    );
}

#[test]
fn test_extensions_follow_capabilities() {
    let legacy = build_registry(&caps(true, 1)).unwrap();
    assert!(legacy.resolve("os", "getppid").is_err());
    assert!(legacy.resolve("time", "until").is_err());
    assert!(legacy.resolve("time", "parse_duration").is_err());
    assert!(legacy.resolve("bytes", "contains_rune").is_err());

    let mid = build_registry(&caps(false, 2)).unwrap();
    assert!(mid.resolve("os", "getppid").is_ok());
    assert!(mid.resolve("time", "until").is_ok());
    assert!(mid.resolve("time", "parse_duration").is_err());

    let current = registry();
    assert_eq!(
        call(&current, "time", "parse_duration", &[Value::from("1.5h")]),
        Ok(Value::Duration(5_400_000_000_000))
    );
}

#[test]
fn test_seeding_is_idempotent() {
    let first = registry();
    let second = registry();
    assert_eq!(first.len(), second.len());
    for library in first.libraries() {
        let a: Vec<String> = first
            .symbols(library)
            .unwrap()
            .iter()
            .map(|d| d.signature())
            .collect();
        let b: Vec<String> = second
            .symbols(library)
            .unwrap()
            .iter()
            .map(|d| d.signature())
            .collect();
        assert_eq!(a, b);
    }
}

#[test]
fn test_dispatch_is_deterministic() {
    let registry = registry();
    let items = Value::sequence(vec![Value::Float(2.7), Value::from("x")]);
    let first = call(&registry, "core", "toFloatSlice", &[items.clone()]);
    for _ in 0..10 {
        assert_eq!(call(&registry, "core", "toFloatSlice", &[items.clone()]), first);
    }
}

#[test]
fn test_global_registry() {
    let first = loom_stdlib::global().unwrap();
    let second = loom_stdlib::global().unwrap();
    assert!(std::ptr::eq(first, second));
    assert!(first.has_library("core"));

    let dispatcher = loom_stdlib::dispatcher().unwrap();
    assert_eq!(
        dispatcher.invoke("core", "typeOf", &[Value::Float(1.0)]),
        Ok(Value::from("float"))
    );
}
