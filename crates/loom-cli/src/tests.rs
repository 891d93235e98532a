//! Tests for CLI utilities

#[cfg(test)]
mod tests {
    use super::super::logger::level_from_env;
    use super::super::utils::*;
    use log::LevelFilter;
    use loom_core::{Platform, RuntimeVersion, Value};
    use std::fs;

    #[test]
    fn test_parse_args() {
        let args = vec!["42".to_string(), "\"hi\"".to_string(), "[1, 2.5]".to_string()];
        let values = parse_args(&args).unwrap();
        assert_eq!(values[0], Value::Int(42));
        assert_eq!(values[1], Value::from("hi"));
        assert_eq!(
            values[2],
            Value::sequence(vec![Value::Int(1), Value::Float(2.5)])
        );
    }

    #[test]
    fn test_parse_args_rejects_bare_words() {
        let err = parse_args(&["hello".to_string()]).unwrap_err();
        assert!(err.contains("invalid JSON argument 'hello'"));
    }

    #[test]
    fn test_format_value() {
        let value = Value::from(vec![1i64, 2]);
        assert_eq!(format_value(&value, false).unwrap(), "[1 2]");
        assert_eq!(format_value(&value, true).unwrap(), "[1,2]");
        assert_eq!(format_value(&Value::Nil, true).unwrap(), "null");
    }

    #[test]
    fn test_resolve_capabilities_from_file() {
        let temp_path = std::env::temp_dir().join("loom_cli_test_caps.ron");
        fs::write(
            &temp_path,
            "(platform: Windows, runtime: (major: 0, minor: 1))",
        )
        .unwrap();

        let caps = resolve_capabilities(Some(&temp_path), false);
        assert_eq!(caps.platform, Platform::Windows);
        assert_eq!(caps.runtime, RuntimeVersion::new(0, 1));
        assert!(!caps.sandboxed);

        let caps = resolve_capabilities(Some(&temp_path), true);
        assert!(caps.sandboxed);

        // Cleanup
        let _ = fs::remove_file(temp_path);
    }

    #[test]
    fn test_build_registry_respects_sandbox() {
        let caps = resolve_capabilities(None, true);
        let registry = build_registry(&caps);
        assert!(registry.resolve("os", "getppid").is_err());
        assert!(registry.resolve("os", "getpid").is_ok());
    }

    #[test]
    fn test_log_level_from_env() {
        assert_eq!(level_from_env(None), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("1".into())), LevelFilter::Trace);
    }
}
