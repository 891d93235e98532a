//! Shared CLI utilities for loading capabilities and reading arguments

use log::debug;
use loom_core::{Capabilities, Registry, Value};
use std::path::Path;
use std::process;

/// Capabilities from `path` when given, detected otherwise, with the
/// `--sandboxed` override applied. Exits on an unreadable descriptor.
pub fn resolve_capabilities(path: Option<&Path>, sandboxed: bool) -> Capabilities {
    let mut caps = match path {
        Some(path) => match Capabilities::load(path) {
            Ok(caps) => caps,
            Err(err) => {
                eprintln!("Error: {err}");
                process::exit(1);
            }
        },
        None => Capabilities::detect(),
    };
    if sandboxed {
        caps.sandboxed = true;
    }
    debug!("capabilities: {caps:?}");
    caps
}

/// Build the registry for `caps`, exiting when a unit fails to install.
pub fn build_registry(caps: &Capabilities) -> Registry {
    match loom_stdlib::build_registry(caps) {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}

/// Decode command-line arguments as JSON values.
pub fn parse_args(args: &[String]) -> Result<Vec<Value>, String> {
    args.iter()
        .map(|arg| {
            serde_json::from_str::<serde_json::Value>(arg)
                .map(Value::from)
                .map_err(|e| format!("invalid JSON argument '{arg}': {e}"))
        })
        .collect()
}

/// Render a call result, as JSON when `json` is set.
pub fn format_value(value: &Value, json: bool) -> Result<String, String> {
    if json {
        serde_json::to_string(value).map_err(|e| format!("cannot encode result: {e}"))
    } else {
        Ok(value.to_string())
    }
}
