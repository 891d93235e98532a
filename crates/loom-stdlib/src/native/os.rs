//! Process-related native functions of the `os` library.
//!
//! - `os.getpid()` - id of the current process
//! - `os.getenv(name)` - environment variable, empty text when unset
//! - `os.getwd()` - current working directory
//! - `os.getppid()` - parent process id, only registered on hosts that are
//!   not sandboxed

use super::helpers::*;
use loom_core::value::Value;
use loom_core::{DispatchError, Kind, Registry, RegistryError};

pub const LIBRARY: &str = "os";

pub fn install(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_library(LIBRARY);
    registry.register(LIBRARY, "getpid", &[], Kind::Int, native_os_getpid)?;
    registry.register(LIBRARY, "getenv", &[Kind::Text], Kind::Text, native_os_getenv)?;
    registry.register(LIBRARY, "getwd", &[], Kind::Text, native_os_getwd)?;
    Ok(())
}

/// Extension unit: `os.getppid`.
pub fn install_getppid(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(LIBRARY, "getppid", &[], Kind::Int, native_os_getppid)
}

/// Native function: os.getpid() -> int
pub fn native_os_getpid(_args: &[Value]) -> Result<Value, DispatchError> {
    Ok(Value::Int(std::process::id() as i64))
}

/// Native function: os.getenv(name: text) -> text
pub fn native_os_getenv(args: &[Value]) -> Result<Value, DispatchError> {
    let value = std::env::var(text_arg(args, 0)?).unwrap_or_default();
    Ok(Value::Text(value))
}

/// Native function: os.getwd() -> text
pub fn native_os_getwd(_args: &[Value]) -> Result<Value, DispatchError> {
    let dir = std::env::current_dir()
        .map_err(|e| native_error(format!("os.getwd() failed: {e}")))?;
    Ok(Value::Text(dir.to_string_lossy().into_owned()))
}

/// Native function: os.getppid() -> int
#[cfg(unix)]
pub fn native_os_getppid(_args: &[Value]) -> Result<Value, DispatchError> {
    // SAFETY: getppid has no preconditions and cannot fail.
    let ppid = unsafe { libc::getppid() };
    Ok(Value::Int(ppid as i64))
}

/// Native function: os.getppid() -> int
#[cfg(not(unix))]
pub fn native_os_getppid(_args: &[Value]) -> Result<Value, DispatchError> {
    Err(native_error("os.getppid() is not supported on this platform"))
}
