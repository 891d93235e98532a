pub mod native;

use std::sync::OnceLock;

use log::debug;
use loom_core::capability::InstallFn;
use loom_core::{
    Capabilities, Dispatcher, Extension, Registry, RegistryError, Requirement, RuntimeVersion,
};

/// Base registration units, in seeding order.
pub const BASE_UNITS: &[InstallFn] = &[
    native::core::install,
    native::errors::install,
    native::bytes::install,
    native::os::install,
    native::time::install,
];

/// Capability-gated extension units, run after every base unit.
pub fn extensions() -> Vec<Extension> {
    vec![
        Extension::new(
            "bytes.contains_rune",
            Requirement::MinRuntime(RuntimeVersion::new(0, 2)),
            native::bytes::install_contains_rune,
        ),
        Extension::new(
            "os.getppid",
            Requirement::NotSandboxed,
            native::os::install_getppid,
        ),
        Extension::new(
            "time.until",
            Requirement::MinRuntime(RuntimeVersion::new(0, 2)),
            native::time::install_until,
        ),
        Extension::new(
            "time.parse_duration",
            Requirement::MinRuntime(RuntimeVersion::new(0, 3)),
            native::time::install_parse_duration,
        ),
    ]
}

/// Build an isolated registry with every unit `caps` allows.
pub fn build_registry(caps: &Capabilities) -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    registry.seed(BASE_UNITS, &extensions(), caps)?;
    debug!(
        "registry ready: {} libraries, {} symbols",
        registry.libraries().len(),
        registry.len()
    );
    Ok(registry)
}

static GLOBAL: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

/// The process-wide registry, built on first use from the detected
/// capabilities. Initialisation completes before any caller gets a reference.
pub fn global() -> Result<&'static Registry, RegistryError> {
    GLOBAL
        .get_or_init(|| build_registry(&Capabilities::detect()))
        .as_ref()
        .map_err(Clone::clone)
}

/// A dispatcher over the process-wide registry.
pub fn dispatcher() -> Result<Dispatcher<'static>, RegistryError> {
    global().map(Dispatcher::new)
}
