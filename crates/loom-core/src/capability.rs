//! Capabilities of the hosting platform and the gates extension units check.
//!
//! A [`Capabilities`] value is resolved once at startup, either detected from
//! the build target or read from a RON descriptor:
//!
//! ```ron
//! (
//!     platform: Linux,
//!     sandboxed: true,
//!     runtime: (major: 0, minor: 2),
//! )
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CapabilityError, RegistryError};
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Wasm,
    Other,
}

impl Platform {
    /// The platform this crate was compiled for.
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_family = "wasm") {
            Platform::Wasm
        } else {
            Platform::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        RuntimeVersion { major, minor }
    }

    /// Version of this crate, which is the runtime version hosts report.
    pub fn current() -> Self {
        let major = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
        let minor = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
        RuntimeVersion { major, minor }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Facts about the host that decide which extension units run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub platform: Platform,
    /// A sandboxed host hides process-level information such as the parent pid.
    #[serde(default)]
    pub sandboxed: bool,
    pub runtime: RuntimeVersion,
}

impl Capabilities {
    pub fn detect() -> Self {
        Capabilities {
            platform: Platform::current(),
            sandboxed: cfg!(target_family = "wasm"),
            runtime: RuntimeVersion::current(),
        }
    }

    pub fn from_ron(source: &str) -> Result<Self, CapabilityError> {
        Ok(ron::de::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, CapabilityError> {
        let source = std::fs::read_to_string(path).map_err(|source| CapabilityError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&source)
    }

    pub fn to_ron(&self) -> String {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

/// Predicate an extension unit needs to hold before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Always,
    NotSandboxed,
    MinRuntime(RuntimeVersion),
    Platform(Platform),
    All(Vec<Requirement>),
}

impl Requirement {
    pub fn satisfied_by(&self, caps: &Capabilities) -> bool {
        match self {
            Requirement::Always => true,
            Requirement::NotSandboxed => !caps.sandboxed,
            Requirement::MinRuntime(version) => caps.runtime >= *version,
            Requirement::Platform(platform) => caps.platform == *platform,
            Requirement::All(requirements) => requirements.iter().all(|r| r.satisfied_by(caps)),
        }
    }
}

/// Registration function of a unit.
pub type InstallFn = fn(&mut Registry) -> Result<(), RegistryError>;

/// A registration unit that adds or replaces symbols in libraries seeded by
/// the base units, when its requirement holds.
#[derive(Debug, Clone)]
pub struct Extension {
    pub name: &'static str,
    pub requires: Requirement,
    pub install: InstallFn,
}

impl Extension {
    pub const fn new(name: &'static str, requires: Requirement, install: InstallFn) -> Self {
        Extension {
            name,
            requires,
            install,
        }
    }
}
