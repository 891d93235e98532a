//! Catalog of native functions reachable from scripts.
//!
//! Libraries are seeded by base units at startup. Extension units run
//! afterwards and may add or replace symbols inside a seeded library, but
//! never create one. Nothing is removed once registered, so after seeding
//! the registry is only read and can be shared between threads freely.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use log::debug;

use crate::capability::{Capabilities, Extension, InstallFn};
use crate::errors::{DispatchError, RegistryError};
use crate::kind::Kind;
use crate::value::Value;

/// Entry point of a native function. Arguments are already bound to the
/// declared parameter kinds when it runs.
pub type NativeFn = fn(&[Value]) -> Result<Value, DispatchError>;

/// A native function and its signature.
#[derive(Clone)]
pub struct Descriptor {
    library: String,
    name: String,
    params: Vec<Kind>,
    returns: Kind,
    func: NativeFn,
}

impl Descriptor {
    pub fn new(
        library: impl Into<String>,
        name: impl Into<String>,
        params: &[Kind],
        returns: Kind,
        func: NativeFn,
    ) -> Self {
        Descriptor {
            library: library.into(),
            name: name.into(),
            params: params.to_vec(),
            returns,
            func,
        }
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Kind] {
        &self.params
    }

    pub fn returns(&self) -> Kind {
        self.returns
    }

    pub fn func(&self) -> NativeFn {
        self.func
    }

    /// `library.name(param, ...) -> return`
    pub fn signature(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<&str> = self.params.iter().map(|k| k.name()).collect();
        write!(
            f,
            "{}.{}({}) -> {}",
            self.library,
            self.name,
            params.join(", "),
            self.returns
        )
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Descriptor({self})")
    }
}

/// Library name -> symbol name -> descriptor.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    libraries: BTreeMap<String, HashMap<String, Descriptor>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the top-level entry for a library. Seeding a library twice
    /// keeps the symbols it already has.
    pub fn register_library(&mut self, name: &str) {
        if !self.libraries.contains_key(name) {
            debug!("seeding library '{name}'");
            self.libraries.insert(name.to_string(), HashMap::new());
        }
    }

    /// Add a descriptor to its library, replacing any previous symbol of the
    /// same name.
    pub fn register_symbol(&mut self, descriptor: Descriptor) -> Result<(), RegistryError> {
        let Some(symbols) = self.libraries.get_mut(descriptor.library()) else {
            return Err(RegistryError::UnknownLibrary {
                library: descriptor.library.clone(),
                symbol: descriptor.name.clone(),
            });
        };
        if symbols.contains_key(descriptor.name()) {
            debug!("replacing {descriptor}");
        } else {
            debug!("registering {descriptor}");
        }
        symbols.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    /// Shorthand for registering a freshly built descriptor.
    pub fn register(
        &mut self,
        library: &str,
        name: &str,
        params: &[Kind],
        returns: Kind,
        func: NativeFn,
    ) -> Result<(), RegistryError> {
        self.register_symbol(Descriptor::new(library, name, params, returns, func))
    }

    pub fn resolve(&self, library: &str, name: &str) -> Result<&Descriptor, DispatchError> {
        let symbols = self
            .libraries
            .get(library)
            .ok_or_else(|| DispatchError::UnknownLibrary(library.to_string()))?;
        symbols
            .get(name)
            .ok_or_else(|| DispatchError::UnknownFunction {
                library: library.to_string(),
                symbol: name.to_string(),
            })
    }

    pub fn has_library(&self, name: &str) -> bool {
        self.libraries.contains_key(name)
    }

    /// Library names in sorted order.
    pub fn libraries(&self) -> Vec<&str> {
        self.libraries.keys().map(String::as_str).collect()
    }

    /// Descriptors of one library sorted by name, `None` if it is unknown.
    pub fn symbols(&self, library: &str) -> Option<Vec<&Descriptor>> {
        let symbols = self.libraries.get(library)?;
        let mut descriptors: Vec<&Descriptor> = symbols.values().collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        Some(descriptors)
    }

    /// Total number of registered symbols.
    pub fn len(&self) -> usize {
        self.libraries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run the base units in order, then every extension whose requirement
    /// `caps` satisfies.
    pub fn seed(
        &mut self,
        base: &[InstallFn],
        extensions: &[Extension],
        caps: &Capabilities,
    ) -> Result<(), RegistryError> {
        for install in base {
            install(self)?;
        }
        for extension in extensions {
            if extension.requires.satisfied_by(caps) {
                debug!("installing extension '{}'", extension.name);
                self.install_extension(extension)?;
            } else {
                debug!(
                    "skipping extension '{}': requires {:?}",
                    extension.name, extension.requires
                );
            }
        }
        Ok(())
    }

    /// Run one extension unit. A library it creates is removed again and
    /// reported, since only base units may seed libraries.
    fn install_extension(&mut self, extension: &Extension) -> Result<(), RegistryError> {
        let seeded: BTreeSet<String> = self.libraries.keys().cloned().collect();
        let installed = (extension.install)(self);

        let created: Vec<String> = self
            .libraries
            .keys()
            .filter(|name| !seeded.contains(*name))
            .cloned()
            .collect();
        for library in &created {
            self.libraries.remove(library);
        }
        installed?;

        match created.into_iter().next() {
            Some(library) => Err(RegistryError::ExtensionCreatedLibrary {
                extension: extension.name.to_string(),
                library,
            }),
            None => Ok(()),
        }
    }
}
