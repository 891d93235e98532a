pub mod capability;
pub mod coerce;
pub mod dispatch;
pub mod errors;
pub mod kind;
pub mod registry;
pub mod value;


// Re-export commonly used types for convenience
pub use capability::{Capabilities, Extension, Platform, Requirement, RuntimeVersion};
pub use dispatch::Dispatcher;
pub use errors::{CapabilityError, ConversionError, DispatchError, RegistryError};
pub use kind::Kind;
pub use registry::{Descriptor, NativeFn, Registry};
pub use value::{Handle, MapKey, Value};
