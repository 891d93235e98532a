//! Error types for coercion, registration and dispatch

use std::path::PathBuf;

use thiserror::Error;

use crate::kind::Kind;

/// A strict coercion received a value whose shape it does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("function wants argument type {wanted} but received type {received}")]
pub struct ConversionError {
    pub wanted: Kind,
    pub received: Kind,
}

impl ConversionError {
    pub fn new(wanted: Kind, received: Kind) -> Self {
        ConversionError { wanted, received }
    }
}

/// Text that does not spell a duration such as `1h15m` or `-2.5s`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration {0:?}")]
pub struct ParseDurationError(pub String);

/// Failures of resolving or invoking a native function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("unknown library '{0}'")]
    UnknownLibrary(String),

    #[error("unknown function '{symbol}' in library '{library}'")]
    UnknownFunction { library: String, symbol: String },

    #[error("function wants argument type {wanted} but received type {received}")]
    TypeMismatch { wanted: Kind, received: Kind },

    #[error("function wants {wanted} arguments but received {received}")]
    ArgumentCount { wanted: usize, received: usize },

    /// Raised by a native function body.
    #[error("{0}")]
    Native(String),
}

impl From<ConversionError> for DispatchError {
    fn from(err: ConversionError) -> Self {
        DispatchError::TypeMismatch {
            wanted: err.wanted,
            received: err.received,
        }
    }
}

/// Failures while populating the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("cannot register '{symbol}': library '{library}' was never seeded")]
    UnknownLibrary { library: String, symbol: String },

    #[error("extension '{extension}' cannot create library '{library}'")]
    ExtensionCreatedLibrary { extension: String, library: String },
}

/// Failures loading a capability descriptor.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("failed to read capabilities at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse capabilities: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_message() {
        let err = ConversionError::new(Kind::Sequence, Kind::Int);
        assert_eq!(
            err.to_string(),
            "function wants argument type sequence but received type int"
        );
    }

    #[test]
    fn test_conversion_error_becomes_type_mismatch() {
        let err: DispatchError = ConversionError::new(Kind::Int, Kind::Bool).into();
        assert_eq!(
            err,
            DispatchError::TypeMismatch {
                wanted: Kind::Int,
                received: Kind::Bool
            }
        );
        assert_eq!(
            err.to_string(),
            "function wants argument type int but received type bool"
        );
    }

    #[test]
    fn test_dispatch_error_messages() {
        assert_eq!(
            DispatchError::UnknownLibrary("net".to_string()).to_string(),
            "unknown library 'net'"
        );
        let err = DispatchError::UnknownFunction {
            library: "os".to_string(),
            symbol: "fork".to_string(),
        };
        assert_eq!(err.to_string(), "unknown function 'fork' in library 'os'");
        let err = DispatchError::ArgumentCount {
            wanted: 1,
            received: 2,
        };
        assert_eq!(err.to_string(), "function wants 1 arguments but received 2");
    }
}
