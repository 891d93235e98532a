//! Type identities used in native signatures and diagnostics.

use std::fmt;

/// The type identity of a value, or of a declared native parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Accepts any value unchanged. Only meaningful as a parameter type.
    Any,
    Nil,
    Bool,
    Int,
    Float,
    Text,
    Sequence,
    Mapping,
    Duration,
    Bytes,
    Runes,
    BoolSlice,
    IntSlice,
    FloatSlice,
    TextSlice,
    Error,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Any => "any",
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Text => "text",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::Duration => "duration",
            Kind::Bytes => "bytes",
            Kind::Runes => "runes",
            Kind::BoolSlice => "[]bool",
            Kind::IntSlice => "[]int",
            Kind::FloatSlice => "[]float",
            Kind::TextSlice => "[]text",
            Kind::Error => "error",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
