//! Native function implementations exposed to Loom scripts.
//!
//! Each submodule is one library. Its `install` function is the base unit
//! that seeds the library; `install_*` functions are extension units that
//! only run when the host's capabilities allow them:
//!
//! - `core`: conversions (toBool, toInt, toByteSlice, toDuration, ...)
//! - `errors`: error values
//! - `bytes`: byte sequence operations
//! - `os`: process information
//! - `time`: clock and duration helpers
//! - `helpers`: shared argument accessors

pub mod bytes;
pub mod core;
pub mod errors;
pub mod helpers;
pub mod os;
pub mod time;

#[cfg(test)]
mod helpers_tests;
