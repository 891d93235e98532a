//! `libs` subcommand handler

use crate::utils::build_registry;
use loom_core::Capabilities;
use std::process;

/// List library names, or every signature of `library`
pub fn handle_libs(caps: &Capabilities, library: Option<&str>) {
    let registry = build_registry(caps);

    let Some(library) = library else {
        for name in registry.libraries() {
            println!("{name}");
        }
        return;
    };

    match registry.symbols(library) {
        Some(descriptors) => {
            for descriptor in descriptors {
                println!("{}", descriptor.signature());
            }
        }
        None => {
            eprintln!("Error: unknown library '{library}'");
            process::exit(1);
        }
    }
}
