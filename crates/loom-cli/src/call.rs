//! `call` subcommand handler

use crate::utils::{build_registry, format_value, parse_args};
use loom_core::{Capabilities, Dispatcher};
use std::process;

/// Invoke `library.symbol` with JSON arguments and print the result
pub fn handle_call(caps: &Capabilities, library: &str, symbol: &str, args: &[String], json: bool) {
    let args = match parse_args(args) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    };

    let registry = build_registry(caps);
    let dispatcher = Dispatcher::new(&registry);
    let output = dispatcher
        .invoke(library, symbol, &args)
        .map_err(|e| e.to_string())
        .and_then(|value| format_value(&value, json));

    match output {
        Ok(text) => println!("{text}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
