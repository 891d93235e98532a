//! `caps` subcommand handler

use loom_core::Capabilities;

pub fn handle_caps(caps: &Capabilities) {
    println!("{}", caps.to_ron());
}
