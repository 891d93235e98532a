use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod call;
mod caps;
mod libs;
mod logger;
mod utils;

#[cfg(test)]
mod tests;

use call::handle_call;
use caps::handle_caps;
use libs::handle_libs;

/// Get the version string including git revision
fn version() -> &'static str {
    concat!(env!("CARGO_PKG_VERSION"), " (git:", env!("GIT_HASH"), ")")
}

#[derive(Parser)]
#[command(
    author,
    version = version(),
    about = "Inspect and call Loom native libraries",
    long_about = None,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// RON capability descriptor to seed the registry with
    #[arg(long, global = true, value_name = "FILE")]
    capabilities: Option<PathBuf>,
    /// Treat the host as sandboxed, whatever the descriptor says
    #[arg(long, global = true)]
    sandboxed: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List libraries, or the signatures of one library
    Libs {
        /// Library to describe
        library: Option<String>,
    },
    /// Call a native function with JSON-encoded arguments
    Call {
        /// Library holding the function
        library: String,
        /// Function name
        symbol: String,
        /// Arguments, each a JSON value (e.g. 42, "text", [1, 2])
        args: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective capabilities as RON
    Caps,
}

fn main() {
    logger::init();
    let cli = Cli::parse();
    let caps = utils::resolve_capabilities(cli.capabilities.as_deref(), cli.sandboxed);

    match &cli.command {
        Commands::Libs { library } => {
            handle_libs(&caps, library.as_deref());
        }
        Commands::Call {
            library,
            symbol,
            args,
            json,
        } => {
            handle_call(&caps, library, symbol, args, *json);
        }
        Commands::Caps => {
            handle_caps(&caps);
        }
    }
}
