//! Command dispatch and handler modules.

mod resolve;
mod tree;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Resolve {
            file,
            format,
            allow_cycles,
            allow_breaches,
        } => resolve::exec(&file, format, allow_cycles, allow_breaches),
        Command::Tree {
            file,
            depth,
            resolved,
            why,
        } => tree::exec(&file, depth, resolved, why),
    }
}
