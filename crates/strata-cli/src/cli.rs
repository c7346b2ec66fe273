//! CLI argument definitions for Strata.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "Resolve versioned module requirement trees",
    long_about = "Strata collapses a tree of versioned module requirements into one \
                  consistent dependency set: it detects cycles, applies manual exclusions, \
                  keeps the highest version of every module and prunes what is no longer reachable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a requirement file and print the accepted and rejected dependencies
    Resolve {
        /// Requirement file (TOML)
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Report circular dependencies instead of failing
        #[arg(long)]
        allow_cycles: bool,
        /// Accept major version changes instead of failing
        #[arg(long)]
        allow_breaches: bool,
    },

    /// Display the requirement tree
    Tree {
        /// Requirement file (TOML)
        file: PathBuf,
        /// Maximum depth
        #[arg(long)]
        depth: Option<u32>,
        /// Run resolution first and mark rejected nodes
        #[arg(long)]
        resolved: bool,
        /// Explain where a module is required from
        #[arg(long)]
        why: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Format {
    Text,
    Json,
}

pub fn parse() -> Cli {
    Cli::parse()
}
