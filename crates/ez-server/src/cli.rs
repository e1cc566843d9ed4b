use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for the `ezd` binary.
#[derive(Debug, Parser)]
#[command(name = "ezd", version, about = "Ezriya matching and workflow functions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the function endpoints over HTTP
    Serve {
        /// Listen address, overriding `server.bind`
        #[arg(long)]
        bind: Option<String>,
    },

    /// Load workflow templates from a TOML seed file
    SeedTemplates {
        /// Path to a file of `[[templates]]` tables
        file: PathBuf,
    },
}
