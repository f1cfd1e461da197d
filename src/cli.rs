//! Command-line interface definitions for infgen.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// EDK2 module test-scaffolding generator.
#[derive(Parser)]
#[command(name = "infgen", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress progress output; show only errors.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output with section and resolution diagnostics.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Parse a module description file and write resolved scaffolding JSON.
    Generate(GenerateArgs),
    /// Print the extracted sections of a module description file.
    Inspect(InspectArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(Parser)]
pub struct GenerateArgs {
    /// Path to the module description (INF) file.
    pub inf: PathBuf,

    /// Destination directory for the generated scaffold.
    pub dest: PathBuf,

    /// Root directory for [Sources] paths (defaults to the INF's directory).
    #[arg(long)]
    pub source_root: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(Parser)]
pub struct InspectArgs {
    /// Path to the module description (INF) file.
    pub inf: PathBuf,
}
