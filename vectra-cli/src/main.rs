//! Vectra — test-vector source generator CLI.
//!
//! # Usage
//!
//! ```text
//! vectra generate --manifest <run.yaml> [--dry-run] [--json]
//! vectra check    --manifest <run.yaml> [--json]
//! vectra diff     --manifest <run.yaml>
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{check::CheckArgs, diff::DiffArgs, generate::GenerateArgs};

#[derive(Parser, Debug)]
#[command(
    name = "vectra",
    version,
    about = "Generate test-vector source files from templates and data streams",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the output document and write it atomically.
    Generate(GenerateArgs),

    /// Validate a manifest and its data streams without writing.
    Check(CheckArgs),

    /// Show a unified diff of what generate would write.
    Diff(DiffArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Check(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}
