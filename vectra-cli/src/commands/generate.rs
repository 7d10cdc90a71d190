//! `vectra generate` — assemble and write the output document.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use vectra_weave::pipeline::{run, RunMode};
use vectra_weave::GenerateReport;

/// Arguments for `vectra generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the run manifest (YAML).
    #[arg(long)]
    pub manifest: PathBuf,

    /// Assemble everything but write nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let mode = if self.dry_run {
            RunMode::DryRun
        } else {
            RunMode::Write
        };
        let report = run(&self.manifest, mode)
            .with_context(|| format!("generate failed for '{}'", self.manifest.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        print_report(&report, self.dry_run);
        Ok(())
    }
}

fn print_report(report: &GenerateReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    println!(
        "{prefix}{} {} blocks, {} bytes ({} policy)",
        "✓".green(),
        report.blocks,
        report.bytes,
        report.policy
    );
    let marker = if report.written { "✎" } else { "~" };
    println!("  {marker}  {}", report.output.display());
}
