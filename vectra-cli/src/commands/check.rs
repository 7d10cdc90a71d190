//! `vectra check` — preflight validation and stream visibility.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use vectra_weave::check::check;
use vectra_weave::CheckReport;

/// Arguments for `vectra check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the run manifest (YAML).
    #[arg(long)]
    pub manifest: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct StreamTableRow {
    #[tabled(rename = "role")]
    role: String,
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "records")]
    records: usize,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let report = check(&self.manifest)
            .with_context(|| format!("check failed for '{}'", self.manifest.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.ok {
                bail!("check found blocking problems");
            }
            return Ok(());
        }

        print_report(&report);
        if !report.ok {
            bail!("check found blocking problems");
        }
        Ok(())
    }
}

fn print_report(report: &CheckReport) {
    let rows: Vec<StreamTableRow> = report
        .streams
        .iter()
        .map(|s| StreamTableRow {
            role: s.role.clone(),
            file: s.path.display().to_string(),
            records: s.records,
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");

    println!(
        "policy: {}, expected blocks: {}",
        report.policy, report.expected_blocks
    );

    if let Some(coverage) = &report.key_coverage {
        if coverage.available >= coverage.needed {
            println!(
                "{} key table covers all {} block groups",
                "✓".green(),
                coverage.needed
            );
        } else {
            println!(
                "{} key table has {} rows but {} block groups are needed",
                "✗".red(),
                coverage.available,
                coverage.needed
            );
        }
    }

    if !report.unused_tokens.is_empty() {
        println!(
            "{} declared but unused in template: {}",
            "!".yellow(),
            report.unused_tokens.join(", ")
        );
    }

    if report.ok {
        println!("{} '{}' is ready to generate", "✓".green(), report.output.display());
    }
}
