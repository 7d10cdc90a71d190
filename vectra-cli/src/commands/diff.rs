//! `vectra diff` — show what generate would change.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use vectra_weave::diff::diff_output;

/// Arguments for `vectra diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the run manifest (YAML).
    #[arg(long)]
    pub manifest: PathBuf,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let diff = diff_output(&self.manifest)
            .with_context(|| format!("diff failed for '{}'", self.manifest.display()))?;

        match diff {
            None => println!("Output is up to date."),
            Some(diff) => {
                print!("{}", diff.unified_diff);
                if !diff.unified_diff.ends_with('\n') {
                    println!();
                }
            }
        }

        Ok(())
    }
}
