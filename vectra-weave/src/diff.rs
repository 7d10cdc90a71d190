//! Dry-run unified diff support for `vectra diff`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use similar::TextDiff;

use vectra_core::manifest;

use crate::error::io_err;
use crate::pipeline::assemble;
use crate::WeaveError;

/// Unified diff between the current on-disk output and what a run would write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Assemble the document for the manifest at `manifest_path` and compare it
/// to the current output file.
///
/// Returns `None` when the on-disk output already matches. A missing output
/// file diffs against empty content. No files are written.
pub fn diff_output(manifest_path: &Path) -> Result<Option<OutputDiff>, WeaveError> {
    let m = manifest::load(manifest_path)?;
    let (document, _blocks) = assemble(&m)?;
    let existing = read_existing_or_empty(&m.output)?;

    if existing == document {
        return Ok(None);
    }

    let name = m
        .output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| m.output.display().to_string());
    let old_header = format!("a/{name}");
    let new_header = format!("b/{name}");
    let unified = TextDiff::from_lines(&existing, &document)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(OutputDiff {
        path: m.output,
        unified_diff: unified,
    }))
}

fn read_existing_or_empty(path: &Path) -> Result<String, WeaveError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(err) => Err(io_err(path, err)),
    }
}
