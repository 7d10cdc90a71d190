//! Document assembly pipeline — the canonical `generate` entrypoint.
//!
//! Strictly sequential: records are consumed in file order, blocks are
//! rendered and appended to one owned buffer in block-index order, and the
//! output is written exactly once at the end. A run either completes and
//! writes the full document or fails before the output path is touched.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use vectra_core::{manifest, Manifest};
use vectra_renderer::{Renderer, Template};

use crate::align::Aligner;
use crate::error::WeaveError;
use crate::writer::{atomic_write, WriteResult};

/// Whether the pipeline writes the output or only reports what it would do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Write,
    DryRun,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    /// Destination file.
    pub output: std::path::PathBuf,
    /// Alignment policy name, matching the manifest tag.
    pub policy: String,
    /// Number of rendered blocks.
    pub blocks: usize,
    /// Byte length of the assembled document.
    pub bytes: usize,
    /// False in dry-run mode.
    pub written: bool,
    pub generated_at: DateTime<Utc>,
}

/// Assemble the complete output document for `m`.
///
/// Returns the document text and the number of rendered blocks. No files
/// are written.
pub(crate) fn assemble(m: &Manifest) -> Result<(String, usize), WeaveError> {
    let prologue = vectra_reader::read_text(&m.prologue)?;
    let template = Template::new(vectra_reader::read_text(&m.template)?);
    let epilogue = vectra_reader::read_text(&m.epilogue)?;

    let renderer = Renderer::new(m.declared_tokens());
    let aligner = Aligner::from_spec(&m.alignment)?;

    let mut document = prologue;
    let mut blocks = 0usize;
    for (index, bindings) in aligner.enumerate() {
        let bindings = bindings?;
        let block = renderer
            .render(&template, &bindings)
            .map_err(|source| WeaveError::Render {
                block: index,
                source,
            })?;
        document.push_str(&block);
        blocks += 1;
        log::debug!("rendered block {index}");
    }
    document.push_str(&epilogue);

    Ok((document, blocks))
}

/// Run the full pipeline for the manifest at `manifest_path`.
pub fn run(manifest_path: &Path, mode: RunMode) -> Result<GenerateReport, WeaveError> {
    let m = manifest::load(manifest_path)?;
    let (document, blocks) = assemble(&m)?;

    log::info!(
        "assembled {} blocks ({} bytes) for {}",
        blocks,
        document.len(),
        m.output.display()
    );

    let result = atomic_write(&m.output, &document, mode == RunMode::DryRun)?;

    Ok(GenerateReport {
        output: m.output.clone(),
        policy: m.alignment.policy_name().to_string(),
        blocks,
        bytes: document.len(),
        written: matches!(result, WriteResult::Written { .. }),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::*;

    /// Writes a minimal grouped-policy fixture and returns the manifest path.
    fn grouped_fixture(dir: &TempDir, keys: &str, blocks: &str) -> PathBuf {
        fs::write(dir.path().join("head.txt"), "HEAD\n").unwrap();
        fs::write(dir.path().join("tail.txt"), "TAIL\n").unwrap();
        fs::write(dir.path().join("block.tmpl"), "[K=KEY1 D=DATAIN]\n").unwrap();
        fs::write(dir.path().join("keys.txt"), keys).unwrap();
        fs::write(dir.path().join("blocks.txt"), blocks).unwrap();
        let manifest = "\
prologue: head.txt
template: block.tmpl
epilogue: tail.txt
output: out.vhd
alignment:
  policy: grouped
  group_size: 2
  key_file: keys.txt
  key_fields: [KEY1]
  block_file: blocks.txt
  block_fields: [DATAIN]
";
        let path = dir.path().join("run.yaml");
        fs::write(&path, manifest).unwrap();
        path
    }

    #[test]
    fn run_assembles_prologue_blocks_epilogue() {
        let dir = TempDir::new().unwrap();
        let manifest = grouped_fixture(&dir, "ka\n", "d0\nd1\n");
        let report = run(&manifest, RunMode::Write).unwrap();

        assert_eq!(report.blocks, 2);
        assert!(report.written);
        assert_eq!(report.policy, "grouped");

        let out = fs::read_to_string(dir.path().join("out.vhd")).unwrap();
        assert_eq!(out, "HEAD\n[K=ka D=d0]\n[K=ka D=d1]\nTAIL\n");
        assert_eq!(report.bytes, out.len());
    }

    #[test]
    fn empty_block_stream_yields_prologue_plus_epilogue() {
        let dir = TempDir::new().unwrap();
        let manifest = grouped_fixture(&dir, "ka\n", "");
        let report = run(&manifest, RunMode::Write).unwrap();
        assert_eq!(report.blocks, 0);
        let out = fs::read_to_string(dir.path().join("out.vhd")).unwrap();
        assert_eq!(out, "HEAD\nTAIL\n");
    }

    #[test]
    fn dry_run_reports_but_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let manifest = grouped_fixture(&dir, "ka\n", "d0\n");
        let report = run(&manifest, RunMode::DryRun).unwrap();
        assert!(!report.written);
        assert_eq!(report.blocks, 1);
        assert!(!dir.path().join("out.vhd").exists());
    }

    #[test]
    fn missing_input_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        let manifest = grouped_fixture(&dir, "ka\n", "d0\n");
        // Pre-existing output from an earlier run.
        fs::write(dir.path().join("out.vhd"), "previous").unwrap();
        fs::remove_file(dir.path().join("blocks.txt")).unwrap();

        let err = run(&manifest, RunMode::Write).unwrap_err();
        assert!(matches!(err, WeaveError::Read(_)), "{err:?}");
        assert_eq!(
            fs::read_to_string(dir.path().join("out.vhd")).unwrap(),
            "previous",
            "failed run must not touch the output path"
        );
    }

    #[test]
    fn key_shortfall_aborts_without_writing() {
        let dir = TempDir::new().unwrap();
        // group_size 2, 3 block records → needs key rows 0 and 1; only row 0 exists.
        let manifest = grouped_fixture(&dir, "ka\n", "d0\nd1\nd2\n");
        let err = run(&manifest, RunMode::Write).unwrap_err();
        assert!(matches!(err, WeaveError::AlignmentRange { .. }), "{err:?}");
        assert!(!dir.path().join("out.vhd").exists());
    }

    #[test]
    fn undeclared_tokens_in_template_stay_verbatim() {
        let dir = TempDir::new().unwrap();
        let manifest = grouped_fixture(&dir, "ka\n", "d0\n");
        // KEY2 is not in any schema; it is ordinary text, not a placeholder.
        fs::write(dir.path().join("block.tmpl"), "DATAIN KEY1 KEY2\n").unwrap();

        let report = run(&manifest, RunMode::Write).unwrap();
        assert_eq!(report.blocks, 1);
        let out = fs::read_to_string(dir.path().join("out.vhd")).unwrap();
        assert!(out.contains("d0 ka KEY2"), "got: {out}");
    }
}
