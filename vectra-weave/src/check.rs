//! Preflight validation for `vectra check`.
//!
//! Counts records in every configured stream, predicts the block count, and
//! for the grouped policy verifies the key table covers every block group —
//! reporting the shortfall a real run would hit as an alignment error,
//! without writing anything.

use std::path::{Path, PathBuf};

use serde::Serialize;

use vectra_core::{manifest, AlignmentSpec, Manifest};
use vectra_reader::{GroupRecords, KeyTable, LineRecords};
use vectra_renderer::Template;

use crate::error::WeaveError;

/// Record count for one configured stream.
#[derive(Debug, Clone, Serialize)]
pub struct StreamReport {
    /// Stream role in the manifest (`key`, `block`, `plaintext`, `secondary`).
    pub role: String,
    pub path: PathBuf,
    pub records: usize,
}

/// Key-table coverage for the grouped policy.
#[derive(Debug, Clone, Serialize)]
pub struct KeyCoverage {
    /// Key rows the block stream requires (`ceil(blocks / group_size)`).
    pub needed: usize,
    /// Key rows actually present.
    pub available: usize,
}

/// Result of a preflight check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub policy: String,
    pub output: PathBuf,
    pub streams: Vec<StreamReport>,
    /// Blocks a run would render.
    pub expected_blocks: usize,
    /// Grouped policy only.
    pub key_coverage: Option<KeyCoverage>,
    /// Declared placeholder tokens that never occur in the template.
    pub unused_tokens: Vec<String>,
    /// True when a run of this manifest would not hit an alignment error.
    pub ok: bool,
}

/// Validate the manifest at `manifest_path` without writing output.
pub fn check(manifest_path: &Path) -> Result<CheckReport, WeaveError> {
    let m = manifest::load(manifest_path)?;
    let template = Template::new(vectra_reader::read_text(&m.template)?);
    // Prologue and epilogue must open even though check renders nothing.
    vectra_reader::read_text(&m.prologue)?;
    vectra_reader::read_text(&m.epilogue)?;

    let declared = m.declared_tokens();
    let occurring = template.occurring(&declared);
    let unused_tokens: Vec<String> = declared
        .iter()
        .filter(|t| !occurring.contains(t))
        .map(|t| t.to_string())
        .collect();

    let (streams, expected_blocks, key_coverage) = survey_streams(&m)?;
    let ok = key_coverage
        .as_ref()
        .map(|c| c.available >= c.needed)
        .unwrap_or(true);

    Ok(CheckReport {
        policy: m.alignment.policy_name().to_string(),
        output: m.output.clone(),
        streams,
        expected_blocks,
        key_coverage,
        unused_tokens,
        ok,
    })
}

fn survey_streams(
    m: &Manifest,
) -> Result<(Vec<StreamReport>, usize, Option<KeyCoverage>), WeaveError> {
    match &m.alignment {
        AlignmentSpec::Grouped {
            group_size,
            key_file,
            key_fields,
            block_file,
            block_fields,
        } => {
            let keys = KeyTable::load(key_file, key_fields)?;
            let mut blocks = 0usize;
            for record in GroupRecords::open(block_file, block_fields)? {
                record?;
                blocks += 1;
            }
            let needed = blocks.div_ceil(*group_size);
            let streams = vec![
                stream("key", key_file, keys.len()),
                stream("block", block_file, blocks),
            ];
            let coverage = KeyCoverage {
                needed,
                available: keys.len(),
            };
            Ok((streams, blocks, Some(coverage)))
        }
        AlignmentSpec::CrossProduct {
            key_file,
            plaintext_file,
            secondary_files,
            ..
        } => {
            let keys = LineRecords::read_all(key_file)?.len();
            let plaintexts = LineRecords::read_all(plaintext_file)?.len();
            let mut streams = vec![
                stream("key", key_file, keys),
                stream("plaintext", plaintext_file, plaintexts),
            ];
            let mut secondary_total = 0usize;
            for file in secondary_files {
                let records = LineRecords::read_all(file)?.len();
                secondary_total += records;
                streams.push(stream("secondary", file, records));
            }
            let expected = keys * plaintexts * secondary_total;
            Ok((streams, expected, None))
        }
    }
}

fn stream(role: &str, path: &Path, records: usize) -> StreamReport {
    StreamReport {
        role: role.to_string(),
        path: path.to_path_buf(),
        records,
    }
}
