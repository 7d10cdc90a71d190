//! Block alignment strategies.
//!
//! One polymorphic [`Aligner`] with two concrete variants, selected
//! explicitly by the manifest's `alignment.policy` — never guessed from the
//! shape of the data files:
//!
//! - [`GroupedAligner`] — a fixed-size batch of blocks shares one key-table
//!   row (`key row = block index / group_size`); each block adds its own
//!   fast-varying fields from a multi-line block record.
//! - [`CrossProductAligner`] — exhaustive nested join of key × plaintext ×
//!   secondary streams, key outermost, secondary record innermost.
//!
//! Both yield one [`Bindings`] per block, in block-index order.

use std::fs::File;
use std::io::BufReader;

use vectra_core::{AlignmentSpec, FieldSchema, ManifestError, PlaceholderToken};
use vectra_reader::{GroupRecords, KeyTable, LineRecords};
use vectra_renderer::Bindings;

use crate::error::WeaveError;

// ---------------------------------------------------------------------------
// Aligner
// ---------------------------------------------------------------------------

/// A configured alignment strategy, iterated once per run.
pub enum Aligner {
    Grouped(GroupedAligner),
    CrossProduct(CrossProductAligner),
}

impl Aligner {
    /// Open every stream the spec names and build the strategy.
    ///
    /// Stream-open failures surface here, before any block is emitted.
    pub fn from_spec(spec: &AlignmentSpec) -> Result<Self, WeaveError> {
        match spec {
            AlignmentSpec::Grouped {
                group_size,
                key_file,
                key_fields,
                block_file,
                block_fields,
            } => {
                // Manifest loading validates this, but the spec type is
                // constructible directly; group 0 would divide by zero.
                if *group_size == 0 {
                    return Err(WeaveError::Manifest(ManifestError::Invalid {
                        reason: "group_size must be at least 1".to_string(),
                    }));
                }
                let keys = KeyTable::load(key_file, key_fields)?;
                let blocks = GroupRecords::open(block_file, block_fields)?;
                Ok(Aligner::Grouped(GroupedAligner {
                    keys,
                    key_fields: key_fields.clone(),
                    group_size: *group_size,
                    blocks,
                    block_fields: block_fields.clone(),
                }))
            }
            AlignmentSpec::CrossProduct {
                key_file,
                key_field,
                plaintext_file,
                plaintext_field,
                secondary_files,
                secondary_field,
            } => {
                let keys = LineRecords::read_all(key_file)?;
                let plaintexts = LineRecords::read_all(plaintext_file)?;
                let mut secondaries = Vec::with_capacity(secondary_files.len());
                for file in secondary_files {
                    secondaries.push(LineRecords::read_all(file)?);
                }
                Ok(Aligner::CrossProduct(CrossProductAligner {
                    key_field: key_field.clone(),
                    plaintext_field: plaintext_field.clone(),
                    secondary_field: secondary_field.clone(),
                    keys,
                    plaintexts,
                    secondaries,
                    ki: 0,
                    pi: 0,
                    si: 0,
                    ri: 0,
                }))
            }
        }
    }
}

impl Iterator for Aligner {
    type Item = Result<Bindings, WeaveError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Aligner::Grouped(a) => a.next(),
            Aligner::CrossProduct(a) => a.next(),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped
// ---------------------------------------------------------------------------

/// Policy A: block `i` binds key row `i / group_size` plus its own block
/// record. The key table is held in memory; block records stream lazily.
pub struct GroupedAligner {
    keys: KeyTable,
    key_fields: FieldSchema,
    group_size: usize,
    blocks: GroupRecords<BufReader<File>>,
    block_fields: FieldSchema,
}

impl Iterator for GroupedAligner {
    type Item = Result<Bindings, WeaveError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.blocks.next()? {
            Ok(r) => r,
            Err(e) => return Some(Err(e.into())),
        };
        let group = record.index / self.group_size;
        let Some(row) = self.keys.row(group) else {
            return Some(Err(WeaveError::AlignmentRange {
                stream: self.keys.path().to_path_buf(),
                index: group,
                len: self.keys.len(),
            }));
        };
        let mut bindings = Bindings::from_schema(&self.key_fields, row);
        bindings.bind_schema(&self.block_fields, &record.fields);
        Some(Ok(bindings))
    }
}

// ---------------------------------------------------------------------------
// Cross product
// ---------------------------------------------------------------------------

/// Policy B: for every key, for every plaintext, for every secondary stream
/// in configured order, for every record of that stream, one block. All
/// streams are read eagerly; the inner streams restart by re-walking the
/// collected records.
pub struct CrossProductAligner {
    key_field: PlaceholderToken,
    plaintext_field: PlaceholderToken,
    secondary_field: PlaceholderToken,
    keys: Vec<String>,
    plaintexts: Vec<String>,
    secondaries: Vec<Vec<String>>,
    // Odometer over (key, plaintext, stream, record), record innermost.
    ki: usize,
    pi: usize,
    si: usize,
    ri: usize,
}

impl Iterator for CrossProductAligner {
    type Item = Result<Bindings, WeaveError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.ki == self.keys.len() {
                return None;
            }
            if self.pi == self.plaintexts.len() {
                self.ki += 1;
                self.pi = 0;
                continue;
            }
            if self.si == self.secondaries.len() {
                self.pi += 1;
                self.si = 0;
                continue;
            }
            if self.ri == self.secondaries[self.si].len() {
                self.si += 1;
                self.ri = 0;
                continue;
            }

            let mut bindings = Bindings::new();
            bindings.insert(self.key_field.clone(), self.keys[self.ki].clone());
            bindings.insert(
                self.plaintext_field.clone(),
                self.plaintexts[self.pi].clone(),
            );
            bindings.insert(
                self.secondary_field.clone(),
                self.secondaries[self.si][self.ri].clone(),
            );
            self.ri += 1;
            return Some(Ok(bindings));
        }
    }
}
