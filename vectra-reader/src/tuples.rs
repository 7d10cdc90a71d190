//! Delimited key-tuple tables.
//!
//! A grouping-key file holds one tuple per line, fields separated by commas
//! and/or whitespace (`"a, b, c"` and `"a b c"` both parse). The table is
//! small and consulted by random access (one row per block group), so it is
//! read eagerly.

use std::path::{Path, PathBuf};

use vectra_core::FieldSchema;

use crate::error::ReadError;
use crate::lines::LineRecords;

/// An eagerly-loaded key-tuple table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyTable {
    path: PathBuf,
    rows: Vec<Vec<String>>,
}

impl KeyTable {
    /// Load the table at `path`, checking each row against `schema` width.
    ///
    /// Blank lines are skipped. A row whose field count differs from the
    /// schema is a [`ReadError::FieldCount`] naming the offending line.
    pub fn load(path: &Path, schema: &FieldSchema) -> Result<Self, ReadError> {
        let want = schema.len();
        let mut rows = Vec::new();
        for record in LineRecords::open(path)? {
            let record = record?;
            let fields = split_tuple(&record.value);
            if fields.len() != want {
                return Err(ReadError::FieldCount {
                    path: path.to_path_buf(),
                    line: record.index + 1,
                    got: fields.len(),
                    want,
                });
            }
            rows.push(fields);
        }
        Ok(KeyTable {
            path: path.to_path_buf(),
            rows,
        })
    }

    /// Source path, for error reporting.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Row at `index`, or `None` when the table has fewer rows.
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Split a tuple line on commas and/or whitespace, dropping empty pieces.
fn split_tuple(line: &str) -> Vec<String> {
    line.split(',')
        .flat_map(str::split_whitespace)
        .map(str::to_owned)
        .collect()
}
