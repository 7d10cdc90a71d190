//! Fixed-size line-group record streams.
//!
//! The block data files written by the vector capture scripts hold one
//! multi-field record per group of consecutive lines (e.g. line 1 = DATAIN,
//! line 2 = DATAOUT1, …), with a blank separator line between groups. Field
//! order within a group is positional, fixed by a [`FieldSchema`] supplied by
//! the caller — never inferred from the data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use vectra_core::FieldSchema;

use crate::error::ReadError;
use crate::lines::LineRecords;

/// One multi-field record: its 0-based group index and its field values in
/// schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub index: usize,
    pub fields: Vec<String>,
}

/// Lazy iterator over fixed-size line groups.
///
/// Each group consumes exactly `schema.len()` non-blank lines; blank
/// separator lines between groups are skipped. A final partial group is a
/// [`ReadError::TruncatedGroup`]. End of stream terminates the sequence.
pub struct GroupRecords<R: BufRead> {
    lines: LineRecords<R>,
    path: PathBuf,
    width: usize,
    next_index: usize,
}

impl GroupRecords<BufReader<File>> {
    /// Open `path` and stream its groups shaped by `schema`.
    pub fn open(path: &Path, schema: &FieldSchema) -> Result<Self, ReadError> {
        let lines = LineRecords::open(path)?;
        Ok(GroupRecords {
            lines,
            path: path.to_path_buf(),
            width: schema.len(),
            next_index: 0,
        })
    }
}

impl<R: BufRead> GroupRecords<R> {
    /// Wrap an arbitrary reader; `path` is used only in error messages.
    pub fn from_reader(reader: R, path: &Path, schema: &FieldSchema) -> Self {
        GroupRecords {
            lines: LineRecords::from_reader(reader, path),
            path: path.to_path_buf(),
            width: schema.len(),
            next_index: 0,
        }
    }
}

impl<R: BufRead> Iterator for GroupRecords<R> {
    type Item = Result<GroupRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut fields = Vec::with_capacity(self.width);
        while fields.len() < self.width {
            match self.lines.next() {
                Some(Ok(rec)) => fields.push(rec.value),
                Some(Err(e)) => return Some(Err(e)),
                None if fields.is_empty() => return None,
                None => {
                    return Some(Err(ReadError::TruncatedGroup {
                        path: self.path.clone(),
                        index: self.next_index,
                        got: fields.len(),
                        want: self.width,
                    }))
                }
            }
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(Ok(GroupRecord { index, fields }))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn schema4() -> FieldSchema {
        FieldSchema::from(vec!["DATAIN", "DATAOUT1", "DATAOUT2", "DATAOUT3"])
    }

    fn groups(input: &str, schema: &FieldSchema) -> Result<Vec<GroupRecord>, ReadError> {
        GroupRecords::from_reader(Cursor::new(input.to_string()), Path::new("<mem>"), schema)
            .collect()
    }

    #[test]
    fn groups_with_blank_separators() {
        // The capture format: four data lines then a blank line per block.
        let input = "a0\nb0\nc0\nd0\n\na1\nb1\nc1\nd1\n\n";
        let recs = groups(input, &schema4()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].index, 0);
        assert_eq!(recs[0].fields, ["a0", "b0", "c0", "d0"]);
        assert_eq!(recs[1].index, 1);
        assert_eq!(recs[1].fields, ["a1", "b1", "c1", "d1"]);
    }

    #[test]
    fn groups_without_separators_also_parse() {
        let input = "a\nb\nc\nd\ne\nf\ng\nh\n";
        let recs = groups(input, &schema4()).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].fields, ["e", "f", "g", "h"]);
    }

    #[test]
    fn empty_stream_yields_no_groups() {
        let recs = groups("", &schema4()).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn trailing_blank_lines_do_not_start_a_group() {
        let input = "a\nb\nc\nd\n\n\n";
        let recs = groups(input, &schema4()).unwrap();
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn partial_final_group_is_truncated_error() {
        let input = "a\nb\nc\nd\n\ne\nf\n";
        let err = groups(input, &schema4()).unwrap_err();
        match err {
            ReadError::TruncatedGroup { index, got, want, .. } => {
                assert_eq!(index, 1);
                assert_eq!(got, 2);
                assert_eq!(want, 4);
            }
            other => panic!("expected TruncatedGroup, got {other:?}"),
        }
    }

    #[test]
    fn single_field_schema_degenerates_to_lines() {
        let schema = FieldSchema::from(vec!["VAL"]);
        let recs = groups("x\ny\nz\n", &schema).unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[2].fields, ["z"]);
    }
}
