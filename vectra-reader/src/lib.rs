//! # vectra-reader
//!
//! Lazy, finite, restartable record sequences over line-oriented data files.
//!
//! Three record shapes:
//! - [`LineRecords`] — one value per line.
//! - [`GroupRecords`] — a fixed count of consecutive lines forming one
//!   multi-field record, fields associated positionally with a
//!   [`vectra_core::FieldSchema`].
//! - [`KeyTable`] — eagerly-read delimited tuples, one row per line.
//!
//! Every sequence terminates on stream exhaustion — never on a sentinel
//! value. Re-opening a source restarts its sequence from the beginning.

pub mod error;
pub mod groups;
pub mod lines;
pub mod tuples;

use std::path::Path;

pub use error::ReadError;
pub use groups::{GroupRecord, GroupRecords};
pub use lines::{LineRecord, LineRecords};
pub use tuples::KeyTable;

/// Read a whole text file (prologue, template, epilogue) verbatim.
///
/// Open failures are [`ReadError::Open`] — surfaced before any output exists.
pub fn read_text(path: &Path) -> Result<String, ReadError> {
    std::fs::read_to_string(path).map_err(|e| ReadError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn read_text_returns_contents_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("head.txt");
        std::fs::write(&path, "-- prologue\r\nline two\n").unwrap();
        let text = read_text(&path).unwrap();
        assert_eq!(text, "-- prologue\r\nline two\n");
    }

    #[test]
    fn read_text_missing_file_is_open_error() {
        let dir = TempDir::new().unwrap();
        let err = read_text(&dir.path().join("absent.txt")).unwrap_err();
        match err {
            ReadError::Open { path, .. } => {
                assert!(path.ends_with("absent.txt"))
            }
            other => panic!("expected Open, got {other:?}"),
        }
    }
}
