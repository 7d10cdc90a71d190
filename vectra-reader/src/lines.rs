//! Single-line record streams.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{io_err, ReadError};

/// One single-line record: its 0-based index within the stream and its value
/// with the trailing line terminator stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub index: usize,
    pub value: String,
}

/// Lazy iterator over single-line records from any `BufRead`.
///
/// Line terminators (`\n` and `\r\n`) are stripped. Blank lines are not
/// records and are skipped, which also means the customary blank read at end
/// of file is never emitted. The sequence ends when the stream is exhausted.
pub struct LineRecords<R: BufRead> {
    reader: R,
    path: PathBuf,
    next_index: usize,
}

impl LineRecords<BufReader<File>> {
    /// Open `path` and stream its records. Re-opening restarts the sequence.
    pub fn open(path: &Path) -> Result<Self, ReadError> {
        let file = File::open(path).map_err(|e| ReadError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_reader(BufReader::new(file), path))
    }

    /// Eagerly collect every record value from `path`, in file order.
    ///
    /// Used where a stream must be iterated repeatedly (the cross-product
    /// aligner restarts inner streams by re-walking the collected values).
    pub fn read_all(path: &Path) -> Result<Vec<String>, ReadError> {
        Self::open(path)?
            .map(|r| r.map(|rec| rec.value))
            .collect()
    }
}

impl<R: BufRead> LineRecords<R> {
    /// Wrap an arbitrary reader; `path` is used only in error messages.
    pub fn from_reader(reader: R, path: &Path) -> Self {
        LineRecords {
            reader,
            path: path.to_path_buf(),
            next_index: 0,
        }
    }
}

/// Strip one trailing `\n` or `\r\n`.
fn strip_terminator(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

impl<R: BufRead> Iterator for LineRecords<R> {
    type Item = Result<LineRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    strip_terminator(&mut line);
                    if line.is_empty() {
                        continue;
                    }
                    let index = self.next_index;
                    self.next_index += 1;
                    return Some(Ok(LineRecord { index, value: line }));
                }
                Err(e) => return Some(Err(io_err(&self.path, e))),
            }
        }
    }
}
