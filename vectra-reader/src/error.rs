//! Error types for vectra-reader.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while reading record streams.
#[derive(Debug, Error)]
pub enum ReadError {
    /// A required input file is missing or unreadable.
    #[error("cannot open input stream {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An I/O failure mid-stream, with annotated path for context.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream ended partway through a fixed-size line group.
    #[error(
        "truncated record group {index} in {path}: got {got} of {want} lines"
    )]
    TruncatedGroup {
        path: PathBuf,
        index: usize,
        got: usize,
        want: usize,
    },

    /// A key-table row has the wrong number of fields for its schema.
    #[error("line {line} of {path} has {got} fields, schema expects {want}")]
    FieldCount {
        path: PathBuf,
        line: usize,
        got: usize,
        want: usize,
    },
}

/// Convenience constructor for [`ReadError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ReadError {
    ReadError::Io {
        path: path.into(),
        source,
    }
}
