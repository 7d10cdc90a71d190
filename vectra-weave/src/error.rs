//! Error types for vectra-weave.

use std::path::PathBuf;

use thiserror::Error;

use vectra_core::ManifestError;
use vectra_reader::ReadError;
use vectra_renderer::RenderError;

/// All errors that can arise from block alignment and document assembly.
#[derive(Debug, Error)]
pub enum WeaveError {
    /// An error from manifest loading or validation.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// An error from a record stream.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// A rendering failure, annotated with the failing block index.
    #[error("block {block}: {source}")]
    Render {
        block: usize,
        #[source]
        source: RenderError,
    },

    /// A computed grouping or join index fell outside its source stream.
    /// Never clamped or defaulted — a silently reused key row would produce
    /// an incorrect test vector.
    #[error(
        "alignment index {index} out of range for {stream} ({len} records available)"
    )]
    AlignmentRange {
        stream: PathBuf,
        index: usize,
        len: usize,
    },

    /// An I/O error on the output side, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`WeaveError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> WeaveError {
    WeaveError::Io {
        path: path.into(),
        source,
    }
}
