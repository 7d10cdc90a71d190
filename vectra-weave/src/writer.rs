//! Atomic output writing.
//!
//! The document is written to `<path>.vectra.tmp` and renamed over the final
//! path (atomic on POSIX). A failed rename removes the tmp file, so the
//! destination is either the previous content or the complete new document —
//! never a partial write.

use std::path::{Path, PathBuf};

use crate::error::{io_err, WeaveError};

/// Outcome of an output write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The document was written to `path`.
    Written { path: PathBuf },
    /// Dry-run mode: the document *would* have been written.
    WouldWrite { path: PathBuf },
}

/// Atomically write `content` to `path`, overwriting any previous output.
pub fn atomic_write(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, WeaveError> {
    if dry_run {
        log::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    let tmp = PathBuf::from(format!("{}.vectra.tmp", path.display()));
    atomic_write_with_tmp(path, content, &tmp)
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    tmp: &Path,
) -> Result<WriteResult, WeaveError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }
    if let Some(tmp_parent) = tmp.parent() {
        std::fs::create_dir_all(tmp_parent).map_err(|e| io_err(tmp_parent, e))?;
    }
    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    log::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
