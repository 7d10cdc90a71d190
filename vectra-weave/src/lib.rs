//! # vectra-weave
//!
//! Block alignment and document assembly.
//!
//! Call [`pipeline::run`] to assemble and atomically write the output
//! document for a run manifest, [`check::check`] to validate a manifest
//! without writing, or [`diff::diff_output`] to see what a run would change.

pub mod align;
pub mod check;
pub mod diff;
pub mod error;
pub mod pipeline;
pub mod writer;

pub use align::Aligner;
pub use check::{CheckReport, KeyCoverage, StreamReport};
pub use diff::OutputDiff;
pub use error::WeaveError;
pub use pipeline::{GenerateReport, RunMode};
pub use writer::WriteResult;
