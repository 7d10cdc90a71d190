//! Vectra core library — manifest types, YAML persistence, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and run-configuration structs
//! - [`error`] — [`ManifestError`]
//! - [`manifest`] — load / validate

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use types::{AlignmentSpec, FieldSchema, Manifest, PlaceholderToken};
