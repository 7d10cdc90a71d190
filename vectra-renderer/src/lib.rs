//! # vectra-renderer
//!
//! Literal placeholder substitution for test-vector templates.
//!
//! Substitution is plain text replacement, never pattern matching: tokens
//! like `1KEY1` or `DATAIN` are found with literal string search, and
//! replacement values are spliced in verbatim, so regex metacharacters in
//! either are inert and a value can never be re-substituted.
//!
//! ## Usage
//!
//! ```rust
//! use vectra_renderer::{Bindings, Renderer, Template};
//! use vectra_core::PlaceholderToken;
//!
//! let template = Template::new("signal <= x\"DATAIN\";\n");
//! let renderer = Renderer::new(vec![PlaceholderToken::from("DATAIN")]);
//! let mut bindings = Bindings::new();
//! bindings.insert(PlaceholderToken::from("DATAIN"), "deadbeef".to_string());
//! let block = renderer.render(&template, &bindings).unwrap();
//! assert_eq!(block, "signal <= x\"deadbeef\";\n");
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::Bindings;
pub use engine::{Renderer, Template};
pub use error::RenderError;
