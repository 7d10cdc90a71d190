//! Error types for vectra-renderer.

use thiserror::Error;

use vectra_core::PlaceholderToken;

/// All errors that can arise from template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A declared placeholder occurs in the template but the current block's
    /// bindings carry no value for it. Always fatal — rendering a block with
    /// a leftover token would corrupt the generated test vector.
    #[error("unresolved placeholder '{token}' in template")]
    UnresolvedPlaceholder { token: PlaceholderToken },
}
