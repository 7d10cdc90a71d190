//! Literal substitution engine — [`Template`] and [`Renderer`].

use vectra_core::PlaceholderToken;

use crate::context::Bindings;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// An immutable template string containing zero or more placeholder tokens.
///
/// Loaded once at startup and read-only for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Template { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Which of `declared` actually occur in the template text.
    ///
    /// Used by preflight checks to report unused schema fields before a run.
    pub fn occurring<'a>(
        &self,
        declared: &'a [PlaceholderToken],
    ) -> Vec<&'a PlaceholderToken> {
        declared
            .iter()
            .filter(|t| self.text.contains(t.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Literal placeholder renderer.
///
/// Constructed once per run with the full set of declared tokens; reused for
/// every block. `render` is a pure function of the template and bindings.
pub struct Renderer {
    declared: Vec<PlaceholderToken>,
}

impl Renderer {
    pub fn new(declared: Vec<PlaceholderToken>) -> Self {
        Renderer { declared }
    }

    pub fn declared_tokens(&self) -> &[PlaceholderToken] {
        &self.declared
    }

    /// Replace every occurrence of each bound token with its value.
    ///
    /// The scan is literal, first-match, left-to-right, and non-overlapping:
    /// at each position the earliest next occurrence of any bound token wins
    /// (ties go to the longest token), the value is spliced in verbatim, and
    /// scanning resumes after the splice. Replacement values are never
    /// rescanned, so a value containing a token substring cannot trigger a
    /// second substitution.
    ///
    /// A declared token that occurs in the template but has no binding is a
    /// fatal [`RenderError::UnresolvedPlaceholder`].
    pub fn render(
        &self,
        template: &Template,
        bindings: &Bindings,
    ) -> Result<String, RenderError> {
        for token in &self.declared {
            if bindings.get(token).is_none() && template.text().contains(token.as_str()) {
                return Err(RenderError::UnresolvedPlaceholder {
                    token: token.clone(),
                });
            }
        }

        let mut out = String::with_capacity(template.text().len());
        let mut rest = template.text();
        while let Some((pos, token, value)) = earliest_match(rest, bindings) {
            out.push_str(&rest[..pos]);
            out.push_str(value);
            rest = &rest[pos + token.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Earliest occurrence of any bound token in `haystack`.
///
/// Equal positions break toward the longest token, so a token that is a
/// prefix of another (`KEY1` vs `KEY10`) never shadows it.
fn earliest_match<'a>(
    haystack: &str,
    bindings: &'a Bindings,
) -> Option<(usize, &'a str, &'a str)> {
    let mut best: Option<(usize, &'a str, &'a str)> = None;
    for (token, value) in bindings.iter() {
        let needle = token.as_str();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = haystack.find(needle) {
            let better = match best {
                None => true,
                Some((best_pos, best_tok, _)) => {
                    pos < best_pos || (pos == best_pos && needle.len() > best_tok.len())
                }
            };
            if better {
                best = Some((pos, needle, value));
            }
        }
    }
    best
}
