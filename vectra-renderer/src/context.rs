//! Bindings — the placeholder→value tuple assembled for one block.

use vectra_core::{FieldSchema, PlaceholderToken};

/// Ordered placeholder→value bindings for a single rendered block.
///
/// Insertion order is preserved; it is the binding order the aligner chose
/// (key fields first, then block fields) and drives tie-breaking order in
/// the renderer's scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    pairs: Vec<(PlaceholderToken, String)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `token` to `value`, replacing any existing binding for `token`.
    pub fn insert(&mut self, token: PlaceholderToken, value: String) {
        if let Some(pair) = self.pairs.iter_mut().find(|(t, _)| *t == token) {
            pair.1 = value;
        } else {
            self.pairs.push((token, value));
        }
    }

    /// Value bound to `token`, if any.
    pub fn get(&self, token: &PlaceholderToken) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlaceholderToken, &str)> {
        self.pairs.iter().map(|(t, v)| (t, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Zip a positional field schema with its field values.
    ///
    /// The reader guarantees `fields.len() == schema.len()` for well-formed
    /// streams; the mismatch assert only fires on aligner bugs.
    pub fn bind_schema(&mut self, schema: &FieldSchema, fields: &[String]) {
        debug_assert_eq!(
            schema.len(),
            fields.len(),
            "schema width and field count must match"
        );
        for (token, value) in schema.iter().zip(fields.iter()) {
            self.insert(token.clone(), value.clone());
        }
    }

    /// Convenience: build bindings from a single schema + field slice.
    pub fn from_schema(schema: &FieldSchema, fields: &[String]) -> Self {
        let mut bindings = Bindings::new();
        bindings.bind_schema(schema, fields);
        bindings
    }
}
