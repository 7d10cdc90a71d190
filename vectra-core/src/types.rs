//! Domain types for the Vectra run manifest.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed placeholder marker as it appears literally in the template
/// (e.g. `DATAIN`, `KEY1`). Never interpreted as a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlaceholderToken(pub String);

impl PlaceholderToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceholderToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for PlaceholderToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PlaceholderToken {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Field schema
// ---------------------------------------------------------------------------

/// Ordered list of placeholder tokens naming the fields of a multi-field
/// record, positionally. Field order is configuration, never inferred from
/// the data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSchema(pub Vec<PlaceholderToken>);

impl FieldSchema {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> &[PlaceholderToken] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlaceholderToken> {
        self.0.iter()
    }
}

impl From<Vec<&str>> for FieldSchema {
    fn from(tokens: Vec<&str>) -> Self {
        Self(tokens.into_iter().map(PlaceholderToken::from).collect())
    }
}

// ---------------------------------------------------------------------------
// Alignment spec
// ---------------------------------------------------------------------------

/// How block records are paired with their slow-varying counterparts.
///
/// The two policies are distinct strategies, selected explicitly here —
/// never guessed from the shape of the data files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum AlignmentSpec {
    /// A fixed-size batch of blocks shares one key-table row:
    /// block `i` uses key row `i / group_size`.
    Grouped {
        group_size: usize,
        key_file: PathBuf,
        key_fields: FieldSchema,
        block_file: PathBuf,
        block_fields: FieldSchema,
    },

    /// Exhaustive nested join: every key × every plaintext × every secondary
    /// stream × every record of that stream, key outermost.
    CrossProduct {
        key_file: PathBuf,
        key_field: PlaceholderToken,
        plaintext_file: PathBuf,
        plaintext_field: PlaceholderToken,
        secondary_files: Vec<PathBuf>,
        secondary_field: PlaceholderToken,
    },
}

impl AlignmentSpec {
    /// Human-readable policy name, matching the manifest tag.
    pub fn policy_name(&self) -> &'static str {
        match self {
            AlignmentSpec::Grouped { .. } => "grouped",
            AlignmentSpec::CrossProduct { .. } => "cross-product",
        }
    }

    /// Every placeholder token this alignment supplies values for,
    /// in binding order.
    pub fn declared_tokens(&self) -> Vec<PlaceholderToken> {
        match self {
            AlignmentSpec::Grouped {
                key_fields,
                block_fields,
                ..
            } => key_fields
                .iter()
                .chain(block_fields.iter())
                .cloned()
                .collect(),
            AlignmentSpec::CrossProduct {
                key_field,
                plaintext_field,
                secondary_field,
                ..
            } => vec![
                key_field.clone(),
                plaintext_field.clone(),
                secondary_field.clone(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Complete description of one generation run.
///
/// Relative paths are resolved against the manifest file's parent directory
/// by [`crate::manifest::load`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Opaque text copied verbatim to the start of the output document.
    pub prologue: PathBuf,
    /// Template containing the placeholder tokens.
    pub template: PathBuf,
    /// Opaque text copied verbatim to the end of the output document.
    pub epilogue: PathBuf,
    /// Destination file, overwritten on every run.
    pub output: PathBuf,
    /// Block-pairing policy.
    pub alignment: AlignmentSpec,
}

impl Manifest {
    /// All placeholder tokens the run's alignment supplies.
    pub fn declared_tokens(&self) -> Vec<PlaceholderToken> {
        self.alignment.declared_tokens()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_spec_yaml_tags_round_trip() {
        let spec = AlignmentSpec::Grouped {
            group_size: 10,
            key_file: PathBuf::from("keys.txt"),
            key_fields: FieldSchema::from(vec!["KEY1", "KEY2"]),
            block_file: PathBuf::from("blocks.txt"),
            block_fields: FieldSchema::from(vec!["DATAIN"]),
        };
        let yaml = serde_yaml::to_string(&spec).unwrap();
        assert!(yaml.contains("policy: grouped"), "unexpected tag in {yaml}");
        let back: AlignmentSpec = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn cross_product_tag_is_kebab_case() {
        let spec = AlignmentSpec::CrossProduct {
            key_file: PathBuf::from("k.txt"),
            key_field: PlaceholderToken::from("1KEY1"),
            plaintext_file: PathBuf::from("p.txt"),
            plaintext_field: PlaceholderToken::from("1PLAINTEXT1"),
            secondary_files: vec![PathBuf::from("c1.txt")],
            secondary_field: PlaceholderToken::from("1CIPHERTEXT1"),
        };
        let yaml = serde_yaml::to_string(&spec).unwrap();
        assert!(yaml.contains("policy: cross-product"), "got: {yaml}");
    }

    #[test]
    fn declared_tokens_preserve_schema_order() {
        let spec = AlignmentSpec::Grouped {
            group_size: 1,
            key_file: PathBuf::from("k"),
            key_fields: FieldSchema::from(vec!["KEY1", "KEY2", "KEY3"]),
            block_file: PathBuf::from("b"),
            block_fields: FieldSchema::from(vec!["DATAIN", "DATAOUT1"]),
        };
        let tokens: Vec<String> = spec
            .declared_tokens()
            .into_iter()
            .map(|t| t.0)
            .collect();
        assert_eq!(tokens, ["KEY1", "KEY2", "KEY3", "DATAIN", "DATAOUT1"]);
    }
}
