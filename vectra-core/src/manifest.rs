//! YAML run-manifest loading and validation.
//!
//! A manifest names every input file for one generation run:
//!
//! ```yaml
//! prologue: prologue.txt
//! template: block.tmpl
//! epilogue: epilogue.txt
//! output: tb_output.vhd
//! alignment:
//!   policy: grouped
//!   group_size: 10
//!   key_file: key_steps.txt
//!   key_fields: [KEY1, KEY2, KEY3]
//!   block_file: encode_steps.txt
//!   block_fields: [DATAIN, DATAOUT1, DATAOUT2, DATAOUT3]
//! ```
//!
//! Relative paths are resolved against the manifest's parent directory, so a
//! manifest can live next to its data files and be invoked from anywhere.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::types::{AlignmentSpec, Manifest};

/// Load, resolve, and validate the manifest at `path`.
///
/// Returns `ManifestError::NotFound` if absent,
/// `ManifestError::Parse` (with path + line context) if malformed YAML,
/// `ManifestError::Invalid` if the parsed manifest describes an unusable run.
pub fn load(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    let mut manifest: Manifest = serde_yaml::from_str(&contents).map_err(|e| {
        ManifestError::Parse {
            path: path.to_path_buf(),
            source: e,
        }
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    resolve_paths(&mut manifest, base);
    validate(&manifest)?;
    Ok(manifest)
}

fn resolve(base: &Path, p: &mut PathBuf) {
    if p.is_relative() {
        *p = base.join(&*p);
    }
}

fn resolve_paths(manifest: &mut Manifest, base: &Path) {
    resolve(base, &mut manifest.prologue);
    resolve(base, &mut manifest.template);
    resolve(base, &mut manifest.epilogue);
    resolve(base, &mut manifest.output);
    match &mut manifest.alignment {
        AlignmentSpec::Grouped {
            key_file,
            block_file,
            ..
        } => {
            resolve(base, key_file);
            resolve(base, block_file);
        }
        AlignmentSpec::CrossProduct {
            key_file,
            plaintext_file,
            secondary_files,
            ..
        } => {
            resolve(base, key_file);
            resolve(base, plaintext_file);
            for f in secondary_files {
                resolve(base, f);
            }
        }
    }
}

/// Structural checks that YAML typing alone cannot express.
pub fn validate(manifest: &Manifest) -> Result<(), ManifestError> {
    match &manifest.alignment {
        AlignmentSpec::Grouped {
            group_size,
            key_fields,
            block_fields,
            ..
        } => {
            if *group_size == 0 {
                return Err(invalid("group_size must be at least 1"));
            }
            if key_fields.is_empty() {
                return Err(invalid("key_fields must name at least one placeholder"));
            }
            if block_fields.is_empty() {
                return Err(invalid("block_fields must name at least one placeholder"));
            }
        }
        AlignmentSpec::CrossProduct {
            secondary_files, ..
        } => {
            if secondary_files.is_empty() {
                return Err(invalid(
                    "cross-product alignment needs at least one secondary file",
                ));
            }
        }
    }

    // No two distinct placeholders may share a token string; a duplicate
    // would make substitution ambiguous.
    let mut seen = HashSet::new();
    for token in manifest.declared_tokens() {
        if !seen.insert(token.0.clone()) {
            return Err(invalid(&format!(
                "placeholder token '{token}' is declared more than once"
            )));
        }
    }

    Ok(())
}

fn invalid(reason: &str) -> ManifestError {
    ManifestError::Invalid {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::types::{FieldSchema, PlaceholderToken};

    const GROUPED_YAML: &str = "\
prologue: head.txt
template: block.tmpl
epilogue: tail.txt
output: out.vhd
alignment:
  policy: grouped
  group_size: 10
  key_file: keys.txt
  key_fields: [KEY1, KEY2, KEY3]
  block_file: blocks.txt
  block_fields: [DATAIN, DATAOUT1, DATAOUT2, DATAOUT3]
";

    const CROSS_YAML: &str = "\
prologue: head.txt
template: block.tmpl
epilogue: tail.txt
output: out.vhd
alignment:
  policy: cross-product
  key_file: keys.txt
  key_field: 1KEY1
  plaintext_file: plain.txt
  plaintext_field: 1PLAINTEXT1
  secondary_files: [c1.txt, c2.txt]
  secondary_field: 1CIPHERTEXT1
";

    fn write_manifest(dir: &TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("run.yaml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_grouped_manifest_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, GROUPED_YAML);
        let manifest = load(&path).expect("load");

        assert_eq!(manifest.prologue, dir.path().join("head.txt"));
        assert_eq!(manifest.output, dir.path().join("out.vhd"));
        match &manifest.alignment {
            AlignmentSpec::Grouped {
                group_size,
                key_file,
                key_fields,
                ..
            } => {
                assert_eq!(*group_size, 10);
                assert_eq!(key_file, &dir.path().join("keys.txt"));
                assert_eq!(key_fields.len(), 3);
            }
            other => panic!("expected grouped, got {other:?}"),
        }
    }

    #[test]
    fn load_cross_product_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, CROSS_YAML);
        let manifest = load(&path).expect("load");
        match &manifest.alignment {
            AlignmentSpec::CrossProduct {
                secondary_files,
                key_field,
                ..
            } => {
                assert_eq!(secondary_files.len(), 2);
                assert_eq!(key_field, &PlaceholderToken::from("1KEY1"));
            }
            other => panic!("expected cross-product, got {other:?}"),
        }
    }

    #[test]
    fn absolute_paths_are_left_alone() {
        let dir = TempDir::new().unwrap();
        let yaml = GROUPED_YAML.replace("output: out.vhd", "output: /tmp/abs_out.vhd");
        let path = write_manifest(&dir, &yaml);
        let manifest = load(&path).expect("load");
        assert_eq!(manifest.output, PathBuf::from("/tmp/abs_out.vhd"));
    }

    #[test]
    fn missing_manifest_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }), "{err:?}");
    }

    #[test]
    fn malformed_yaml_is_parse_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "prologue: [unclosed");
        let err = load(&path).unwrap_err();
        match err {
            ManifestError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[rstest]
    #[case::zero_group_size("group_size: 10", "group_size: 0")]
    #[case::empty_key_fields("key_fields: [KEY1, KEY2, KEY3]", "key_fields: []")]
    #[case::empty_block_fields(
        "block_fields: [DATAIN, DATAOUT1, DATAOUT2, DATAOUT3]",
        "block_fields: []"
    )]
    fn invalid_grouped_manifests_are_rejected(#[case] from: &str, #[case] to: &str) {
        let dir = TempDir::new().unwrap();
        let yaml = GROUPED_YAML.replace(from, to);
        let path = write_manifest(&dir, &yaml);
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid { .. }), "{err:?}");
    }

    #[test]
    fn cross_product_without_secondaries_is_rejected() {
        let dir = TempDir::new().unwrap();
        let yaml = CROSS_YAML.replace("secondary_files: [c1.txt, c2.txt]", "secondary_files: []");
        let path = write_manifest(&dir, &yaml);
        let err = load(&path).unwrap_err();
        assert!(matches!(err, ManifestError::Invalid { .. }), "{err:?}");
    }

    #[test]
    fn duplicate_tokens_are_rejected() {
        let dir = TempDir::new().unwrap();
        let yaml = GROUPED_YAML.replace(
            "block_fields: [DATAIN, DATAOUT1, DATAOUT2, DATAOUT3]",
            "block_fields: [DATAIN, KEY1]",
        );
        let path = write_manifest(&dir, &yaml);
        let err = load(&path).unwrap_err();
        match err {
            ManifestError::Invalid { reason } => {
                assert!(reason.contains("KEY1"), "reason should name the token: {reason}")
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_schema_built_in_code() {
        let manifest = Manifest {
            prologue: PathBuf::from("/a"),
            template: PathBuf::from("/b"),
            epilogue: PathBuf::from("/c"),
            output: PathBuf::from("/d"),
            alignment: AlignmentSpec::Grouped {
                group_size: 1,
                key_file: PathBuf::from("/k"),
                key_fields: FieldSchema::from(vec!["K"]),
                block_file: PathBuf::from("/bl"),
                block_fields: FieldSchema::from(vec!["D"]),
            },
        };
        validate(&manifest).expect("valid");
    }
}
