//! Testing utilities
//!
//!     Hive's object notation has no formal grammar, only what real metastores print. Samples
//!     that are typed by hand tend to be subtly wrong (escape depth, spacing after commas,
//!     `=` versus `:`), and a decoder tuned to made-up input is tuned to the wrong thing.
//!
//!     Tests therefore load notation captured from real `DESCRIBE EXTENDED` output through
//!     [`Samples`], which reads the curated files under `fixtures/`:
//!
//!         fixtures/notation/<name>.hive   the raw blob, exactly as the engine returned it
//!         fixtures/notation/<name>.json   the tree it must decode to
//!         fixtures/catalogs/<name>.yaml   catalog fixtures for [`FixtureCatalog`]
//!
//!     Small inline strings are fine for single-pass unit tests.

use crate::hive::catalog::FixtureCatalog;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Loader for the curated fixtures
pub struct Samples;

impl Samples {
    pub fn root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    pub fn notation_path(name: &str) -> PathBuf {
        Self::root().join("notation").join(format!("{}.hive", name))
    }

    pub fn catalog_path(name: &str) -> PathBuf {
        Self::root().join("catalogs").join(format!("{}.yaml", name))
    }

    /// Raw notation blob, without the file's trailing newline
    pub fn notation(name: &str) -> String {
        let path = Self::notation_path(name);
        let source = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        source.trim_end_matches(|c: char| c == '\r' || c == '\n').to_string()
    }

    /// The JSON tree a notation sample must decode to
    pub fn expected_tree(name: &str) -> Value {
        let path = Self::root().join("notation").join(format!("{}.json", name));
        let source = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        serde_json::from_str(&source)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {}", path.display(), e))
    }

    pub fn catalog(name: &str) -> FixtureCatalog {
        let path = Self::catalog_path(name);
        FixtureCatalog::from_path(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
    }
}
