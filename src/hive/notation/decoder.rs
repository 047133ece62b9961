//! Mode dispatch and fallback handling for the notation decoder

use crate::hive::notation::{NotationError, NotationPipeline};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// How the `Detailed Table Information` blob ends up on the table asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailedTableInfoMode {
    /// Decode into a JSON tree, falling back to the raw text on failure
    #[default]
    #[serde(alias = "json", alias = "JSON", alias = "STRUCTURED")]
    Structured,

    /// Attach the raw text without decoding
    #[serde(alias = "RAW")]
    Raw,

    /// Attach nothing
    #[serde(alias = "IGNORE")]
    Ignore,
}

impl DetailedTableInfoMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailedTableInfoMode::Structured => "structured",
            DetailedTableInfoMode::Raw => "raw",
            DetailedTableInfoMode::Ignore => "ignore",
        }
    }
}

impl fmt::Display for DetailedTableInfoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailedTableInfoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structured" | "json" => Ok(DetailedTableInfoMode::Structured),
            "raw" => Ok(DetailedTableInfoMode::Raw),
            "ignore" => Ok(DetailedTableInfoMode::Ignore),
            other => Err(format!("unknown detailed table info mode '{}'", other)),
        }
    }
}

/// The original blob, kept when it is not (or cannot be) decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackWrapper {
    #[serde(rename = "rawData")]
    pub raw_data: String,
}

impl FallbackWrapper {
    pub fn new(raw_data: impl Into<String>) -> Self {
        Self {
            raw_data: raw_data.into(),
        }
    }
}

/// Result of decoding a non-blank blob in `Structured` or `Raw` mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodeOutcome {
    Tree(Value),
    Fallback(FallbackWrapper),
}

impl DecodeOutcome {
    /// Asset property holding a decoded tree
    pub const TREE_PROPERTY: &'static str = "detailedTableInfo";
    /// Asset property holding the raw text
    pub const RAW_PROPERTY: &'static str = "detailedTableInfoRaw";

    /// Name of the asset property this outcome is attached under
    pub fn property_name(&self) -> &'static str {
        match self {
            DecodeOutcome::Tree(_) => Self::TREE_PROPERTY,
            DecodeOutcome::Fallback(_) => Self::RAW_PROPERTY,
        }
    }

    /// Value attached to the asset: the tree itself, or the raw text as a string
    pub fn into_property_value(self) -> Value {
        match self {
            DecodeOutcome::Tree(tree) => tree,
            DecodeOutcome::Fallback(wrapper) => Value::String(wrapper.raw_data),
        }
    }

    pub fn tree(&self) -> Option<&Value> {
        match self {
            DecodeOutcome::Tree(tree) => Some(tree),
            DecodeOutcome::Fallback(_) => None,
        }
    }

    pub fn raw_data(&self) -> Option<&str> {
        match self {
            DecodeOutcome::Tree(_) => None,
            DecodeOutcome::Fallback(wrapper) => Some(&wrapper.raw_data),
        }
    }
}

/// Rewrite Hive object notation into JSON text.
///
/// Blank input yields `{}`. The output is not validated; see [`decode`].
pub fn convert_to_json(notation: &str) -> Result<String, NotationError> {
    if notation.trim().is_empty() {
        return Ok("{}".to_string());
    }
    NotationPipeline::new().run(notation)
}

fn decode_structured(notation: &str) -> Result<Value, NotationError> {
    let json = convert_to_json(notation)?;
    Ok(serde_json::from_str(&json)?)
}

/// Decode a detail blob according to `mode`.
///
/// Returns `None` when there is nothing to attach: `Ignore` mode, or blank input.
/// Never fails; a `Structured` decode that goes wrong degrades to the same
/// [`FallbackWrapper`] `Raw` mode produces, and logs a warning.
pub fn decode(notation: &str, mode: DetailedTableInfoMode) -> Option<DecodeOutcome> {
    if notation.trim().is_empty() {
        debug!("no detailed table information to decode");
        return None;
    }

    match mode {
        DetailedTableInfoMode::Ignore => {
            debug!("ignoring detailed table information as configured");
            None
        }
        DetailedTableInfoMode::Raw => {
            debug!("keeping detailed table information as raw text");
            Some(DecodeOutcome::Fallback(FallbackWrapper::new(notation)))
        }
        DetailedTableInfoMode::Structured => match decode_structured(notation) {
            Ok(tree) => {
                debug!("decoded detailed table information");
                Some(DecodeOutcome::Tree(tree))
            }
            Err(error) => {
                warn!(%error, "failed to decode detailed table information, keeping raw text");
                Some(DecodeOutcome::Fallback(FallbackWrapper::new(notation)))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_input_converts_to_empty_object() {
        assert_eq!(convert_to_json("").unwrap(), "{}");
        assert_eq!(convert_to_json("  \n").unwrap(), "{}");
    }

    #[test]
    fn test_blank_input_is_a_no_op_in_every_mode() {
        for mode in [
            DetailedTableInfoMode::Structured,
            DetailedTableInfoMode::Raw,
            DetailedTableInfoMode::Ignore,
        ] {
            assert_eq!(decode("   ", mode), None);
        }
    }

    #[test]
    fn test_ignore_mode_attaches_nothing() {
        assert_eq!(decode("T(a:1)", DetailedTableInfoMode::Ignore), None);
    }

    #[test]
    fn test_raw_mode_keeps_text_verbatim() {
        let outcome = decode("T(a:\"x\")", DetailedTableInfoMode::Raw).unwrap();
        assert_eq!(outcome.raw_data(), Some("T(a:\"x\")"));
        assert_eq!(outcome.property_name(), "detailedTableInfoRaw");
    }

    #[test]
    fn test_structured_mode_decodes() {
        let outcome = decode("T(a:1, b:x)", DetailedTableInfoMode::Structured).unwrap();
        assert_eq!(outcome.tree(), Some(&json!({"a": 1, "b": "x"})));
        assert_eq!(outcome.property_name(), "detailedTableInfo");
    }

    #[test]
    fn test_structured_failure_degrades_to_raw_shape() {
        let input = "T(a:1, b:[x)";
        let structured = decode(input, DetailedTableInfoMode::Structured).unwrap();
        let raw = decode(input, DetailedTableInfoMode::Raw).unwrap();
        assert_eq!(structured, raw);
        assert_eq!(
            serde_json::to_value(&structured).unwrap(),
            json!({"rawData": input})
        );
    }

    #[test]
    fn test_out_of_range_number_decodes_as_string() {
        let outcome = decode("T(a:1e400, b:x)", DetailedTableInfoMode::Structured).unwrap();
        assert_eq!(outcome.tree(), Some(&json!({"a": "1e400", "b": "x"})));
    }

    fn nested(depth: usize) -> String {
        format!("T({}v:1{}", "c:T(".repeat(depth - 1), ")".repeat(depth))
    }

    #[test]
    fn test_nesting_beyond_parser_limit_falls_back() {
        let shallow = decode(&nested(50), DetailedTableInfoMode::Structured).unwrap();
        assert!(shallow.tree().is_some());

        let deep = nested(200);
        let outcome = decode(&deep, DetailedTableInfoMode::Structured).unwrap();
        assert_eq!(outcome.raw_data(), Some(deep.as_str()));
    }

    #[test]
    fn test_fallback_property_value_is_the_raw_string() {
        let outcome = DecodeOutcome::Fallback(FallbackWrapper::new("T(x"));
        assert_eq!(outcome.into_property_value(), json!("T(x"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(
            "JSON".parse::<DetailedTableInfoMode>().unwrap(),
            DetailedTableInfoMode::Structured
        );
        assert_eq!(
            "raw".parse::<DetailedTableInfoMode>().unwrap(),
            DetailedTableInfoMode::Raw
        );
        assert!("verbose".parse::<DetailedTableInfoMode>().is_err());
        assert_eq!(DetailedTableInfoMode::default(), DetailedTableInfoMode::Structured);
    }
}
