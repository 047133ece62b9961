//! Quote normalization
//!
//! Hive escapes quotes embedded in table parameters once per level of nesting, so a JSON
//! value stored in `COLUMN_STATS_ACCURATE` comes out as `{\\\"BASIC_STATS\\\":\\\"true\\\"}`.
//! Collapsing every run of backslashes before a quote back to a bare `"` gives later passes
//! one canonical string delimiter to track.

use crate::hive::notation::transformations::Transformation;
use crate::hive::notation::NotationError;
use once_cell::sync::Lazy;
use regex::Regex;

static ESCAPED_QUOTE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\\+""#).unwrap());

/// First pass: `\\\"` and friends become `"`.
pub struct NormalizeQuotes;

impl Transformation for NormalizeQuotes {
    fn name(&self) -> &'static str {
        "normalize_quotes"
    }

    fn description(&self) -> &'static str {
        "Collapse runs of backslashes followed by a quote into a single quote"
    }

    fn transform(&self, input: &str) -> Result<String, NotationError> {
        Ok(normalize_quotes(input))
    }
}

/// Collapse every `\+"` into `"`
pub fn normalize_quotes(input: &str) -> String {
    ESCAPED_QUOTE.replace_all(input, "\"").into_owned()
}
