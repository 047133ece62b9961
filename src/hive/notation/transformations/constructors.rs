//! Constructor-call substitution
//!
//! Thrift's `toString()` prints each struct as `TypeName(field:value, ...)`. The type name
//! carries nothing worth keeping, so `TypeName(` becomes `{` and `)` becomes `}`. Map
//! (`{...}`) and list (`[...]`) literals are already in their final bracket form and are
//! left untouched.

use crate::hive::notation::transformations::Transformation;
use crate::hive::notation::NotationError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// An identifier-like token directly followed by `(`, or a lone `)`.
static CONSTRUCTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9.]*\(|\)").unwrap());

/// Second pass: `Name(...)` becomes `{...}`.
pub struct ConstructorsToBraces;

impl Transformation for ConstructorsToBraces {
    fn name(&self) -> &'static str {
        "constructors_to_braces"
    }

    fn description(&self) -> &'static str {
        "Replace `Name(` with `{` and `)` with `}`"
    }

    fn transform(&self, input: &str) -> Result<String, NotationError> {
        Ok(constructors_to_braces(input))
    }
}

/// Rewrite constructor calls into brace-delimited objects
pub fn constructors_to_braces(input: &str) -> String {
    CONSTRUCTOR
        .replace_all(input, |caps: &Captures| {
            if caps[0].ends_with('(') {
                "{"
            } else {
                "}"
            }
        })
        .into_owned()
}
