//! Transformation interface for notation rewriting passes
//!
//! This module defines the `Transformation` trait that every rewriting pass implements.
//! A transformation is a pure function from text to text.
//!
//! Design principles:
//! - Transformations are pure: same input always produces same output
//! - Transformations operate on whole strings in a single left-to-right scan
//! - Transformations have metadata: name and description for logging
//! - Transformations are composable: chained in a fixed order by `NotationPipeline`

use crate::hive::notation::NotationError;

/// A single rewriting pass over Hive object notation
///
/// # Examples
///
/// ```ignore
/// struct Uppercase;
///
/// impl Transformation for Uppercase {
///     fn name(&self) -> &'static str {
///         "uppercase"
///     }
///
///     fn description(&self) -> &'static str {
///         "Uppercases everything"
///     }
///
///     fn transform(&self, input: &str) -> Result<String, NotationError> {
///         Ok(input.to_uppercase())
///     }
/// }
/// ```
pub trait Transformation: Send + Sync {
    /// Returns the name of this transformation
    ///
    /// Names should be lowercase with underscores (e.g., "normalize_quotes")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of what this transformation does
    fn description(&self) -> &'static str;

    /// Apply this transformation to the full text
    fn transform(&self, input: &str) -> Result<String, NotationError>;
}

/// True if the character at `index` is a `"` not preceded by a backslash.
pub(crate) fn is_unescaped_quote(chars: &[char], index: usize) -> bool {
    chars[index] == '"' && (index == 0 || chars[index - 1] != '\\')
}
