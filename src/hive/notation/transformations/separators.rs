//! Separator rewriting
//!
//! Java maps print as `{key=value, ...}` while struct fields use `field:value`. After this
//! pass `:` is the only key/value separator. `=` inside quoted strings is content and stays.

use crate::hive::notation::transformations::interface::is_unescaped_quote;
use crate::hive::notation::transformations::Transformation;
use crate::hive::notation::NotationError;

/// Third pass: unquoted `=` becomes `:`.
pub struct EqualsToColons;

impl Transformation for EqualsToColons {
    fn name(&self) -> &'static str {
        "equals_to_colons"
    }

    fn description(&self) -> &'static str {
        "Replace `=` with `:` outside quoted strings"
    }

    fn transform(&self, input: &str) -> Result<String, NotationError> {
        Ok(equals_to_colons(input))
    }
}

/// Replace every `=` outside a quoted string with `:`
pub fn equals_to_colons(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len());
    let mut in_quotes = false;

    for (i, &c) in chars.iter().enumerate() {
        if is_unescaped_quote(&chars, i) {
            in_quotes = !in_quotes;
            result.push(c);
        } else if c == '=' && !in_quotes {
            result.push(':');
        } else {
            result.push(c);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_entries() {
        assert_eq!(
            equals_to_colons("{serialization.format=1, EXTERNAL=TRUE}"),
            "{serialization.format:1, EXTERNAL:TRUE}"
        );
    }

    #[test]
    fn test_equals_inside_quotes_is_kept() {
        assert_eq!(
            equals_to_colons(r#"{expr="a=b", x=1}"#),
            r#"{expr:"a=b", x:1}"#
        );
    }

    #[test]
    fn test_escaped_quote_does_not_toggle() {
        assert_eq!(equals_to_colons(r#"{a="x\"=y"}"#), r#"{a:"x\"=y"}"#);
    }
}
