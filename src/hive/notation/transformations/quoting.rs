//! Key and scalar quoting
//!
//! The last pass turns the brace/bracket skeleton produced so far into JSON by quoting the
//! bare words. It is a single scan carrying an in-string flag:
//!
//! - `{`, `}`, `[`, `]` and quotes pass through (quotes toggle the flag)
//! - after an unquoted `:` the value is captured up to the next `,`, `}` or `]` and rendered
//!   with [`render_scalar`], unless it is already quoted or opens a nested object/array
//! - any other bare run of letters or `_` is a key and gets quoted
//!
//! The value capture does not count brackets. By now nesting is explicit, and a bare value is
//! always a scalar.

use crate::hive::notation::scalars::render_scalar;
use crate::hive::notation::transformations::interface::is_unescaped_quote;
use crate::hive::notation::transformations::Transformation;
use crate::hive::notation::NotationError;

/// Fourth pass: quote keys and type bare values.
pub struct QuoteTokens;

impl Transformation for QuoteTokens {
    fn name(&self) -> &'static str {
        "quote_tokens"
    }

    fn description(&self) -> &'static str {
        "Quote bare keys and string values; emit numbers, booleans and null as literals"
    }

    fn transform(&self, input: &str) -> Result<String, NotationError> {
        quote_tokens(input)
    }
}

fn is_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '.' || c == '_'
}

fn ends_value(c: char) -> bool {
    matches!(c, ',' | '}' | ']')
}

/// Quote keys and bare values so the text becomes JSON
pub fn quote_tokens(input: &str) -> Result<String, NotationError> {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len() + input.len() / 4);
    let mut in_quotes = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if is_unescaped_quote(&chars, i) {
            in_quotes = !in_quotes;
            result.push(c);
            i += 1;
        } else if in_quotes {
            result.push(c);
            i += 1;
        } else if c == ':' {
            result.push(c);
            i += 1;
            while i < chars.len() && chars[i].is_whitespace() {
                result.push(chars[i]);
                i += 1;
            }
            if i < chars.len() && !matches!(chars[i], '"' | '{' | '[') {
                let start = i;
                while i < chars.len() && !ends_value(chars[i]) {
                    i += 1;
                }
                let value: String = chars[start..i].iter().collect();
                result.push_str(&render_scalar(value.trim()));
            }
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && is_key_char(chars[i]) {
                i += 1;
            }
            result.push('"');
            result.extend(&chars[start..i]);
            result.push('"');
        } else {
            // structural characters, separators and whitespace
            result.push(c);
            i += 1;
        }
    }

    if in_quotes {
        return Err(NotationError::UnterminatedString {
            stage: "quote_tokens",
        });
    }

    Ok(result)
}
