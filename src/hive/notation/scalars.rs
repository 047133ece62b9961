//! Typing of bare scalar tokens
//!
//! Hive prints every leaf unquoted, so the quoting pass has to decide per token whether it
//! is a keyword, a number or a string.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

/// Decimal floating-point literal: optional sign, digits, optional fraction, optional exponent.
static DECIMAL_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap());

/// The subset of decimal literals JSON accepts verbatim.
static JSON_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$").unwrap()
});

/// Returns true for `true`, `false` and `null` (case-sensitive).
pub fn is_keyword(token: &str) -> bool {
    matches!(token, "true" | "false" | "null")
}

/// Returns true if `token` is a decimal floating-point literal.
///
/// Unlike `str::parse::<f64>`, this rejects `inf`, `NaN` and friends.
pub fn is_number(token: &str) -> bool {
    DECIMAL_LITERAL.is_match(token)
}

/// Render a trimmed bare token as a JSON literal.
///
/// Keywords pass through, numbers are emitted as numeric literals, everything else
/// becomes a JSON string. Numbers JSON would reject as written (`+5`, `007`, `1.`)
/// are re-rendered from their `f64` value. Numbers outside the `f64` range (`1e400`)
/// stay strings.
pub fn render_scalar(token: &str) -> String {
    if is_keyword(token) {
        return token.to_string();
    }
    if is_number(token) {
        if let Some(number) = token.parse::<f64>().ok().and_then(Number::from_f64) {
            if JSON_NUMBER.is_match(token) {
                return token.to_string();
            }
            return number.to_string();
        }
    }
    Value::String(token.to_string()).to_string()
}
