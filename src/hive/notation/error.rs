//! Notation decoding error types.

/// Errors produced while rewriting or parsing Hive object notation.
///
/// None of these escape [`decode`](super::decode); they are turned into a
/// [`FallbackWrapper`](super::FallbackWrapper) there.
#[derive(Debug, thiserror::Error)]
pub enum NotationError {
    /// A rewriting pass finished inside a quoted string.
    #[error("{stage}: unterminated quoted string")]
    UnterminatedString { stage: &'static str },

    /// The rewritten text is not valid JSON.
    #[error("rewritten notation is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
