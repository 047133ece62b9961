//! SQL identifier sanitization
//!
//! Database and table names are identifiers, so they cannot be bound as statement
//! parameters. They are reduced to `[A-Za-z0-9_-]` and wrapped in backticks instead.

/// Longest identifier accepted after sanitization
pub const MAX_IDENTIFIER_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier '{0}' is empty after sanitization")]
    Empty(String),

    #[error("identifier '{0}' is longer than 128 characters after sanitization")]
    TooLong(String),
}

/// Strip everything but ASCII letters, digits, `_` and `-`
pub fn sanitize_identifier(identifier: &str) -> Result<String, IdentifierError> {
    let sanitized: String = identifier
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if sanitized.is_empty() {
        return Err(IdentifierError::Empty(identifier.to_string()));
    }
    if sanitized.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong(sanitized));
    }
    Ok(sanitized)
}

/// Sanitize and backtick-quote an identifier for Hive
pub fn quote_identifier(identifier: &str) -> Result<String, IdentifierError> {
    Ok(format!("`{}`", sanitize_identifier(identifier)?))
}
