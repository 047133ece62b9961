//! Rewriting passes for Hive object notation
//!
//! The passes are applied in order:
//! 1. normalize_quotes - `\\\"` runs become `"`
//! 2. constructors_to_braces - `Name(` becomes `{`, `)` becomes `}`
//! 3. equals_to_colons - map `=` becomes `:` outside strings
//! 4. quote_tokens - keys and string values get quoted, other scalars become literals
//!
//! Reordering them breaks the decoder; see the module docs of [`notation`](super).

pub mod constructors;
pub mod interface;
pub mod normalize_quotes;
pub mod quoting;
pub mod separators;

// Re-export the Transformation trait
pub use interface::Transformation;

// Re-export transformation implementations
pub use constructors::ConstructorsToBraces;
pub use normalize_quotes::NormalizeQuotes;
pub use quoting::QuoteTokens;
pub use separators::EqualsToColons;

// Re-export transformation functions
pub use constructors::constructors_to_braces;
pub use normalize_quotes::normalize_quotes;
pub use quoting::quote_tokens;
pub use separators::equals_to_colons;

use crate::hive::notation::NotationError;
use tracing::trace;

/// The four rewriting passes, in their fixed order
pub struct NotationPipeline {
    stages: Vec<Box<dyn Transformation>>,
}

impl NotationPipeline {
    /// The standard notation-to-JSON pipeline
    pub fn new() -> Self {
        Self {
            stages: vec![
                Box::new(NormalizeQuotes),
                Box::new(ConstructorsToBraces),
                Box::new(EqualsToColons),
                Box::new(QuoteTokens),
            ],
        }
    }

    /// Stage names, in execution order
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Run every stage over `input`, feeding each the previous stage's output
    pub fn run(&self, input: &str) -> Result<String, NotationError> {
        let mut text = input.to_string();
        for stage in &self.stages {
            text = stage.transform(&text)?;
            trace!(stage = stage.name(), len = text.len(), "notation stage applied");
        }
        Ok(text)
    }
}

impl Default for NotationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(
            NotationPipeline::new().stage_names(),
            vec![
                "normalize_quotes",
                "constructors_to_braces",
                "equals_to_colons",
                "quote_tokens"
            ]
        );
    }

    #[test]
    fn test_run_chains_all_stages() {
        let out = NotationPipeline::default()
            .run(r#"T(stats:{\\\"A\\\":\\\"true\\\"}, p:{k=v})"#)
            .unwrap();
        assert_eq!(out, r#"{"stats":{"A":"true"}, "p":{"k":"v"}}"#);
    }
}
