//! Notation decoder
//!
//! This module turns the free-text blob Hive prints under `Detailed Table Information`
//! into JSON.
//!
//! Structure:
//!     Hive serializes its metastore `Table` thrift object with `toString()`, which yields a
//! constructor-call notation with no quoting discipline:
//!
//! ```text
//! Table(tableName:t, sd:StorageDescriptor(cols:[FieldSchema(name:a, type:int)]), parameters:{k=v})
//! ```
//!
//!     There is no grammar for this format, only observed output. Rather than a lexer/parser
//! pair, the text is rewritten in four sequential passes until it is JSON, which is then
//! parsed strictly:
//!
//! 1. Quote normalization ./transformations/normalize_quotes.rs
//! 2. Constructor calls to braces ./transformations/constructors.rs
//! 3. `=` to `:` outside strings ./transformations/separators.rs
//! 4. Key and scalar quoting ./transformations/quoting.rs
//!
//!     Each pass relies on what the previous one established: later passes track strings by a
//! single canonical `"`, the separator pass must not see constructor parentheses, and the
//! quoting pass expects `:` to be the only key/value separator.
//!
//! Limitations
//!
//!     Bare scalar values end at the next `,`, `}` or `]`. A free-text value containing one of
//! those characters is split wrongly; the strict parse then rejects the result and the decoder
//! falls back to the raw text.
//!
//!     The strict parse stops at 128 levels of nesting, so deeper blobs also fall back.

pub mod decoder;
pub mod error;
pub mod scalars;
pub mod transformations;

pub use decoder::{convert_to_json, decode, DecodeOutcome, DetailedTableInfoMode, FallbackWrapper};
pub use error::NotationError;
pub use transformations::{NotationPipeline, Transformation};
