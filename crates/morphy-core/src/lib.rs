//! Shared types for morphological analysis.
//!
//! - [`grammeme`] -- Grammeme vocabulary, categories and 256-bit grammeme sets
//! - [`tag`] -- Interned tags and the tag table
//! - [`parsed`] -- Parse results, provenance and ranking order
//! - [`character`] -- Character and token classification

pub mod character;
pub mod grammeme;
pub mod parsed;
pub mod tag;

pub use grammeme::{Category, GrammemeId, GrammemeSet, GrammemeTable};
pub use parsed::{FormRef, ParseMethod, ParsedWord, Provenance, TOP_SCORE};
pub use tag::{Tag, TagId, TagTable};

/// Error type for grammeme and tag construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("unknown grammeme {0:?}")]
    UnknownGrammeme(String),
    #[error("empty grammeme name")]
    EmptyGrammeme,
    #[error("tag has no grammemes")]
    EmptyTag,
    #[error("too many grammemes (limit {0})")]
    TooManyGrammemes(usize),
    #[error("grammeme {0:?} is its own ancestor")]
    ParentCycle(String),
}
