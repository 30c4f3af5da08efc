//! Morphological analysis over compact dictionary bundles.
//!
//! A [`Dictionary`] is loaded once from a bundle and shared read-only; a
//! [`MorphAnalyzer`] runs a fixed pipeline of analyzer units over it and
//! returns ranked [`ParsedWord`]s for any input, including words the
//! dictionary has never seen.
//!
//! ```no_run
//! use std::sync::Arc;
//! use morphy::{AnalyzerConfig, Dictionary, MorphAnalyzer};
//!
//! let dict = Arc::new(Dictionary::open("dict.bin")?);
//! let config = AnalyzerConfig::default().with_language_defaults(dict.language());
//! let analyzer = MorphAnalyzer::new(dict, config)?;
//! for parsed in analyzer.parse("стали") {
//!     println!("{} {}", parsed.normal_form, analyzer.tag_string(&parsed.tag));
//! }
//! # Ok::<(), morphy::MorphError>(())
//! ```

pub mod analyzer;
pub mod config;
pub mod dictionary;
pub mod registry;
pub mod resource;
pub mod substitution;
pub mod units;

use std::path::PathBuf;

pub use analyzer::MorphAnalyzer;
pub use config::{AnalyzerConfig, ConfigError};
pub use dictionary::Dictionary;
pub use dictionary::builder::BundleBuilder;
pub use morphy_core::{
    Category, FormRef, GrammemeSet, ParseMethod, ParsedWord, Provenance, Tag, TagError,
};
pub use morphy_dawg::{Endian, FormatError};
pub use registry::AnalyzerRegistry;
pub use substitution::CharSubstitutions;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum MorphError {
    /// The dictionary bundle is malformed or unsupported.
    #[error("failed to load dictionary: {0}")]
    Format(#[from] FormatError),

    /// The analyzer configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The dictionary file could not be opened.
    #[error("cannot open dictionary {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
