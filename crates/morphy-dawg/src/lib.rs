//! Compact character automaton for morphological dictionaries.
//!
//! This crate provides the storage layer used by `morphy`: a minimized,
//! acyclic automaton mapping string keys to fixed-size payload records, plus
//! the endian-aware binary framing every dictionary section shares.
//!
//! # Architecture
//!
//! - [`format`] -- Bundle header, section tags and footer checksum
//! - [`reader`] -- Checksumming, endian-aware binary reader
//! - [`writer`] -- Checksumming, endian-aware binary writer
//! - [`record`] -- Plain-old-data record layouts and byte swapping
//! - [`automaton`] -- Loaded automaton with lookup and substitution-aware lookup
//! - [`completer`] -- Lazy prefix enumeration (explicit DFS stack)
//! - [`builder`] -- Automaton construction and minimization

pub mod automaton;
pub mod builder;
pub mod completer;
pub mod format;
pub mod reader;
pub mod record;
pub mod writer;

pub use automaton::Dawg;
pub use builder::DawgBuilder;
pub use completer::Completions;
pub use reader::{ByteReader, Endian};
pub use record::Record;
pub use writer::ByteWriter;

/// Error type for dictionary bundle decoding.
///
/// Every variant carries the name of the section being decoded so that a
/// corrupt bundle can be diagnosed without a hex dump.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("invalid magic number in bundle header")]
    InvalidMagic,
    #[error("invalid byte-order mark {0:#06x}")]
    InvalidByteOrderMark(u16),
    #[error("unsupported format version {found} (supported: {supported})")]
    UnsupportedVersion { found: u16, supported: u16 },
    #[error("expected section {expected:?}, found {found:?}")]
    UnexpectedSection { expected: String, found: String },
    #[error("unexpected end of data in section {section}")]
    Truncated { section: &'static str },
    #[error("invalid UTF-8 string in section {section}")]
    InvalidUtf8 { section: &'static str },
    #[error("variable-length integer overflow in section {section}")]
    VarintOverflow { section: &'static str },
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("inconsistent data in section {section}: {message}")]
    Inconsistent {
        section: &'static str,
        message: String,
    },
    #[error("I/O error in section {section}: {source}")]
    Io {
        section: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl FormatError {
    /// Shorthand for [`FormatError::Inconsistent`].
    pub fn inconsistent(section: &'static str, message: impl Into<String>) -> Self {
        FormatError::Inconsistent {
            section,
            message: message.into(),
        }
    }
}

/// Character replacement rules consulted by substitution-aware lookups.
///
/// A replacement may be longer than one character; lookups follow the whole
/// replacement string through the automaton.
pub trait Substitutions {
    /// The replacement for `c`, if one is configured.
    fn replacement(&self, c: char) -> Option<&str>;
}

/// Substitution rules that never replace anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSubstitutions;

impl Substitutions for NoSubstitutions {
    fn replacement(&self, _c: char) -> Option<&str> {
        None
    }
}

impl<S: std::hash::BuildHasher> Substitutions for hashbrown::HashMap<char, String, S> {
    fn replacement(&self, c: char) -> Option<&str> {
        self.get(&c).map(String::as_str)
    }
}
