// Analyzer configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::substitution::CharSubstitutions;

/// Error type for analyzer construction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A substitution key is not exactly one character.
    #[error("substitution key {0:?} must be exactly one character")]
    InvalidSubstitutionKey(String),

    /// A dictionary path was given but is empty.
    #[error("dictionary path is empty")]
    EmptyDictionaryPath,

    /// A configured known prefix is empty.
    #[error("known prefixes must not be empty")]
    EmptyPrefix,

    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed resource at line {line}: {message}")]
    MalformedResource { line: usize, message: String },

    #[error("an analyzer named {0:?} is already registered")]
    DuplicateName(String),
}

/// Construction-time options of a [`MorphAnalyzer`](crate::MorphAnalyzer).
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes:
///
/// ```json
/// { "char_substitutions": { "е": "ё" }, "known_prefixes": ["псевдо"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Single-character keys mapped to replacement strings, applied to the
    /// lookup key before dictionary lookup.
    pub char_substitutions: BTreeMap<String, String>,
    /// Return purely numeric input unmodified without consulting any unit.
    pub ignore_numbers: bool,
    /// Prefixes stripped by the known-prefix unit.
    pub known_prefixes: Vec<String>,
    /// Lowercase the lookup key. The surface word is always preserved.
    pub lowercase: bool,
    /// Longest word ending tried by suffix prediction.
    pub max_suffix_length: usize,
    /// Shortest word (in characters) suffix prediction is attempted for.
    pub min_word_length_for_prediction: usize,
    /// Longest prefix tried by the unknown-prefix unit.
    pub max_prefix_length: usize,
    /// Shortest remainder left after stripping a prefix.
    pub min_remainder_length: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            char_substitutions: BTreeMap::new(),
            ignore_numbers: true,
            known_prefixes: Vec::new(),
            lowercase: false,
            max_suffix_length: 5,
            min_word_length_for_prediction: 4,
            max_prefix_length: 5,
            min_remainder_length: 3,
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: AnalyzerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fill in the usual substitutions for `language` if none are set.
    ///
    /// Russian text commonly writes `е` for `ё`; Ukrainian text `г` for `ґ`.
    pub fn with_language_defaults(mut self, language: &str) -> Self {
        if self.char_substitutions.is_empty() {
            let pair = match language.to_ascii_lowercase().as_str() {
                "ru" => Some(("е", "ё")),
                "uk" => Some(("г", "ґ")),
                _ => None,
            };
            if let Some((from, to)) = pair {
                self.char_substitutions
                    .insert(from.to_string(), to.to_string());
            }
        }
        self
    }

    /// Add substitutions from a `key => value` text resource.
    pub fn with_substitution_resource(mut self, text: &str) -> Result<Self, ConfigError> {
        for (key, value) in crate::resource::parse_pairs(text)? {
            self.char_substitutions.insert(key, value);
        }
        self.validate()?;
        Ok(self)
    }

    /// Add prefixes from a one-per-line text resource.
    pub fn with_known_prefix_resource(mut self, text: &str) -> Result<Self, ConfigError> {
        self.known_prefixes
            .extend(crate::resource::parse_known_prefixes(text)?);
        Ok(self)
    }

    /// Check every option that can be wrong independently of a dictionary.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.substitutions()?;
        if self.known_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(())
    }

    /// The substitution table described by `char_substitutions`.
    pub fn substitutions(&self) -> Result<CharSubstitutions, ConfigError> {
        CharSubstitutions::from_pairs(&self.char_substitutions)
    }
}
