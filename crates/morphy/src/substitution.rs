// Character substitution applied to lookup keys.

use hashbrown::HashMap;
use morphy_dawg::Substitutions;

use crate::config::ConfigError;

/// Immutable map from a single character to its replacement string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSubstitutions {
    map: HashMap<char, String>,
}

impl CharSubstitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string pairs. Every key must be exactly one character.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = HashMap::new();
        for (key, value) in pairs {
            let key = key.as_ref();
            let mut chars = key.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::InvalidSubstitutionKey(key.to_string()));
            };
            map.insert(c, value.as_ref().to_string());
        }
        Ok(Self { map })
    }

    /// Parse a `key => value` text resource.
    pub fn parse_resource(text: &str) -> Result<Self, ConfigError> {
        Self::from_pairs(crate::resource::parse_pairs(text)?)
    }

    /// Replace every configured character; others pass through unchanged.
    pub fn normalize(&self, word: &str) -> String {
        if self.map.is_empty() {
            return word.to_string();
        }
        let mut out = String::with_capacity(word.len());
        for c in word.chars() {
            match self.map.get(&c) {
                Some(replacement) => out.push_str(replacement),
                None => out.push(c),
            }
        }
        out
    }

    pub fn get(&self, c: char) -> Option<&str> {
        self.map.get(&c).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Substitutions for CharSubstitutions {
    fn replacement(&self, c: char) -> Option<&str> {
        self.get(c)
    }
}
