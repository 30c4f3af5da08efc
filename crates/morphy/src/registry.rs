// Named analyzers owned by the host application.

use std::sync::Arc;

use hashbrown::HashMap;

use crate::analyzer::MorphAnalyzer;
use crate::config::ConfigError;

/// Map from a configured name ("ru", "ru-index", ...) to a shared analyzer.
///
/// The host creates one registry per configuration generation and hands it
/// to whatever needs analyzers; on reload it builds a new one or calls
/// [`clear`](Self::clear). Analyzers built over the same `Arc<Dictionary>`
/// share it.
#[derive(Debug, Default)]
pub struct AnalyzerRegistry {
    analyzers: HashMap<String, Arc<MorphAnalyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an analyzer under a new name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        analyzer: Arc<MorphAnalyzer>,
    ) -> Result<Arc<MorphAnalyzer>, ConfigError> {
        let name = name.into();
        if self.analyzers.contains_key(&name) {
            return Err(ConfigError::DuplicateName(name));
        }
        log::debug!("registered analyzer {name:?}");
        self.analyzers.insert(name, Arc::clone(&analyzer));
        Ok(analyzer)
    }

    /// Add or replace; returns the analyzer previously under `name`.
    pub fn replace(
        &mut self,
        name: impl Into<String>,
        analyzer: Arc<MorphAnalyzer>,
    ) -> Option<Arc<MorphAnalyzer>> {
        self.analyzers.insert(name.into(), analyzer)
    }

    pub fn get(&self, name: &str) -> Option<Arc<MorphAnalyzer>> {
        self.analyzers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.analyzers.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<MorphAnalyzer>> {
        self.analyzers.remove(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.analyzers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Drop every analyzer. Callers still holding an `Arc` keep theirs.
    pub fn clear(&mut self) {
        log::debug!("clearing {} analyzers", self.analyzers.len());
        self.analyzers.clear();
    }
}
