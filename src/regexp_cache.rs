use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("An error occurred while trying to create regex: {0}")]
pub struct InvalidRegexError(#[from] regex::Error);

/// A concurrent cache of compiled regular expressions, keyed by pattern
/// source. Patterns in the metadata table repeat heavily across calls, so
/// compiling each one once is a large win.
pub struct RegexCache {
    cache: DashMap<String, Arc<regex::Regex>>,
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            Ok(regex.value().clone())
        } else {
            let entry = self
                .cache
                .entry(pattern.to_string())
                .or_try_insert_with(|| regex::Regex::new(pattern).map(Arc::new))?;
            Ok(entry.value().clone())
        }
    }

    /// Compiles a pattern anchored to the start of its input. The metadata
    /// table stores unanchored patterns; lookups that must consume from the
    /// front go through here.
    pub fn get_regex_anchored(
        &self,
        pattern: &str,
    ) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if pattern.starts_with('^') {
            self.get_regex(pattern)
        } else {
            self.get_regex(&fast_cat::concat_str!("^(?:", pattern, ")"))
        }
    }
}
