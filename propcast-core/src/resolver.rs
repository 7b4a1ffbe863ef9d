//! Property resolution over an ordered chain of sources.

use tracing::{debug, info};

use crate::error::{PropcastError, PropcastResult};
use crate::placeholder::Placeholder;
use crate::source::ConfigSource;
use crate::value::ResolvedValue;

/// Resolves property keys against sources in precedence order.
///
/// The first source that has the key wins. Lookups never fail: a key no
/// source knows resolves to the caller's default.
#[derive(Default)]
pub struct ConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigResolver {
    pub fn new() -> Self {
        ConfigResolver { sources: Vec::new() }
    }

    /// Appends a source with lower precedence than every source added before it.
    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.push_source(source);
        self
    }

    pub fn push_source(&mut self, source: impl ConfigSource + 'static) {
        debug!(source = source.name(), precedence = self.sources.len(), "Registered config source");
        self.sources.push(Box::new(source));
    }

    /// Source names, highest precedence first.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Returns the value of `key` verbatim, or `default` if no source has it.
    pub fn resolve(&self, key: &str, default: &str) -> String {
        self.lookup(key)
            .map(|(value, _)| value)
            .unwrap_or_else(|| default.to_string())
    }

    /// Same as [`resolve`](Self::resolve) but keeps track of where the value came from.
    pub fn resolve_value(&self, key: &str, default: &str) -> ResolvedValue {
        match self.lookup(key) {
            Some((value, origin)) => ResolvedValue::new(key, value, Some(origin.to_string())),
            None => ResolvedValue::new(key, default, None),
        }
    }

    /// Resolves a placeholder expression. Fails only when the key is absent
    /// everywhere and the placeholder carries no default.
    pub fn resolve_placeholder(&self, placeholder: &Placeholder) -> PropcastResult<ResolvedValue> {
        let key = placeholder.key();
        let resolved = match (self.lookup(key), placeholder.default_value()) {
            (Some((value, origin)), _) => ResolvedValue::new(key, value, Some(origin.to_string())),
            (None, Some(default)) => ResolvedValue::new(key, default, None),
            (None, None) => return Err(PropcastError::UnresolvedPlaceholder(key.to_string())),
        };
        match resolved.origin() {
            Some(origin) => info!(key, origin, "Resolved property"),
            None => info!(key, "Property not set, using default"),
        }
        Ok(resolved)
    }

    fn lookup(&self, key: &str) -> Option<(String, &str)> {
        debug_assert!(!key.is_empty(), "property key must not be empty");
        self.sources
            .iter()
            .find_map(|source| source.get(key).map(|value| (value, source.name())))
    }
}
