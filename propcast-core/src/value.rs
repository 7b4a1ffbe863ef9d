use std::fmt;
use std::sync::Arc;

/// The outcome of resolving one property at startup.
///
/// Immutable once built. The value sits behind an `Arc<str>` so clones of
/// the server state share one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedValue {
    key: String,
    value: Arc<str>,
    origin: Option<String>,
}

impl ResolvedValue {
    pub fn new(key: impl Into<String>, value: impl Into<Arc<str>>, origin: Option<String>) -> Self {
        ResolvedValue {
            key: key.into(),
            value: value.into(),
            origin,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Name of the source that supplied the value, `None` when the default was used.
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.origin.is_none()
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
