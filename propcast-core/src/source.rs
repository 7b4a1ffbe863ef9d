//! Key/value stores consulted when resolving a property.

use std::collections::HashMap;
use std::ffi::OsString;

/// A read-only key/value store that can answer "what is the value for key K".
///
/// `get` returns `None` only when the key is absent. A key that is present
/// with an empty value returns `Some("")`.
pub trait ConfigSource: Send + Sync {
    /// Human readable name used in logs.
    fn name(&self) -> &str;

    /// Looks up `key`, returning its raw value.
    fn get(&self, key: &str) -> Option<String>;
}

/// In-memory source backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    name: String,
    entries: HashMap<String, String>,
}

impl MapSource {
    pub fn new(name: impl Into<String>) -> Self {
        MapSource {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Inserts or replaces an entry, returning `self` for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Environment variables, snapshotted when the source is created.
///
/// Besides the exact key, the relaxed form is tried: uppercase, `.` becomes
/// `_` and `-` is dropped. `server.port` therefore also matches `SERVER_PORT`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    vars: MapSource,
}

impl EnvSource {
    /// Captures the current process environment. Variables whose name or
    /// value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        Self::from_vars(vars.into_iter().filter_map(|(k, v)| {
            match (k.into_string(), v.into_string()) {
                (Ok(k), Ok(v)) => Some((k, v)),
                (Err(entry), _) | (_, Err(entry)) => {
                    tracing::debug!(entry = ?entry, "Skipping non UTF-8 environment entry");
                    None
                }
            }
        }))
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = MapSource::new("environment");
        for (k, v) in vars {
            map.insert(k, v);
        }
        EnvSource { vars: map }
    }

    /// Environment variable name a property key binds to in relaxed mode.
    pub fn relaxed_name(key: &str) -> String {
        key.chars()
            .filter(|c| *c != '-')
            .map(|c| if c == '.' { '_' } else { c.to_ascii_uppercase() })
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> &str {
        self.vars.name()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.vars
            .get(key)
            .or_else(|| self.vars.get(&Self::relaxed_name(key)))
    }
}

/// Command-line arguments of the form `--key=value`.
///
/// Anything else (`--flag`, positional arguments) is ignored. When a key is
/// repeated the last occurrence wins.
#[derive(Debug, Clone)]
pub struct ArgsSource {
    args: MapSource,
}

impl ArgsSource {
    /// Parses the process arguments, skipping the program name.
    pub fn from_process() -> Self {
        Self::parse(std::env::args_os().skip(1).filter_map(|a| a.into_string().ok()))
    }

    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = MapSource::new("command line");
        for arg in args {
            let Some(option) = arg.as_ref().strip_prefix("--") else {
                continue;
            };
            match option.split_once('=') {
                Some((key, value)) if !key.is_empty() => map.insert(key, value),
                _ => continue,
            }
        }
        ArgsSource { args: map }
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl ConfigSource for ArgsSource {
    fn name(&self) -> &str {
        self.args.name()
    }

    fn get(&self, key: &str) -> Option<String> {
        self.args.get(key)
    }
}
