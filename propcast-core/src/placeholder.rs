//! Parsing of `${key:default}` property expressions.

use std::fmt;
use std::str::FromStr;

use crate::error::{PropcastError, PropcastResult};

/// A property reference: the key to look up and an optional fallback.
///
/// Accepted forms are `${key:default}`, `${key}`, `key:default` and `key`.
/// The first `:` splits key from default, so the default may itself contain
/// colons. `${key:}` has an empty default, which is different from no default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    key: String,
    default: Option<String>,
}

impl Placeholder {
    pub fn new(key: impl Into<String>, default: Option<String>) -> Self {
        Placeholder {
            key: key.into(),
            default,
        }
    }

    pub fn parse(expression: &str) -> PropcastResult<Self> {
        let invalid = |reason: &str| PropcastError::InvalidPlaceholder {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let body = match expression.strip_prefix("${") {
            Some(rest) => rest
                .strip_suffix('}')
                .ok_or_else(|| invalid("missing closing '}'"))?,
            None => expression,
        };

        let (key, default) = match body.split_once(':') {
            Some((key, default)) => (key, Some(default.to_string())),
            None => (body, None),
        };

        if key.is_empty() {
            return Err(invalid("empty key"));
        }
        if key.chars().any(char::is_whitespace) {
            return Err(invalid("key contains whitespace"));
        }

        Ok(Placeholder::new(key, default))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

impl FromStr for Placeholder {
    type Err = PropcastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Placeholder::parse(s)
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.default {
            Some(default) => write!(f, "${{{}:{}}}", self.key, default),
            None => write!(f, "${{{}}}", self.key),
        }
    }
}
