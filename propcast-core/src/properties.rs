//! `.properties` file source.
//!
//! Supports the usual format: `key=value`, `key: value` or `key value`,
//! `#`/`!` comment lines, backslash line continuations, and the escapes
//! `\t \n \r \f \uXXXX`. Any other escaped character stands for itself,
//! which is how separators and leading spaces are put into keys and values.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PropcastError, PropcastResult};
use crate::source::{ConfigSource, MapSource};

#[derive(Debug, Clone)]
pub struct PropertiesSource {
    path: PathBuf,
    name: String,
    entries: MapSource,
}

impl PropertiesSource {
    /// Reads and parses the file at `path`. A missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> PropcastResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PropcastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Self::parse(path, &text)?;
        info!(path = ?path, entries = source.len(), "Loaded properties file");
        Ok(source)
    }

    /// Like [`load`](Self::load) but returns `Ok(None)` when the file does not exist.
    pub fn load_optional(path: impl AsRef<Path>) -> PropcastResult<Option<Self>> {
        match Self::load(path.as_ref()) {
            Ok(source) => Ok(Some(source)),
            Err(PropcastError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?path.as_ref(), "No properties file found, skipping");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Parses properties text. `path` is only used for naming and error reports.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> PropcastResult<Self> {
        let path = path.into();
        let mut entries = MapSource::new(path.display().to_string());
        let mut lines = text.lines().enumerate();

        while let Some((index, raw)) = lines.next() {
            let line = raw.trim_start_matches(is_blank);
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let mut logical = line.to_string();
            while continues(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical).map_err(|reason| PropcastError::Properties {
                path: path.clone(),
                line: index + 1,
                reason,
            })?;
            entries.insert(key, value);
        }

        Ok(PropertiesSource {
            name: format!("properties file {}", path.display()),
            path,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConfigSource for PropertiesSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key)
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0C'
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> Result<(String, String), String> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    let mut key = String::new();
    while i < chars.len() {
        match chars[i] {
            '\\' => i = unescape(&chars, i, &mut key)?,
            '=' | ':' => break,
            c if is_blank(c) => break,
            c => {
                key.push(c);
                i += 1;
            }
        }
    }

    while i < chars.len() && is_blank(chars[i]) {
        i += 1;
    }
    if i < chars.len() && (chars[i] == '=' || chars[i] == ':') {
        i += 1;
        while i < chars.len() && is_blank(chars[i]) {
            i += 1;
        }
    }

    let mut value = String::new();
    while i < chars.len() {
        if chars[i] == '\\' {
            i = unescape(&chars, i, &mut value)?;
        } else {
            value.push(chars[i]);
            i += 1;
        }
    }

    Ok((key, value))
}

/// Decodes the escape starting at `chars[at]` (a backslash) into `out` and
/// returns the index just past it.
fn unescape(chars: &[char], at: usize, out: &mut String) -> Result<usize, String> {
    let Some(&escaped) = chars.get(at + 1) else {
        // Dangling backslash at end of input.
        return Ok(at + 1);
    };
    match escaped {
        't' => out.push('\t'),
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        'f' => out.push('\x0C'),
        'u' => {
            let digits: String = chars
                .get(at + 2..at + 6)
                .ok_or_else(|| "truncated \\u escape".to_string())?
                .iter()
                .collect();
            let code = u32::from_str_radix(&digits, 16)
                .map_err(|_| format!("invalid \\u escape '\\u{}'", digits))?;
            let decoded = char::from_u32(code)
                .ok_or_else(|| format!("\\u{} is not a valid character", digits))?;
            out.push(decoded);
            return Ok(at + 6);
        }
        other => out.push(other),
    }
    Ok(at + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(text: &str) -> PropertiesSource {
        PropertiesSource::parse("test.properties", text).unwrap()
    }

    #[test]
    fn test_separators_and_comments() {
        let props = parse(
            "# comment\n\
             ! also a comment\n\
             \n\
             a=1\n\
             b: 2\n\
             c 3\n\
             d   =   4\n",
        );
        assert_eq!(props.len(), 4);
        assert_eq!(props.get("a").as_deref(), Some("1"));
        assert_eq!(props.get("b").as_deref(), Some("2"));
        assert_eq!(props.get("c").as_deref(), Some("3"));
        assert_eq!(props.get("d").as_deref(), Some("4"));
    }

    #[test]
    fn test_value_trailing_whitespace_kept() {
        let props = parse("test=hello  \n");
        assert_eq!(props.get("test").as_deref(), Some("hello  "));
    }

    #[test]
    fn test_empty_value_is_present() {
        let props = parse("test=\nother\n");
        assert_eq!(props.get("test").as_deref(), Some(""));
        assert_eq!(props.get("other").as_deref(), Some(""));
        assert_eq!(props.get("missing"), None);
    }

    #[test]
    fn test_later_duplicate_overrides() {
        let props = parse("test=one\ntest=two\n");
        assert_eq!(props.get("test").as_deref(), Some("two"));
    }

    #[test]
    fn test_line_continuation() {
        let props = parse("list=a,\\\n     b,\\\n     c\nescaped=ends\\\\\nnext=x\n");
        assert_eq!(props.get("list").as_deref(), Some("a,b,c"));
        assert_eq!(props.get("escaped").as_deref(), Some("ends\\"));
        assert_eq!(props.get("next").as_deref(), Some("x"));
    }

    #[test]
    fn test_escapes() {
        let props = parse("k\\=ey=va\\:l\\tue\\u00e9\nspace=\\ lead\n");
        assert_eq!(props.get("k=ey").as_deref(), Some("va:l\tue\u{e9}"));
        assert_eq!(props.get("space").as_deref(), Some(" lead"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let props = parse("a=1\r\nb=2\r\n");
        assert_eq!(props.get("a").as_deref(), Some("1"));
        assert_eq!(props.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_bad_unicode_escape_reports_line() {
        let err = PropertiesSource::parse("bad.properties", "ok=1\nbad=\\uZZZZ\n").unwrap_err();
        match err {
            PropcastError::Properties { line, .. } => assert_eq!(line, 2),
            other => panic!("Expected Properties error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "test=from file").unwrap();
        let props = PropertiesSource::load(file.path()).unwrap();
        assert_eq!(props.get("test").as_deref(), Some("from file"));
        assert_eq!(props.path(), file.path());
        assert!(props.name().starts_with("properties file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("application.properties");

        let err = PropertiesSource::load(&path).unwrap_err();
        assert!(matches!(err, PropcastError::Io { .. }));

        assert!(PropertiesSource::load_optional(&path).unwrap().is_none());
    }
}
