//! Properties file configuration source.

use super::{ConfigSource, DEFAULT_ORDINAL, ordinal_or};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source backed by a single `.properties` file.
///
/// The file is read once, when the source is created. The format follows the usual
/// properties conventions: `key=value`, `key: value` or `key value` entries, `#` and `!`
/// comment lines, a trailing backslash continues a line, and `\t`, `\n`, `\r`, `\f` and
/// `\uXXXX` escapes are decoded.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::sources::{ConfigSource, PropertiesConfigSource};
///
/// let source = PropertiesConfigSource::from_content("inline", "server.port = 8080\n# comment\n");
/// assert_eq!(source.value("server.port").as_deref(), Some("8080"));
/// assert_eq!(source.ordinal(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesConfigSource {
    location: PathBuf,
    properties: HashMap<String, String>,
}

impl PropertiesConfigSource {
    /// Read and parse the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains a malformed escape.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = decode(fs::read(path)?);
        let properties = parse(&content).map_err(|reason| {
            ConfigError::ParseError(format!("{}: {}", path.display(), reason))
        })?;

        tracing::trace!(path = %path.display(), count = properties.len(), "loaded properties file");

        Ok(Self {
            location: path.to_path_buf(),
            properties,
        })
    }

    /// Parse properties from an in-memory string; malformed escapes are kept literally.
    pub fn from_content(location: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            location: location.into(),
            properties: parse_lenient(content),
        }
    }

    /// The file this source was read from.
    pub fn location(&self) -> &Path {
        &self.location
    }
}

impl ConfigSource for PropertiesConfigSource {
    fn properties(&self) -> HashMap<String, String> {
        self.properties.clone()
    }

    fn value(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn name(&self) -> String {
        format!("PropertiesConfigSource[source={}]", self.location.display())
    }

    fn ordinal(&self) -> i32 {
        ordinal_or(self, DEFAULT_ORDINAL)
    }
}

/// Properties files are ISO-8859-1 by convention; UTF-8 content is accepted as well.
fn decode(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| e.into_bytes().iter().map(|&b| b as char).collect())
}

fn parse_lenient(content: &str) -> HashMap<String, String> {
    logical_lines(content)
        .map(|line| {
            let (key, value) = split_entry(&line);
            (
                unescape(key).unwrap_or_else(|_| key.to_string()),
                unescape(value).unwrap_or_else(|_| value.to_string()),
            )
        })
        .collect()
}

fn parse(content: &str) -> std::result::Result<HashMap<String, String>, String> {
    let mut properties = HashMap::new();
    for line in logical_lines(content) {
        let (key, value) = split_entry(&line);
        properties.insert(unescape(key)?, unescape(value)?);
    }
    Ok(properties)
}

/// Join continuation lines and drop blanks and comments.
fn logical_lines(content: &str) -> impl Iterator<Item = String> + '_ {
    let mut lines = content.lines();
    std::iter::from_fn(move || {
        loop {
            let first = lines.next()?.trim_start();
            if first.is_empty() || first.starts_with('#') || first.starts_with('!') {
                continue;
            }

            let mut logical = String::new();
            let mut current = first;
            while ends_with_continuation(current) {
                logical.push_str(&current[..current.len() - 1]);
                match lines.next() {
                    Some(next) => current = next.trim_start(),
                    None => return Some(logical),
                }
            }
            logical.push_str(current);
            return Some(logical);
        }
    })
}

/// A line continues when it ends with an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map(|r| r.trim_start_matches([' ', '\t', '\x0c']))
        .unwrap_or(rest);
    (key, rest)
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .ok_or_else(|| format!("malformed \\u escape '\\u{}'", hex))?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}
