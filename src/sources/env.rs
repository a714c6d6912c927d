//! Environment variable configuration source.

use super::{ConfigSource, ordinal_or};
use std::collections::HashMap;
use std::env;

/// Default ordinal of the environment source.
const ENV_ORDINAL: i32 = 300;

/// Environment variable configuration source.
///
/// Reads the live process environment. A key that is not found as written is retried
/// with every non-alphanumeric character replaced by `_`, then with that form
/// upper-cased, so `server.port` also matches `server_port` and `SERVER_PORT`.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::sources::{ConfigSource, EnvConfigSource};
///
/// let source = EnvConfigSource::new();
/// assert_eq!(source.name(), "EnvConfigSource");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvConfigSource;

impl EnvConfigSource {
    /// Create a new environment variable source.
    pub fn new() -> Self {
        Self
    }

    fn sanitize(key: &str) -> String {
        key.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    }
}

impl ConfigSource for EnvConfigSource {
    fn properties(&self) -> HashMap<String, String> {
        // Variables that are not valid unicode cannot be represented as properties.
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn value(&self, key: &str) -> Option<String> {
        if let Ok(value) = env::var(key) {
            return Some(value);
        }

        let sanitized = Self::sanitize(key);
        if let Ok(value) = env::var(&sanitized) {
            return Some(value);
        }

        env::var(sanitized.to_ascii_uppercase()).ok()
    }

    fn name(&self) -> String {
        "EnvConfigSource".to_string()
    }

    fn ordinal(&self) -> i32 {
        ordinal_or(self, ENV_ORDINAL)
    }
}
