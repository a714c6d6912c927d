//! Process-wide system properties and the source exposing them.
//!
//! System properties are string settings owned by the running process, typically set
//! from `main` or by an embedding host before configuration is built. They outrank
//! every other bundled source.

use super::{ConfigSource, ordinal_or};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default ordinal of the system property source.
const SYSTEM_ORDINAL: i32 = 400;

static PROPERTIES: LazyLock<RwLock<HashMap<String, String>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Set a system property, returning the previous value.
pub fn set_property(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    PROPERTIES.write().insert(key.into(), value.into())
}

/// Get a system property.
pub fn property(key: &str) -> Option<String> {
    PROPERTIES.read().get(key).cloned()
}

/// Remove a system property, returning its value.
pub fn remove_property(key: &str) -> Option<String> {
    PROPERTIES.write().remove(key)
}

/// Snapshot of all system properties.
pub fn properties() -> HashMap<String, String> {
    PROPERTIES.read().clone()
}

/// Configuration source backed by the process-wide system properties.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::sources::{system, ConfigSource, SystemPropertySource};
///
/// system::set_property("doc.example.greeting", "hello");
/// let source = SystemPropertySource::new();
/// assert_eq!(source.value("doc.example.greeting").as_deref(), Some("hello"));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPropertySource;

impl SystemPropertySource {
    /// Create a new system property source.
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for SystemPropertySource {
    fn properties(&self) -> HashMap<String, String> {
        properties()
    }

    fn value(&self, key: &str) -> Option<String> {
        property(key)
    }

    fn name(&self) -> String {
        "SysPropConfigSource".to_string()
    }

    fn ordinal(&self) -> i32 {
        ordinal_or(self, SYSTEM_ORDINAL)
    }
}
