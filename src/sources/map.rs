//! In-memory configuration source.

use super::{ConfigSource, DEFAULT_ORDINAL};
use std::collections::HashMap;

/// Configuration source holding a fixed map of properties.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::sources::{ConfigSource, MapConfigSource};
///
/// let source = MapConfigSource::new("overrides")
///     .with_ordinal(500)
///     .with_property("server.port", "9090");
///
/// assert_eq!(source.ordinal(), 500);
/// assert_eq!(source.value("server.port").as_deref(), Some("9090"));
/// ```
#[derive(Debug, Clone)]
pub struct MapConfigSource {
    name: String,
    ordinal: i32,
    properties: HashMap<String, String>,
}

impl MapConfigSource {
    /// Create an empty source with the default ordinal.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: DEFAULT_ORDINAL,
            properties: HashMap::new(),
        }
    }

    /// Create a source from an existing map.
    pub fn from_map(name: impl Into<String>, properties: HashMap<String, String>) -> Self {
        Self {
            properties,
            ..Self::new(name)
        }
    }

    /// Set the ordinal for this source.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Add a property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MapConfigSource {
    fn properties(&self) -> HashMap<String, String> {
        self.properties.clone()
    }

    fn value(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let source = MapConfigSource::new("empty");
        assert_eq!(source.ordinal(), DEFAULT_ORDINAL);
        assert!(source.properties().is_empty());
        assert_eq!(source.name(), "empty");
    }

    #[test]
    fn test_from_map() {
        let map = HashMap::from([("a".to_string(), "1".to_string())]);
        let source = MapConfigSource::from_map("m", map);
        assert_eq!(source.value("a").as_deref(), Some("1"));
        assert_eq!(source.value("b"), None);
    }

    #[test]
    fn test_explicit_ordinal_wins_over_property() {
        let source = MapConfigSource::new("m")
            .with_ordinal(42)
            .with_property("config_ordinal", "900");
        assert_eq!(source.ordinal(), 42);
    }
}
