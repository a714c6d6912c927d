//! In-memory discovery registry.

use super::Discovery;
use crate::context::LoadContext;
use crate::converter::DynConverter;
use crate::sources::{ConfigSource, ConfigSourceProvider};
use std::sync::Arc;

/// A discovery strategy answering from explicitly registered instances.
///
/// Useful for hosts that assemble their plugin set at runtime, and for exercising a
/// builder against zero, one, or many registered implementations.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::discovery::StaticDiscovery;
/// use ordinal_config::sources::MapConfigSource;
/// use ordinal_config::core::Config;
///
/// let discovery = StaticDiscovery::new()
///     .with_source(MapConfigSource::new("plugin").with_property("feature.x", "on"));
///
/// let config = Config::builder()
///     .with_discovery(discovery)
///     .add_discovered_sources()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.raw_value("feature.x").as_deref(), Some("on"));
/// ```
#[derive(Clone, Default)]
pub struct StaticDiscovery {
    sources: Vec<Arc<dyn ConfigSource>>,
    providers: Vec<Arc<dyn ConfigSourceProvider>>,
    converters: Vec<Arc<dyn DynConverter>>,
}

impl StaticDiscovery {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source.
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Register a source provider.
    pub fn with_provider<P: ConfigSourceProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Register a converter.
    pub fn with_converter<C: DynConverter + 'static>(mut self, converter: C) -> Self {
        self.converters.push(Arc::new(converter));
        self
    }
}

impl Discovery for StaticDiscovery {
    fn config_sources(&self, _context: &LoadContext) -> Vec<Arc<dyn ConfigSource>> {
        self.sources.clone()
    }

    fn config_source_providers(&self, _context: &LoadContext) -> Vec<Arc<dyn ConfigSourceProvider>> {
        self.providers.clone()
    }

    fn converters(&self, _context: &LoadContext) -> Vec<Arc<dyn DynConverter>> {
        self.converters.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{FromStrConverter, TypedConverter};
    use crate::sources::{MapConfigSource, PropertiesConfigSourceProvider};

    #[test]
    fn test_empty_registry() {
        let discovery = StaticDiscovery::new();
        let context = LoadContext::new();
        assert!(discovery.config_sources(&context).is_empty());
        assert!(discovery.config_source_providers(&context).is_empty());
        assert!(discovery.converters(&context).is_empty());
    }

    #[test]
    fn test_registered_instances_returned() {
        let discovery = StaticDiscovery::new()
            .with_source(MapConfigSource::new("a"))
            .with_source(MapConfigSource::new("b"))
            .with_provider(PropertiesConfigSourceProvider::new("x.properties", true))
            .with_converter(TypedConverter::new(FromStrConverter::<u32>::new()));

        let context = LoadContext::new();
        assert_eq!(discovery.config_sources(&context).len(), 2);
        assert_eq!(discovery.config_source_providers(&context).len(), 1);
        assert_eq!(discovery.converters(&context).len(), 1);
    }
}
