//! Explicit, default and discovered configuration sources.

use crate::context::LoadContext;
use crate::discovery::Discovery;
use crate::error::Result;
use crate::sources::{
    ConfigSource, ConfigSourceProvider, EnvConfigSource, PropertiesConfigSourceProvider,
    SystemPropertySource,
};
use std::sync::Arc;

/// Application-level properties resource picked up by the default sources.
pub const META_INF_MICROPROFILE_CONFIG_PROPERTIES: &str = "META-INF/microprofile-config.properties";

/// Web-application-level properties resource picked up by the default sources.
pub const WEB_INF_MICROPROFILE_CONFIG_PROPERTIES: &str =
    "WEB-INF/classes/META-INF/microprofile-config.properties";

/// Explicitly added sources, in insertion order. Not sorted and not deduplicated.
#[derive(Clone, Default)]
pub(crate) struct SourceRegistry {
    explicit: Vec<Arc<dyn ConfigSource>>,
}

impl SourceRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend<I>(&mut self, sources: I)
    where
        I: IntoIterator<Item = Arc<dyn ConfigSource>>,
    {
        self.explicit.extend(sources);
    }

    pub(crate) fn explicit(&self) -> &[Arc<dyn ConfigSource>] {
        &self.explicit
    }
}

/// Environment, system properties, then every bundled properties resource.
pub(crate) fn default_sources(context: &LoadContext) -> Result<Vec<Arc<dyn ConfigSource>>> {
    let mut sources: Vec<Arc<dyn ConfigSource>> = vec![
        Arc::new(EnvConfigSource::new()),
        Arc::new(SystemPropertySource::new()),
    ];

    for resource in [
        META_INF_MICROPROFILE_CONFIG_PROPERTIES,
        WEB_INF_MICROPROFILE_CONFIG_PROPERTIES,
    ] {
        sources.extend(PropertiesConfigSourceProvider::new(resource, true).config_sources(context)?);
    }

    tracing::debug!(count = sources.len(), "assembled default sources");
    Ok(sources)
}

/// Discovered sources followed by the sources of every discovered provider.
pub(crate) fn discover_sources(
    discovery: &dyn Discovery,
    context: &LoadContext,
) -> Result<Vec<Arc<dyn ConfigSource>>> {
    let mut sources = discovery.config_sources(context);
    let direct = sources.len();

    for provider in discovery.config_source_providers(context) {
        sources.extend(provider.config_sources(context)?);
    }

    tracing::debug!(
        direct,
        from_providers = sources.len() - direct,
        "discovered sources"
    );
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::StaticDiscovery;
    use crate::sources::MapConfigSource;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_keeps_order_and_duplicates() {
        let shared: Arc<dyn ConfigSource> = Arc::new(MapConfigSource::new("shared"));
        let mut registry = SourceRegistry::new();
        registry.extend([
            Arc::clone(&shared),
            Arc::new(MapConfigSource::new("other")) as Arc<dyn ConfigSource>,
            Arc::clone(&shared),
        ]);

        let names: Vec<_> = registry.explicit().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["shared", "other", "shared"]);
    }

    #[test]
    fn test_default_sources_without_resources() {
        let sources = default_sources(&LoadContext::new()).unwrap();
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["EnvConfigSource", "SysPropConfigSource"]);
    }

    #[test]
    fn test_default_sources_pick_up_both_resources() {
        let root = TempDir::new().unwrap();
        for resource in [
            META_INF_MICROPROFILE_CONFIG_PROPERTIES,
            WEB_INF_MICROPROFILE_CONFIG_PROPERTIES,
        ] {
            let path = root.path().join(resource);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "k=v").unwrap();
        }

        let sources = default_sources(&LoadContext::new().with_root(root.path())).unwrap();
        assert_eq!(sources.len(), 4);
        assert!(sources[2].name().contains("META-INF"));
        assert!(sources[3].name().contains("WEB-INF"));
    }

    #[test]
    fn test_discover_flattens_providers() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("plugin.properties"), "p=1").unwrap();

        let discovery = StaticDiscovery::new()
            .with_source(MapConfigSource::new("direct"))
            .with_provider(PropertiesConfigSourceProvider::new("plugin.properties", false));
        let context = LoadContext::new().with_root(root.path());

        let sources = discover_sources(&discovery, &context).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name(), "direct");
        assert_eq!(sources[1].value("p").as_deref(), Some("1"));
    }

    #[test]
    fn test_discover_propagates_provider_errors() {
        let discovery = StaticDiscovery::new()
            .with_provider(PropertiesConfigSourceProvider::new("missing.properties", false));
        assert!(discover_sources(&discovery, &LoadContext::new()).is_err());
    }
}
