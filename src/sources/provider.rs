//! Provider of properties-file sources found through the resolution context.

use super::{ConfigSource, ConfigSourceProvider, PropertiesConfigSource};
use crate::context::LoadContext;
use crate::error::{ConfigError, Result};
use std::sync::Arc;

/// Produces one [`PropertiesConfigSource`] per root that holds a given resource.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::context::LoadContext;
/// use ordinal_config::sources::{ConfigSourceProvider, PropertiesConfigSourceProvider};
///
/// let provider = PropertiesConfigSourceProvider::new("META-INF/microprofile-config.properties", true);
/// let sources = provider.config_sources(&LoadContext::new()).unwrap();
/// assert!(sources.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesConfigSourceProvider {
    resource: String,
    optional: bool,
}

impl PropertiesConfigSourceProvider {
    /// Create a provider for `resource`.
    ///
    /// When `optional` is false, a resource found under no root is an error.
    pub fn new(resource: impl Into<String>, optional: bool) -> Self {
        Self {
            resource: resource.into(),
            optional,
        }
    }

    /// The resource name looked up under each root.
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl ConfigSourceProvider for PropertiesConfigSourceProvider {
    fn config_sources(&self, context: &LoadContext) -> Result<Vec<Arc<dyn ConfigSource>>> {
        let found = context.resolve(&self.resource);
        if found.is_empty() && !self.optional {
            return Err(ConfigError::LoadError(format!(
                "Required resource not found: {}",
                self.resource
            )));
        }

        found
            .into_iter()
            .map(|path| {
                PropertiesConfigSource::from_path(path)
                    .map(|source| Arc::new(source) as Arc<dyn ConfigSource>)
            })
            .collect()
    }
}
