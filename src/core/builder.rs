//! Builder for constructing Config instances.

use super::converter_registry::ConverterRegistry;
use super::source_registry::{self, SourceRegistry};
use crate::context::LoadContext;
use crate::converter::{Converter, DynConverter, TargetType, TypedConverter};
use crate::core::Config;
use crate::discovery::{Discovery, InventoryDiscovery};
use crate::error::Result;
use crate::sources::ConfigSource;
use std::cmp::Reverse;
use std::sync::Arc;

/// Builder for constructing a [`Config`] snapshot.
///
/// Collects explicit sources and converters, and optionally the default sources and
/// whatever the [`Discovery`] strategy finds. [`build`](Self::build) merges everything,
/// orders the sources by descending ordinal and keeps one converter per type.
///
/// The builder is a single-threaded staging object; the `Config` it produces is
/// immutable and freely shared.
///
/// # Examples
///
/// ```rust,no_run
/// use ordinal_config::prelude::*;
///
/// # fn example() -> Result<()> {
/// let config = Config::builder()
///     .add_default_sources()
///     .add_discovered_sources()
///     .add_discovered_converters()
///     .with_converter::<u16, _>(100, FromStrConverter::<u16>::new())
///     .build()?;
///
/// let port: u16 = config.value("server.port")?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigBuilder {
    sources: SourceRegistry,
    converters: ConverterRegistry,
    context: LoadContext,
    discovery: Arc<dyn Discovery>,
    add_default_sources: bool,
    add_discovered_sources: bool,
    add_discovered_converters: bool,
}

impl ConfigBuilder {
    /// Create a new builder with default settings.
    ///
    /// Uses the ambient [`LoadContext`] and [`InventoryDiscovery`]; nothing beyond the
    /// explicitly added sources and converters is included until the corresponding
    /// flag is set.
    pub fn new() -> Self {
        Self {
            sources: SourceRegistry::new(),
            converters: ConverterRegistry::new(),
            context: LoadContext::ambient(),
            discovery: Arc::new(InventoryDiscovery),
            add_default_sources: false,
            add_discovered_sources: false,
            add_discovered_converters: false,
        }
    }

    /// Include discovered sources and the sources of discovered providers.
    pub fn add_discovered_sources(mut self) -> Self {
        self.add_discovered_sources = true;
        self
    }

    /// Include discovered converters.
    pub fn add_discovered_converters(mut self) -> Self {
        self.add_discovered_converters = true;
        self
    }

    /// Include the environment, the system properties, and every
    /// `META-INF/microprofile-config.properties` and
    /// `WEB-INF/classes/META-INF/microprofile-config.properties` resource in the context.
    pub fn add_default_sources(mut self) -> Self {
        self.add_default_sources = true;
        self
    }

    /// Resolve resources and discovered providers against `context`.
    pub fn for_context(mut self, context: LoadContext) -> Self {
        self.context = context;
        self
    }

    /// Use `discovery` instead of [`InventoryDiscovery`].
    pub fn with_discovery<D: Discovery + 'static>(mut self, discovery: D) -> Self {
        self.discovery = Arc::new(discovery);
        self
    }

    /// Append sources in the given order.
    ///
    /// Sources are not deduplicated; adding the same source twice is allowed.
    pub fn with_sources<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn ConfigSource>>,
    {
        self.sources.extend(sources);
        self
    }

    /// Append a single source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordinal_config::prelude::*;
    /// use ordinal_config::sources::MapConfigSource;
    ///
    /// let builder = Config::builder()
    ///     .with_source(MapConfigSource::new("custom").with_ordinal(150));
    /// ```
    pub fn with_source<S: ConfigSource + 'static>(self, source: S) -> Self {
        self.with_sources([Arc::new(source) as Arc<dyn ConfigSource>])
    }

    /// Register converters, reading each one's target type and priority from itself.
    ///
    /// A converter replaces the one already registered for its type only when its
    /// priority is strictly greater.
    ///
    /// # Errors
    ///
    /// Returns an error, and registers none of `converters`, if any converter's target
    /// type cannot be determined or is declared with other than one type argument.
    /// The builder is consumed either way; on error it is dropped along with every
    /// source and converter added so far, so start a new builder to recover.
    pub fn with_converters<I>(mut self, converters: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<dyn DynConverter>>,
    {
        self.converters.register_inferred(converters)?;
        Ok(self)
    }

    /// Register a converter for `T` with an explicit priority.
    ///
    /// The converter's own declaration and priority marker are not consulted.
    pub fn with_converter<T, C>(mut self, priority: i32, converter: C) -> Self
    where
        T: Send + Sync + 'static,
        C: Converter<T> + 'static,
    {
        self.converters.register(
            TargetType::of::<T>(),
            priority,
            Arc::new(TypedConverter::new(converter)),
        );
        self
    }

    /// Build the configuration snapshot.
    ///
    /// Discovery runs on every call. The builder itself is left unchanged, so building
    /// twice yields two independent snapshots without accumulating discovered sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A discovered provider fails to produce its sources
    /// - A bundled properties resource cannot be read or parsed
    /// - A discovered converter's target type cannot be determined
    pub fn build(&self) -> Result<Config> {
        let mut sources = self.sources.explicit().to_vec();

        if self.add_discovered_sources {
            sources.extend(source_registry::discover_sources(
                self.discovery.as_ref(),
                &self.context,
            )?);
        }
        if self.add_default_sources {
            sources.extend(source_registry::default_sources(&self.context)?);
        }

        let mut converters = self.converters.clone();
        if self.add_discovered_converters {
            let discovered = self.discovery.converters(&self.context);
            tracing::debug!(count = discovered.len(), "discovered converters");
            converters.register_inferred(discovered)?;
        }

        let sources = sort_by_ordinal(sources);

        tracing::debug!(
            sources = sources.len(),
            converters = converters.len(),
            "built configuration"
        );

        Ok(Config::new(sources, converters.finish()))
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new builder for constructing a configuration snapshot.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Stable sort by descending ordinal, reading each ordinal once.
fn sort_by_ordinal(sources: Vec<Arc<dyn ConfigSource>>) -> Vec<Arc<dyn ConfigSource>> {
    let mut ranked: Vec<_> = sources
        .into_iter()
        .map(|source| (source.ordinal(), source))
        .collect();
    ranked.sort_by_key(|(ordinal, _)| Reverse(*ordinal));
    ranked.into_iter().map(|(_, source)| source).collect()
}
