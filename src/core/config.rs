//! The immutable configuration snapshot.

use crate::converter::{DynConverter, TargetType};
use crate::error::{ConfigError, Result};
use crate::sources::ConfigSource;
use config::{Map, Value, ValueKind};
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

/// An immutable view over ordered sources and per-type converters.
///
/// Produced by [`ConfigBuilder::build`](super::ConfigBuilder::build). Sources are held in
/// descending ordinal order, so the first source defining a key provides its value.
/// Cloning is cheap and clones share the same sources and converters, so a `Config` can
/// be handed to any number of threads.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::prelude::*;
/// use ordinal_config::sources::MapConfigSource;
///
/// let config = Config::builder()
///     .with_source(MapConfigSource::new("defaults").with_property("port", "8080"))
///     .with_source(
///         MapConfigSource::new("overrides")
///             .with_ordinal(200)
///             .with_property("port", "9090"),
///     )
///     .with_converter::<u16, _>(100, FromStrConverter::<u16>::new())
///     .build()?;
///
/// assert_eq!(config.value::<u16>("port")?, 9090);
/// # Ok::<(), ConfigError>(())
/// ```
#[derive(Clone)]
pub struct Config {
    sources: Arc<[Arc<dyn ConfigSource>]>,
    converters: Arc<HashMap<TargetType, Arc<dyn DynConverter>>>,
}

impl Config {
    pub(crate) fn new(
        sources: Vec<Arc<dyn ConfigSource>>,
        converters: HashMap<TargetType, Arc<dyn DynConverter>>,
    ) -> Self {
        Self {
            sources: sources.into(),
            converters: Arc::new(converters),
        }
    }

    /// The sources, highest ordinal first.
    pub fn sources(&self) -> &[Arc<dyn ConfigSource>] {
        &self.sources
    }

    /// The converter registered for `target`.
    pub fn converter(&self, target: TargetType) -> Option<&Arc<dyn DynConverter>> {
        self.converters.get(&target)
    }

    /// The converter registered for `T`.
    pub fn converter_for<T: 'static>(&self) -> Option<&Arc<dyn DynConverter>> {
        self.converter(TargetType::of::<T>())
    }

    /// Every type a converter is registered for.
    pub fn converter_types(&self) -> impl Iterator<Item = TargetType> + '_ {
        self.converters.keys().copied()
    }

    /// The raw value of `key` from the highest-ordinal source that defines it.
    pub fn raw_value(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.value(key))
    }

    /// The value of `key` converted to `T`.
    ///
    /// Uses the converter registered for `T`; a `String` without a registered converter
    /// is the raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No source defines `key`
    /// - No converter is registered for `T`
    /// - The converter rejects the value
    pub fn value<T: 'static>(&self, key: &str) -> Result<T> {
        self.optional_value(key)?
            .ok_or_else(|| ConfigError::NoSuchProperty(key.to_string()))
    }

    /// Like [`value`](Self::value), but a missing property is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if no converter is registered for `T` or the converter rejects
    /// the value.
    pub fn optional_value<T: 'static>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.raw_value(key) else {
            return Ok(None);
        };

        let converted: Box<dyn Any> = match self.converter_for::<T>() {
            Some(converter) => converter.convert_any(&raw).map_err(|e| e.for_key(key))?,
            None if TargetType::of::<T>().is::<String>() => Box::new(raw),
            None => return Err(ConfigError::MissingConverter(std::any::type_name::<T>())),
        };

        converted.downcast::<T>().map(|value| Some(*value)).map_err(|_| {
            ConfigError::ConversionError {
                key: key.to_string(),
                reason: format!(
                    "converter registered for {} produced a different type",
                    std::any::type_name::<T>()
                ),
            }
        })
    }

    /// Every key defined by any source.
    pub fn property_names(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|source| source.properties().into_keys())
            .collect()
    }

    /// Deserialize the merged properties into `T`.
    ///
    /// Sources are applied lowest ordinal first, so higher-ordinal sources override.
    /// Dotted keys become nested structures (`server.port` fills `server: { port }`).
    /// Keys keep their case. Keys with an empty segment (`a..b`, `.a`, `a.`) cannot be
    /// placed in the tree and are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        let mut root = Map::new();

        for source in self.sources.iter().rev() {
            for (key, value) in source.properties() {
                let segments: Vec<&str> = key.split('.').collect();
                if segments.iter().any(|segment| segment.is_empty()) {
                    tracing::debug!(source = %source.name(), key = %key, "skipping unbindable key");
                    continue;
                }
                insert_path(&mut root, &segments, value);
            }
        }

        Value::new(None, ValueKind::Table(root))
            .try_deserialize::<T>()
            .map_err(|e| {
                ConfigError::DeserializationError(format!(
                    "Failed to deserialize configuration: {}",
                    e
                ))
            })
    }
}

/// Place `value` at `segments`, replacing whatever non-table value is in the way.
fn insert_path(table: &mut Map<String, Value>, segments: &[&str], value: String) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = table;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::new(None, ValueKind::Table(Map::new())));
        if !matches!(entry.kind, ValueKind::Table(_)) {
            entry.kind = ValueKind::Table(Map::new());
        }
        current = match &mut entry.kind {
            ValueKind::Table(child) => child,
            _ => return,
        };
    }

    current.insert(last.to_string(), Value::new(None, ValueKind::String(value)));
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "sources",
                &self
                    .sources
                    .iter()
                    .map(|s| (s.name(), s.ordinal()))
                    .collect::<Vec<_>>(),
            )
            .field("converters", &self.converters.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{AnyValue, BoolConverter, FromStrConverter, RawConverter, TypedConverter};
    use crate::sources::MapConfigSource;
    use serde::Deserialize;

    fn config() -> Config {
        let high: Arc<dyn ConfigSource> = Arc::new(
            MapConfigSource::new("high")
                .with_ordinal(200)
                .with_property("server.port", "9090")
                .with_property("debug", "yes"),
        );
        let low: Arc<dyn ConfigSource> = Arc::new(
            MapConfigSource::new("low")
                .with_property("server.port", "8080")
                .with_property("server.host", "localhost")
                .with_property("name", "svc"),
        );

        let mut converters: HashMap<TargetType, Arc<dyn DynConverter>> = HashMap::new();
        converters.insert(
            TargetType::of::<u16>(),
            Arc::new(TypedConverter::new(FromStrConverter::<u16>::new())),
        );
        converters.insert(TargetType::of::<bool>(), Arc::new(TypedConverter::new(BoolConverter)));

        Config::new(vec![high, low], converters)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct ServerConfig {
        port: u16,
        host: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct AppConfig {
        server: ServerConfig,
        name: String,
    }

    #[test]
    fn test_raw_value_first_source_wins() {
        let config = config();
        assert_eq!(config.raw_value("server.port").as_deref(), Some("9090"));
        assert_eq!(config.raw_value("server.host").as_deref(), Some("localhost"));
        assert_eq!(config.raw_value("missing"), None);
    }

    #[test]
    fn test_typed_values() {
        let config = config();
        assert_eq!(config.value::<u16>("server.port").unwrap(), 9090);
        assert!(config.value::<bool>("debug").unwrap());
        assert_eq!(config.value::<String>("name").unwrap(), "svc");
    }

    #[test]
    fn test_missing_property() {
        let config = config();
        assert!(matches!(
            config.value::<u16>("nope"),
            Err(ConfigError::NoSuchProperty(_))
        ));
        assert_eq!(config.optional_value::<u16>("nope").unwrap(), None);
    }

    #[test]
    fn test_missing_converter() {
        let config = config();
        assert!(matches!(
            config.value::<f64>("server.port"),
            Err(ConfigError::MissingConverter(_))
        ));
    }

    #[test]
    fn test_conversion_error_names_key() {
        let config = config();
        let err = config.value::<u16>("server.host").unwrap_err();
        assert!(matches!(err, ConfigError::ConversionError { ref key, .. } if key == "server.host"));
    }

    #[test]
    fn test_mismatched_converter_output() {
        let mut converters: HashMap<TargetType, Arc<dyn DynConverter>> = HashMap::new();
        converters.insert(
            TargetType::of::<i64>(),
            Arc::new(RawConverter::new("liar", |v| Ok(Box::new(v.to_string()) as AnyValue))),
        );
        let source: Arc<dyn ConfigSource> = Arc::new(MapConfigSource::new("m").with_property("n", "1"));
        let config = Config::new(vec![source], converters);

        assert!(matches!(
            config.value::<i64>("n"),
            Err(ConfigError::ConversionError { .. })
        ));
    }

    #[test]
    fn test_property_names() {
        let names = config().property_names();
        let expected: BTreeSet<String> = ["debug", "name", "server.host", "server.port"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_bind_respects_ordinals() {
        let app: AppConfig = config().bind().unwrap();
        assert_eq!(
            app,
            AppConfig {
                server: ServerConfig {
                    port: 9090,
                    host: "localhost".into(),
                },
                name: "svc".into(),
            }
        );
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NamedConfig {
        name: String,
    }

    #[allow(non_snake_case)]
    #[derive(Debug, Deserialize, PartialEq)]
    struct CasedConfig {
        serverPort: u16,
        APP_MODE: String,
    }

    fn single_source(source: MapConfigSource) -> Config {
        Config::new(vec![Arc::new(source) as Arc<dyn ConfigSource>], HashMap::new())
    }

    #[test]
    fn test_bind_ignores_keys_that_are_not_paths() {
        let config = single_source(
            MapConfigSource::new("m")
                .with_property("BASH_FUNC_foo%%", "() {  echo hi\n}")
                .with_property("odd key (x)", "1")
                .with_property("a..b", "2")
                .with_property("name", "svc"),
        );

        let bound: NamedConfig = config.bind().unwrap();
        assert_eq!(bound.name, "svc");
    }

    #[test]
    fn test_bind_preserves_key_case() {
        let config = single_source(
            MapConfigSource::new("m")
                .with_property("serverPort", "1")
                .with_property("APP_MODE", "prod"),
        );

        let bound: CasedConfig = config.bind().unwrap();
        assert_eq!(bound.serverPort, 1);
        assert_eq!(bound.APP_MODE, "prod");
    }

    #[test]
    fn test_bind_higher_ordinal_replaces_scalar_with_table() {
        let high: Arc<dyn ConfigSource> = Arc::new(
            MapConfigSource::new("high")
                .with_ordinal(200)
                .with_property("server.port", "9090")
                .with_property("server.host", "h"),
        );
        let low: Arc<dyn ConfigSource> =
            Arc::new(MapConfigSource::new("low").with_property("server", "flat"));
        let config = Config::new(vec![high, low], HashMap::new());

        #[derive(Debug, Deserialize)]
        struct Wrapper {
            server: ServerConfig,
        }
        let bound: Wrapper = config.bind().unwrap();
        assert_eq!(bound.server.port, 9090);
    }

    #[test]
    fn test_clone_shares_state() {
        let config = config();
        let clone = config.clone();
        assert!(Arc::ptr_eq(&config.sources[0], &clone.sources[0]));
        assert_eq!(clone.converter_types().count(), 2);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Config>();
    }
}
