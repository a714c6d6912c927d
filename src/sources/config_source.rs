//! Configuration source and source provider traits.

use crate::context::LoadContext;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;

/// Property a source may define to override its own ordinal.
pub const CONFIG_ORDINAL: &str = "config_ordinal";

/// Ordinal of a source that neither overrides [`ordinal`](ConfigSource::ordinal) nor
/// defines [`CONFIG_ORDINAL`].
pub const DEFAULT_ORDINAL: i32 = 100;

/// Trait for configuration sources.
///
/// A source is a named set of string properties with an ordinal. When several sources
/// define the same key, the one with the highest ordinal wins.
///
/// Implement this trait to plug custom origins (remote stores, databases, command-line
/// arguments) into a [`ConfigBuilder`](crate::core::ConfigBuilder).
pub trait ConfigSource: Send + Sync {
    /// All properties currently defined by this source.
    fn properties(&self) -> HashMap<String, String>;

    /// Look up a single property.
    fn value(&self, key: &str) -> Option<String> {
        self.properties().remove(key)
    }

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the ordinal of this source (higher = takes precedence).
    ///
    /// Defaults to the source's own `config_ordinal` property, or [`DEFAULT_ORDINAL`].
    ///
    /// Default ordinals of the bundled sources:
    /// - System properties: 400
    /// - Environment variables: 300
    /// - Properties and structured files: 100
    fn ordinal(&self) -> i32 {
        ordinal_or(self, DEFAULT_ORDINAL)
    }
}

/// Produces configuration sources when asked, typically one per matching resource.
pub trait ConfigSourceProvider: Send + Sync {
    /// Produce the sources visible through `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if a resource exists but cannot be read or parsed.
    fn config_sources(&self, context: &LoadContext) -> Result<Vec<Arc<dyn ConfigSource>>>;
}

/// Resolve a source's ordinal from its `config_ordinal` property, falling back to `default`.
pub(crate) fn ordinal_or<S: ConfigSource + ?Sized>(source: &S, default: i32) -> i32 {
    match source.value(CONFIG_ORDINAL) {
        Some(raw) => match raw.trim().parse() {
            Ok(ordinal) => ordinal,
            Err(_) => {
                tracing::warn!(
                    source = %source.name(),
                    value = %raw,
                    "ignoring non-integer {}", CONFIG_ORDINAL
                );
                default
            }
        },
        None => default,
    }
}
