//! Structured file configuration source.

use super::{ConfigSource, DEFAULT_ORDINAL, ordinal_or};
use crate::error::{ConfigError, Result};
use config::{File, Source, Value, ValueKind};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration source backed by a YAML, TOML, or JSON file.
///
/// The format is detected from the file extension. Nested tables are flattened into
/// dotted keys and arrays are joined with `,`, so
///
/// ```yaml
/// server:
///   port: 8080
///   hosts: [a, b]
/// ```
///
/// yields `server.port = 8080` and `server.hosts = a,b`.
///
/// # Examples
///
/// ```rust,no_run
/// use ordinal_config::sources::FileConfigSource;
///
/// let source = FileConfigSource::from_path("config/default.yaml")?;
/// # Ok::<(), ordinal_config::error::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
    properties: HashMap<String, String>,
}

impl FileConfigSource {
    /// Load the file at `path` with automatic format detection.
    ///
    /// Supported formats: YAML (.yaml, .yml), TOML (.toml), JSON (.json)
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unsupported, the file does not exist, or
    /// the file cannot be parsed.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        validate_extension(&path)?;

        if !path.exists() {
            return Err(ConfigError::LoadError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        // Build a config using the config crate (auto-detects format from extension)
        let loaded = config::Config::builder()
            .add_source(File::from(path.clone()).required(true))
            .build()
            .map_err(|e| ConfigError::LoadError(format!("Failed to load file: {}", e)))?;

        let table = loaded
            .collect()
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse file: {}", e)))?;

        let mut properties = HashMap::new();
        for (key, value) in table {
            flatten(key, value, &mut properties);
        }

        Ok(Self { path, properties })
    }

    /// The file this source was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn properties(&self) -> HashMap<String, String> {
        self.properties.clone()
    }

    fn value(&self, key: &str) -> Option<String> {
        self.properties.get(key).cloned()
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn ordinal(&self) -> i32 {
        ordinal_or(self, DEFAULT_ORDINAL)
    }
}

/// Validate that the file extension is supported.
fn validate_extension(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            ConfigError::LoadError(format!(
                "Unable to determine file format for: {}",
                path.display()
            ))
        })?;

    match extension {
        "yaml" | "yml" | "toml" | "json" => Ok(()),
        _ => Err(ConfigError::LoadError(format!(
            "Unsupported file extension: {}. Supported: .yaml, .yml, .toml, .json",
            extension
        ))),
    }
}

fn flatten(key: String, value: Value, out: &mut HashMap<String, String>) {
    match value.kind {
        ValueKind::Table(table) => {
            for (child, value) in table {
                flatten(format!("{}.{}", key, child), value, out);
            }
        }
        ValueKind::Array(items) => {
            let joined = items
                .into_iter()
                .map(|item| scalar(item.kind))
                .collect::<Vec<_>>()
                .join(",");
            out.insert(key, joined);
        }
        kind => {
            out.insert(key, scalar(kind));
        }
    }
}

fn scalar(kind: ValueKind) -> String {
    match kind {
        ValueKind::Nil => String::new(),
        ValueKind::String(s) => s,
        other => other.to_string(),
    }
}
