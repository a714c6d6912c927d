//! Error types for ordinal-config.

/// Result type alias for ordinal-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while assembling or reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A converter does not declare the `Converter` capability at any level of its lineage.
    #[error("Can not add converter {converter} that is not parameterized with a type")]
    UnresolvedConverterType {
        /// Name of the offending converter
        converter: String,
    },

    /// A converter declares the `Converter` capability with zero or several type arguments.
    #[error("Converter {converter} must be parameterized with a single type (found {arguments})")]
    MalformedConverterType {
        /// Name of the converter level carrying the declaration
        converter: String,
        /// Number of type arguments that were declared
        arguments: usize,
    },

    /// Failed to load configuration from a source or provider.
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    /// Failed to parse a configuration resource.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to deserialize configuration into a typed structure.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// A converter rejected a raw value.
    #[error("Failed to convert property '{key}': {reason}")]
    ConversionError {
        /// The property key, empty when the converter was invoked directly
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// No converter is registered for the requested type.
    #[error("No converter registered for type {0}")]
    MissingConverter(&'static str),

    /// No source defines the requested property.
    #[error("Property '{0}' not found in any configuration source")]
    NoSuchProperty(String),
}

impl ConfigError {
    /// Create a conversion error that is not yet tied to a property key.
    pub fn conversion(reason: impl Into<String>) -> Self {
        Self::ConversionError {
            key: String::new(),
            reason: reason.into(),
        }
    }

    /// Attach the property key to a conversion error; other errors pass through.
    pub(crate) fn for_key(self, key: &str) -> Self {
        match self {
            Self::ConversionError { key: k, reason } if k.is_empty() => Self::ConversionError {
                key: key.to_string(),
                reason,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_key_fills_empty_key() {
        let err = ConfigError::conversion("not a number").for_key("server.port");
        assert_eq!(
            err.to_string(),
            "Failed to convert property 'server.port': not a number"
        );
    }

    #[test]
    fn test_for_key_keeps_other_errors() {
        let err = ConfigError::NoSuchProperty("a".into()).for_key("b");
        assert!(matches!(err, ConfigError::NoSuchProperty(k) if k == "a"));
    }

    #[test]
    fn test_unresolved_message() {
        let err = ConfigError::UnresolvedConverterType {
            converter: "raw".into(),
        };
        assert_eq!(
            err.to_string(),
            "Can not add converter raw that is not parameterized with a type"
        );
    }
}
