//! Ready-made converters for common value types.

use super::Converter;
use crate::error::{ConfigError, Result};
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

/// Converts through the target type's [`FromStr`] implementation.
///
/// Surrounding whitespace is trimmed before parsing.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::converter::{Converter, FromStrConverter};
///
/// let converter = FromStrConverter::<u64>::new();
/// assert_eq!(converter.convert(" 30 ").unwrap(), 30);
/// assert!(converter.convert("thirty").is_err());
/// ```
pub struct FromStrConverter<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> FromStrConverter<T> {
    /// Create a converter for `T`.
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for FromStrConverter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Converter<T> for FromStrConverter<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn convert(&self, value: &str) -> Result<T> {
        value.trim().parse::<T>().map_err(|e| {
            ConfigError::conversion(format!(
                "'{}' is not a valid {}: {}",
                value,
                std::any::type_name::<T>(),
                e
            ))
        })
    }
}

/// Lenient boolean converter.
///
/// `true`, `1`, `yes`, `y` and `on` (any case) are `true`; every other value is `false`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolConverter;

impl Converter<bool> for BoolConverter {
    fn convert(&self, value: &str) -> Result<bool> {
        let value = value.trim().to_ascii_lowercase();
        Ok(matches!(value.as_str(), "true" | "1" | "yes" | "y" | "on"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_trims() {
        let converter = FromStrConverter::<i32>::new();
        assert_eq!(converter.convert(" -12 ").unwrap(), -12);
    }

    #[test]
    fn test_from_str_error_names_type() {
        let err = FromStrConverter::<u8>::new().convert("300").unwrap_err();
        assert!(err.to_string().contains("u8"));
    }

    #[test]
    fn test_bool_truthy_values() {
        for raw in ["true", "TRUE", "1", "yes", "Y", "On"] {
            assert!(BoolConverter.convert(raw).unwrap(), "{raw} should be true");
        }
    }

    #[test]
    fn test_bool_everything_else_false() {
        for raw in ["false", "0", "no", "", "enabled"] {
            assert!(!BoolConverter.convert(raw).unwrap(), "{raw} should be false");
        }
    }
}
