//! Typed value conversion.
//!
//! A [`Converter<T>`] turns a raw property string into a `T`. Registries and the built
//! [`Config`](crate::core::Config) hold converters type-erased as [`DynConverter`], which
//! also carries what is needed to decide where a converter belongs: the target type it
//! declares (directly or through the converter it extends) and an optional priority marker.

mod builtin;
mod erased;
mod target;

pub use builtin::{BoolConverter, FromStrConverter};
pub use erased::{AnyValue, DerivedConverter, DynConverter, RawConverter, TypedConverter};
pub use target::TargetType;

use crate::error::Result;

/// Converts a raw property value into a typed value.
///
/// Any `Fn(&str) -> Result<T>` closure is a converter.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::converter::Converter;
/// use ordinal_config::error::{ConfigError, Result};
///
/// struct PortConverter;
///
/// impl Converter<u16> for PortConverter {
///     fn convert(&self, value: &str) -> Result<u16> {
///         value
///             .trim()
///             .parse()
///             .map_err(|_| ConfigError::conversion(format!("'{}' is not a port", value)))
///     }
/// }
///
/// assert_eq!(PortConverter.convert("8080").unwrap(), 8080);
/// ```
pub trait Converter<T>: Send + Sync {
    /// Convert `value` into a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConversionError`](crate::error::ConfigError::ConversionError)
    /// if the value cannot be represented as a `T`.
    fn convert(&self, value: &str) -> Result<T>;
}

impl<T, F> Converter<T> for F
where
    F: Fn(&str) -> Result<T> + Send + Sync,
{
    fn convert(&self, value: &str) -> Result<T> {
        self(value)
    }
}
