//! Type-erased converters.

use super::{Converter, TargetType};
use crate::error::Result;
use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

/// A converted value whose concrete type is only known through a [`TargetType`].
pub type AnyValue = Box<dyn Any + Send + Sync>;

/// Function type backing a [`RawConverter`].
type RawConvertFn = Arc<dyn Fn(&str) -> Result<AnyValue> + Send + Sync>;

/// A converter with its concrete value type erased.
///
/// Besides converting, a `DynConverter` describes its own lineage: the type arguments of
/// the `Converter` capability it declares itself, and the converter it extends when it
/// declares nothing at its own level. The builder walks this lineage to find the target
/// type of converters registered without an explicit type.
pub trait DynConverter: Send + Sync {
    /// Human-readable name used in diagnostics.
    fn name(&self) -> String;

    /// Type arguments of the `Converter` capability declared at this level.
    ///
    /// `None` means this converter does not declare the capability itself.
    fn declared_type_arguments(&self) -> Option<Vec<TargetType>>;

    /// The converter this one extends.
    fn parent(&self) -> Option<&dyn DynConverter> {
        None
    }

    /// Priority marker carried by this converter, if any.
    fn priority(&self) -> Option<i32> {
        None
    }

    /// Convert a raw value into a boxed value of the target type.
    ///
    /// # Errors
    ///
    /// Returns a conversion error when the value is rejected.
    fn convert_any(&self, value: &str) -> Result<AnyValue>;
}

/// Adapts a [`Converter<T>`] into a [`DynConverter`] declaring exactly `T`.
///
/// # Examples
///
/// ```rust
/// use ordinal_config::converter::{DynConverter, TargetType, TypedConverter};
/// use ordinal_config::error::Result;
///
/// let converter = TypedConverter::new(|raw: &str| -> Result<usize> { Ok(raw.len()) })
///     .with_priority(200);
///
/// assert_eq!(
///     converter.declared_type_arguments(),
///     Some(vec![TargetType::of::<usize>()])
/// );
/// assert_eq!(converter.priority(), Some(200));
/// ```
pub struct TypedConverter<T, C> {
    converter: C,
    name: String,
    priority: Option<i32>,
    _target: PhantomData<fn() -> T>,
}

impl<T, C> TypedConverter<T, C>
where
    T: Send + Sync + 'static,
    C: Converter<T> + 'static,
{
    /// Wrap `converter`; it carries no priority marker.
    pub fn new(converter: C) -> Self {
        Self {
            converter,
            name: std::any::type_name::<C>().to_string(),
            priority: None,
            _target: PhantomData,
        }
    }

    /// Set the priority marker.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replace the diagnostic name (defaults to the converter's type name).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Convert with the wrapped converter, keeping the concrete type.
    pub fn convert(&self, value: &str) -> Result<T> {
        self.converter.convert(value)
    }
}

impl<T, C> DynConverter for TypedConverter<T, C>
where
    T: Send + Sync + 'static,
    C: Converter<T> + 'static,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn declared_type_arguments(&self) -> Option<Vec<TargetType>> {
        Some(vec![TargetType::of::<T>()])
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn convert_any(&self, value: &str) -> Result<AnyValue> {
        Ok(Box::new(self.converter.convert(value)?))
    }
}

/// A converter that extends another one without declaring the capability itself.
///
/// Conversion delegates to the parent. The priority marker is the derived converter's
/// own; the parent's marker is not inherited.
pub struct DerivedConverter {
    name: String,
    base: Arc<dyn DynConverter>,
    priority: Option<i32>,
}

impl DerivedConverter {
    /// Extend `base` under a new name.
    pub fn new(name: impl Into<String>, base: Arc<dyn DynConverter>) -> Self {
        Self {
            name: name.into(),
            base,
            priority: None,
        }
    }

    /// Set the priority marker.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl DynConverter for DerivedConverter {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn declared_type_arguments(&self) -> Option<Vec<TargetType>> {
        None
    }

    fn parent(&self) -> Option<&dyn DynConverter> {
        Some(self.base.as_ref())
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn convert_any(&self, value: &str) -> Result<AnyValue> {
        self.base.convert_any(value)
    }
}

/// A closure-backed converter whose declaration is supplied at runtime.
///
/// Without [`declaring`](Self::declaring) it declares nothing and cannot be registered
/// without an explicit type.
pub struct RawConverter {
    name: String,
    declared: Option<Vec<TargetType>>,
    priority: Option<i32>,
    convert: RawConvertFn,
}

impl RawConverter {
    /// Create a converter from a closure producing boxed values.
    pub fn new<F>(name: impl Into<String>, convert: F) -> Self
    where
        F: Fn(&str) -> Result<AnyValue> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            declared: None,
            priority: None,
            convert: Arc::new(convert),
        }
    }

    /// Declare the type arguments of the `Converter` capability at this level.
    pub fn declaring(mut self, arguments: Vec<TargetType>) -> Self {
        self.declared = Some(arguments);
        self
    }

    /// Set the priority marker.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }
}

impl DynConverter for RawConverter {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn declared_type_arguments(&self) -> Option<Vec<TargetType>> {
        self.declared.clone()
    }

    fn priority(&self) -> Option<i32> {
        self.priority
    }

    fn convert_any(&self, value: &str) -> Result<AnyValue> {
        (self.convert)(value)
    }
}
