//! Per-type converter registry with priority-based replacement.

use super::priority::priority_of;
use crate::converter::{DynConverter, TargetType};
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
struct ConverterWithPriority {
    converter: Arc<dyn DynConverter>,
    priority: i32,
}

/// Holds at most one converter per target type.
///
/// A newcomer replaces the incumbent only when its priority is strictly greater, so
/// among equal priorities the first registered converter stays.
#[derive(Clone, Default)]
pub(crate) struct ConverterRegistry {
    converters: HashMap<TargetType, ConverterWithPriority>,
}

impl ConverterRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `converter` for `target` with an explicit priority.
    ///
    /// Returns whether the converter was installed.
    pub(crate) fn register(
        &mut self,
        target: TargetType,
        priority: i32,
        converter: Arc<dyn DynConverter>,
    ) -> bool {
        if let Some(incumbent) = self.converters.get(&target) {
            if priority <= incumbent.priority {
                tracing::debug!(
                    target_type = %target,
                    converter = %converter.name(),
                    priority,
                    incumbent = %incumbent.converter.name(),
                    incumbent_priority = incumbent.priority,
                    "keeping incumbent converter"
                );
                return false;
            }
            tracing::debug!(
                target_type = %target,
                converter = %converter.name(),
                priority,
                replaced = %incumbent.converter.name(),
                "replacing converter"
            );
        }

        self.converters.insert(
            target,
            ConverterWithPriority {
                converter,
                priority,
            },
        );
        true
    }

    /// Register converters whose target type and priority are read from the converters.
    ///
    /// Every target type is resolved before anything is registered, so a failure leaves
    /// the registry untouched.
    pub(crate) fn register_inferred<I>(&mut self, converters: I) -> Result<()>
    where
        I: IntoIterator<Item = Arc<dyn DynConverter>>,
    {
        let resolved = converters
            .into_iter()
            .map(|converter| Ok((resolve_target_type(converter.as_ref())?, converter)))
            .collect::<Result<Vec<_>>>()?;

        for (target, converter) in resolved {
            let priority = priority_of(converter.as_ref());
            self.register(target, priority, converter);
        }
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.converters.len()
    }

    /// Drop the priorities, keeping one converter per type.
    pub(crate) fn finish(&self) -> HashMap<TargetType, Arc<dyn DynConverter>> {
        self.converters
            .iter()
            .map(|(target, entry)| (*target, Arc::clone(&entry.converter)))
            .collect()
    }
}

/// Find the target type a converter declares, walking up the converters it extends.
///
/// # Errors
///
/// - [`ConfigError::MalformedConverterType`] if a declaration has other than one type argument
/// - [`ConfigError::UnresolvedConverterType`] if no level declares the capability
pub(crate) fn resolve_target_type(converter: &dyn DynConverter) -> Result<TargetType> {
    find_declared_type(converter)?.ok_or_else(|| ConfigError::UnresolvedConverterType {
        converter: converter.name(),
    })
}

fn find_declared_type(converter: &dyn DynConverter) -> Result<Option<TargetType>> {
    if let Some(arguments) = converter.declared_type_arguments() {
        return match arguments.as_slice() {
            [target] => Ok(Some(*target)),
            _ => Err(ConfigError::MalformedConverterType {
                converter: converter.name(),
                arguments: arguments.len(),
            }),
        };
    }

    match converter.parent() {
        Some(parent) => find_declared_type(parent),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{AnyValue, DerivedConverter, FromStrConverter, RawConverter, TypedConverter};

    fn int_converter(name: &str) -> Arc<dyn DynConverter> {
        Arc::new(TypedConverter::new(FromStrConverter::<i32>::new()).named(name))
    }

    fn int_converter_with_priority(name: &str, priority: i32) -> Arc<dyn DynConverter> {
        Arc::new(
            TypedConverter::new(FromStrConverter::<i32>::new())
                .named(name)
                .with_priority(priority),
        )
    }

    fn untyped(name: &str) -> RawConverter {
        RawConverter::new(name, |v| Ok(Box::new(v.to_string()) as AnyValue))
    }

    fn registered_name(registry: &ConverterRegistry) -> String {
        registry.finish()[&TargetType::of::<i32>()].name()
    }

    #[test]
    fn test_higher_priority_replaces() {
        let mut registry = ConverterRegistry::new();
        assert!(registry.register(TargetType::of::<i32>(), 100, int_converter("low")));
        assert!(registry.register(TargetType::of::<i32>(), 101, int_converter("high")));
        assert_eq!(registered_name(&registry), "high");
    }

    #[test]
    fn test_lower_priority_rejected() {
        let mut registry = ConverterRegistry::new();
        registry.register(TargetType::of::<i32>(), 200, int_converter("high"));
        assert!(!registry.register(TargetType::of::<i32>(), 100, int_converter("low")));
        assert_eq!(registered_name(&registry), "high");
    }

    #[test]
    fn test_equal_priority_keeps_first() {
        let mut registry = ConverterRegistry::new();
        registry.register(TargetType::of::<i32>(), 100, int_converter("first"));
        assert!(!registry.register(TargetType::of::<i32>(), 100, int_converter("second")));
        assert_eq!(registered_name(&registry), "first");
    }

    #[test]
    fn test_one_entry_per_type() {
        let mut registry = ConverterRegistry::new();
        registry.register(TargetType::of::<i32>(), 100, int_converter("a"));
        registry.register(TargetType::of::<i32>(), 300, int_converter("b"));
        registry.register(
            TargetType::of::<u64>(),
            100,
            Arc::new(TypedConverter::new(FromStrConverter::<u64>::new())),
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.finish().len(), 2);
    }

    #[test]
    fn test_inferred_priority_wins_in_either_order() {
        let mut forward = ConverterRegistry::new();
        forward
            .register_inferred([int_converter_with_priority("marked", 200), int_converter("plain")])
            .unwrap();
        assert_eq!(registered_name(&forward), "marked");

        let mut backward = ConverterRegistry::new();
        backward
            .register_inferred([int_converter("plain"), int_converter_with_priority("marked", 200)])
            .unwrap();
        assert_eq!(registered_name(&backward), "marked");
    }

    #[test]
    fn test_resolve_through_parent_chain() {
        let base: Arc<dyn DynConverter> = int_converter("base");
        let middle: Arc<dyn DynConverter> = Arc::new(DerivedConverter::new("middle", base));
        let leaf = DerivedConverter::new("leaf", middle);

        assert_eq!(resolve_target_type(&leaf).unwrap(), TargetType::of::<i32>());
    }

    #[test]
    fn test_unresolved_type() {
        let err = resolve_target_type(&untyped("raw")).unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedConverterType { converter } if converter == "raw"));
    }

    #[test]
    fn test_unresolved_through_parent() {
        let leaf = DerivedConverter::new("leaf", Arc::new(untyped("root")));
        let err = resolve_target_type(&leaf).unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedConverterType { converter } if converter == "leaf"));
    }

    #[test]
    fn test_malformed_declarations() {
        let none = untyped("none").declaring(vec![]);
        assert!(matches!(
            resolve_target_type(&none),
            Err(ConfigError::MalformedConverterType { arguments: 0, .. })
        ));

        let two = untyped("two").declaring(vec![TargetType::of::<i32>(), TargetType::of::<u8>()]);
        assert!(matches!(
            resolve_target_type(&two),
            Err(ConfigError::MalformedConverterType { arguments: 2, .. })
        ));
    }

    #[test]
    fn test_failed_inference_registers_nothing() {
        let mut registry = ConverterRegistry::new();
        let result = registry.register_inferred([int_converter("ok"), Arc::new(untyped("bad")) as Arc<dyn DynConverter>]);
        assert!(result.is_err());
        assert_eq!(registry.len(), 0);
    }
}
