//! Converter priority resolution.

use crate::converter::DynConverter;

/// Priority of a converter that carries no priority marker.
pub const DEFAULT_PRIORITY: i32 = 100;

/// The priority a converter competes with when registered without an explicit one.
pub(crate) fn priority_of(converter: &dyn DynConverter) -> i32 {
    converter.priority().unwrap_or(DEFAULT_PRIORITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::{AnyValue, RawConverter};

    fn raw() -> RawConverter {
        RawConverter::new("raw", |v| Ok(Box::new(v.to_string()) as AnyValue))
    }

    #[test]
    fn test_default_priority() {
        assert_eq!(priority_of(&raw()), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_marker_priority() {
        assert_eq!(priority_of(&raw().with_priority(200)), 200);
        assert_eq!(priority_of(&raw().with_priority(-5)), -5);
    }
}
