//! Bounded open-ended property maps.
//!
//! Node properties are free-form, but every map accepted from a client is
//! checked against [`MAX_PROPERTY_KEYS`] and [`MAX_PROPERTY_DEPTH`] before it
//! is stored.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::CoreError;

/// String-keyed map of arbitrary JSON values, in insertion order.
pub type Properties = IndexMap<String, Value>;

/// Maximum number of top-level keys in a property map.
pub const MAX_PROPERTY_KEYS: usize = 256;

/// Maximum nesting depth of a property map or JSON payload.
///
/// A scalar has depth 0, each enclosing array or object adds one level, so a
/// flat property map has depth 1.
pub const MAX_PROPERTY_DEPTH: usize = 16;

/// Nesting depth of a JSON value.
pub fn json_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(json_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(json_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Nesting depth of a property map, counting the map itself.
pub fn properties_depth(properties: &Properties) -> usize {
    1 + properties.values().map(json_depth).max().unwrap_or(0)
}

/// Checks a property map against the key-count and depth limits.
pub fn validate_properties(field: &'static str, properties: &Properties) -> Result<(), CoreError> {
    if properties.len() > MAX_PROPERTY_KEYS {
        return Err(CoreError::PropertiesTooLarge {
            field,
            count: properties.len(),
            max: MAX_PROPERTY_KEYS,
        });
    }
    let depth = properties_depth(properties);
    if depth > MAX_PROPERTY_DEPTH {
        return Err(CoreError::PropertiesTooDeep {
            field,
            depth,
            max: MAX_PROPERTY_DEPTH,
        });
    }
    Ok(())
}

/// Checks an opaque JSON payload against the depth limit.
pub fn validate_payload(field: &'static str, value: &Value) -> Result<(), CoreError> {
    let depth = json_depth(value);
    if depth > MAX_PROPERTY_DEPTH {
        return Err(CoreError::PropertiesTooDeep {
            field,
            depth,
            max: MAX_PROPERTY_DEPTH,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn nested(levels: usize) -> Value {
        let mut value = json!(1);
        for _ in 0..levels {
            value = json!({ "k": value });
        }
        value
    }

    #[test]
    fn depth_of_scalars_and_containers() {
        assert_eq!(json_depth(&json!(null)), 0);
        assert_eq!(json_depth(&json!("x")), 0);
        assert_eq!(json_depth(&json!([])), 1);
        assert_eq!(json_depth(&json!({ "a": [1, { "b": 2 }] })), 3);
    }

    #[test]
    fn empty_map_is_valid() {
        assert!(validate_properties("properties", &Properties::new()).is_ok());
    }

    #[test]
    fn too_many_keys_rejected() {
        let props: Properties = (0..=MAX_PROPERTY_KEYS)
            .map(|i| (format!("k{i}"), json!(i)))
            .collect();
        let err = validate_properties("properties", &props).unwrap_err();
        assert!(matches!(err, CoreError::PropertiesTooLarge { count, .. } if count == MAX_PROPERTY_KEYS + 1));
    }

    #[test]
    fn depth_limit_is_inclusive() {
        let mut props = Properties::new();
        props.insert("deep".into(), nested(MAX_PROPERTY_DEPTH - 1));
        assert!(validate_properties("properties", &props).is_ok());

        props.insert("deeper".into(), nested(MAX_PROPERTY_DEPTH));
        let err = validate_properties("properties", &props).unwrap_err();
        assert_eq!(err.field(), "properties");
        assert!(matches!(err, CoreError::PropertiesTooDeep { .. }));
    }

    #[test]
    fn payload_depth_checked() {
        assert!(validate_payload("data", &nested(MAX_PROPERTY_DEPTH)).is_ok());
        assert!(validate_payload("data", &nested(MAX_PROPERTY_DEPTH + 1)).is_err());
    }

    proptest! {
        #[test]
        fn nesting_adds_exactly_one_level(levels in 0usize..40) {
            prop_assert_eq!(json_depth(&nested(levels)), levels);
        }

        #[test]
        fn flat_maps_within_key_limit_validate(count in 0usize..=MAX_PROPERTY_KEYS) {
            let props: Properties = (0..count).map(|i| (format!("k{i}"), json!(i))).collect();
            prop_assert!(validate_properties("properties", &props).is_ok());
        }
    }
}
