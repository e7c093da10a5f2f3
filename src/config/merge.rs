//! Configuration merge logic
//!
//! Field changes are merged one level deep:
//! - Known fields: present values override, absent values are kept
//! - Extra keys: overlay wins per key, values replace wholesale (no recursion)
//! - Null extras: override like any other value

use change_label_node::ChangeLabelConfig;
use serde_json::{Map, Value};

use crate::form::FormValues;

/// Merge two JSON objects one level deep.
///
/// Overlay keys replace base keys entirely, nested objects included.
pub fn shallow_merge(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}

/// Merge a field change into a copy of `base`.
pub fn merge_values(base: &ChangeLabelConfig, values: &FormValues) -> ChangeLabelConfig {
    let mut merged = base.clone();

    if let Some(source) = &values.label_source {
        merged.label_source = Some(source.clone());
    }
    if let Some(value) = &values.static_label_value {
        merged.static_label_value = Some(value.clone());
    }
    if let Some(value) = &values.label_name_or_pattern {
        merged.label_name_or_pattern = Some(value.clone());
    }
    if let Some(value) = &values.target_entity_type {
        merged.target_entity_type = Some(value.clone());
    }
    merged.extra = shallow_merge(merged.extra, values.extra.clone());

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use change_label_node::LabelSource;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_scalar_override() {
        let result = shallow_merge(object(json!({"version": 1})), object(json!({"version": 2})));
        assert_eq!(result["version"], 2);
    }

    #[test]
    fn test_nested_object_replaced() {
        let base = object(json!({
            "ui": {"color": "red", "width": 3}
        }));
        let overlay = object(json!({
            "ui": {"color": "blue"}
        }));
        let result = shallow_merge(base, overlay);

        // One level only: width is gone with the old object
        assert_eq!(result["ui"], json!({"color": "blue"}));
    }

    #[test]
    fn test_add_new_key() {
        let result = shallow_merge(object(json!({"a": 1})), object(json!({"b": 2})));
        assert_eq!(result["a"], 1);
        assert_eq!(result["b"], 2);
    }

    #[test]
    fn test_null_override() {
        let result = shallow_merge(object(json!({"value": 100})), object(json!({"value": null})));
        assert!(result["value"].is_null());
    }

    #[test]
    fn test_absent_fields_kept() {
        let base = ChangeLabelConfig::default_configuration();
        let merged = merge_values(&base, &FormValues::new().target_entity_type("DEVICE"));

        assert_eq!(merged.target_entity_type.as_deref(), Some("DEVICE"));
        assert_eq!(merged.label_source, Some(LabelSource::Static));
        assert_eq!(merged.static_label_value.as_deref(), Some("NewLabel"));
        assert_eq!(merged.label_name_or_pattern.as_deref(), Some(""));
    }

    #[test]
    fn test_empty_change_is_identity() {
        let base = ChangeLabelConfig::default_configuration();
        assert_eq!(merge_values(&base, &FormValues::new()), base);
    }

    #[test]
    fn test_extra_keys_merged() {
        let mut base = ChangeLabelConfig::default_configuration();
        base.extra.insert("version".to_string(), json!(1));
        base.extra.insert("owner".to_string(), json!("ops"));

        let mut values = FormValues::new();
        values.extra.insert("version".to_string(), json!(2));
        let merged = merge_values(&base, &values);

        assert_eq!(merged.extra["version"], 2);
        assert_eq!(merged.extra["owner"], "ops");
    }
}
