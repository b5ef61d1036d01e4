//! Deep merge of override trees
//!
//! Overrides are merged field by field into a target value. Only plain
//! mappings are merged recursively; arrays, dates and scalars in the override
//! replace whatever the target held at that position.

use crate::value::SampleValue;

/// A value tree that can be introspected as scalar, array or mapping
pub trait Mergeable: Clone {
    /// Whether this value is a plain mapping (not an array, date or scalar)
    fn is_plain_mapping(&self) -> bool;

    /// Entries of a plain mapping in iteration order, `None` for anything else
    fn entries(&self) -> Option<Vec<(&str, &Self)>>;

    /// Mutable access to an existing field of a plain mapping
    fn field_mut(&mut self, key: &str) -> Option<&mut Self>;

    /// Set a field of a plain mapping. Existing keys keep their position.
    fn set_field(&mut self, key: &str, value: Self);
}

/// Merge `source` into `target` and return the result.
///
/// `source` is never modified; the parts of it that land in the result are
/// cloned.
pub fn deep_merge<V: Mergeable>(mut target: V, source: &V) -> V {
    merge_into(&mut target, source);
    target
}

/// In-place form of [`deep_merge`]
pub fn merge_into<V: Mergeable>(target: &mut V, source: &V) {
    let Some(entries) = source.entries() else {
        *target = source.clone();
        return;
    };

    // A mapping override on top of a scalar or array replaces it.
    if !target.is_plain_mapping() {
        *target = source.clone();
        return;
    }

    for (key, incoming) in entries {
        match target.field_mut(key) {
            Some(existing) if existing.is_plain_mapping() && incoming.is_plain_mapping() => {
                merge_into(existing, incoming);
            }
            _ => target.set_field(key, incoming.clone()),
        }
    }
}

impl Mergeable for SampleValue {
    fn is_plain_mapping(&self) -> bool {
        matches!(self, SampleValue::Object(_))
    }

    fn entries(&self) -> Option<Vec<(&str, &Self)>> {
        match self {
            SampleValue::Object(map) => Some(map.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            _ => None,
        }
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut Self> {
        match self {
            SampleValue::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    fn set_field(&mut self, key: &str, value: Self) {
        if let SampleValue::Object(map) = self {
            map.insert(key.to_string(), value);
        }
    }
}

impl Mergeable for serde_json::Value {
    fn is_plain_mapping(&self) -> bool {
        self.is_object()
    }

    fn entries(&self) -> Option<Vec<(&str, &Self)>> {
        self.as_object()
            .map(|map| map.iter().map(|(k, v)| (k.as_str(), v)).collect())
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut Self> {
        self.as_object_mut().and_then(|map| map.get_mut(key))
    }

    fn set_field(&mut self, key: &str, value: Self) {
        if let Some(map) = self.as_object_mut() {
            map.insert(key.to_string(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample(value: serde_json::Value) -> SampleValue {
        SampleValue::from(value)
    }

    #[test]
    fn test_empty_override_is_identity() {
        let target = sample(json!({"id": 42, "address": {"city": "example", "zip": "example"}}));
        let merged = deep_merge(target.clone(), &SampleValue::empty_object());
        assert_eq!(merged, target);
    }

    #[test]
    fn test_override_wins_at_shared_leaf() {
        let target = sample(json!({"name": "example", "address": {"city": "example"}}));
        let merged = deep_merge(target, &sample(json!({"address": {"city": "Akron"}})));
        assert_eq!(merged.pointer("address/city").and_then(SampleValue::as_str), Some("Akron"));
        assert_eq!(merged.get("name").and_then(SampleValue::as_str), Some("example"));
    }

    #[test]
    fn test_target_only_fields_preserved() {
        let target = sample(json!({"address": {"city": "example", "zip": "00000"}}));
        let merged = deep_merge(target, &sample(json!({"address": {"city": "Akron"}})));
        assert_eq!(merged.pointer("address/zip").and_then(SampleValue::as_str), Some("00000"));
    }

    #[test]
    fn test_arrays_replaced_wholesale() {
        let target = sample(json!({"a": [1, 2, 3]}));
        let merged = deep_merge(target, &sample(json!({"a": [9]})));
        assert_eq!(merged, sample(json!({"a": [9]})));
    }

    #[test]
    fn test_dates_replaced_wholesale() {
        let fixed = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let target = SampleValue::object([("createdAt", SampleValue::Date(Utc::now()))]);
        let source = SampleValue::object([("createdAt", SampleValue::Date(fixed))]);
        let merged = deep_merge(target, &source);
        assert_eq!(merged.get("createdAt").and_then(SampleValue::as_date), Some(&fixed));
    }

    #[test]
    fn test_mapping_over_scalar_field_replaces_it() {
        let target = sample(json!({"theme": "example"}));
        let merged = deep_merge(target, &sample(json!({"theme": {"name": "dark"}})));
        assert_eq!(merged, sample(json!({"theme": {"name": "dark"}})));
    }

    #[test]
    fn test_non_mapping_source_wins_outright() {
        let target = sample(json!({"a": 1}));
        assert_eq!(deep_merge(target.clone(), &SampleValue::Null), SampleValue::Null);
        assert_eq!(deep_merge(target, &sample(json!([1, 2]))), sample(json!([1, 2])));
    }

    #[test]
    fn test_new_keys_appended_and_order_kept() {
        let target = sample(json!({"id": 42, "name": "example"}));
        let merged = deep_merge(target, &sample(json!({"extra": true, "id": 7})));
        let keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["id", "name", "extra"]);
        assert_eq!(merged.get("id").and_then(SampleValue::as_i64), Some(7));
    }

    #[test]
    fn test_source_left_untouched() {
        let source = sample(json!({"address": {"city": "Akron"}}));
        let snapshot = source.clone();
        let _ = deep_merge(sample(json!({"address": {"zip": "1"}})), &source);
        assert_eq!(source, snapshot);
    }

    #[test]
    fn test_json_values_merge_the_same_way() {
        let merged = deep_merge(
            json!({"a": {"b": 1, "c": [1, 2, 3]}, "d": "x"}),
            &json!({"a": {"c": [9]}, "e": null}),
        );
        assert_eq!(merged, json!({"a": {"b": 1, "c": [9]}, "d": "x", "e": null}));
    }
}
