//! Sample values
//!
//! Dynamically-typed value tree produced by synthesis. Unlike
//! `serde_json::Value` it keeps dates as instants, so merging can treat them
//! as atomic leaves.

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// A synthesized (or caller-supplied) value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SampleValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<SampleValue>),
    /// Keys keep insertion order
    Object(IndexMap<String, SampleValue>),
}

impl SampleValue {
    /// Empty mapping, the "no overrides" value
    pub fn empty_object() -> Self {
        SampleValue::Object(IndexMap::new())
    }

    /// Build a mapping from `(key, value)` pairs, keeping their order
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, SampleValue)>,
        K: Into<String>,
    {
        SampleValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Look up a field of a mapping
    pub fn get(&self, key: &str) -> Option<&SampleValue> {
        match self {
            SampleValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Follow a `/`-separated path of field names and array indices
    pub fn pointer(&self, path: &str) -> Option<&SampleValue> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |current, segment| match current {
                SampleValue::Object(map) => map.get(segment),
                SampleValue::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SampleValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SampleValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SampleValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SampleValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SampleValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            SampleValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<SampleValue>> {
        match self {
            SampleValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, SampleValue>> {
        match self {
            SampleValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Convert to plain JSON. Dates become ISO-8601 strings.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            SampleValue::Null => serde_json::Value::Null,
            SampleValue::Bool(b) => serde_json::Value::Bool(*b),
            SampleValue::Number(n) => serde_json::Value::Number(n.clone()),
            SampleValue::String(s) => serde_json::Value::String(s.clone()),
            SampleValue::Date(d) => serde_json::Value::String(format_instant(d)),
            SampleValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(SampleValue::to_json).collect())
            }
            SampleValue::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Serialize for SampleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SampleValue::Null => serializer.serialize_unit(),
            SampleValue::Bool(b) => serializer.serialize_bool(*b),
            SampleValue::Number(n) => n.serialize(serializer),
            SampleValue::String(s) => serializer.serialize_str(s),
            SampleValue::Date(d) => serializer.serialize_str(&format_instant(d)),
            SampleValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            SampleValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

impl From<serde_json::Value> for SampleValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => SampleValue::Null,
            serde_json::Value::Bool(b) => SampleValue::Bool(b),
            serde_json::Value::Number(n) => SampleValue::Number(n),
            serde_json::Value::String(s) => SampleValue::String(s),
            serde_json::Value::Array(items) => {
                SampleValue::Array(items.into_iter().map(SampleValue::from).collect())
            }
            serde_json::Value::Object(map) => SampleValue::Object(
                map.into_iter().map(|(k, v)| (k, SampleValue::from(v))).collect(),
            ),
        }
    }
}

impl From<&str> for SampleValue {
    fn from(s: &str) -> Self {
        SampleValue::String(s.to_string())
    }
}

impl From<String> for SampleValue {
    fn from(s: String) -> Self {
        SampleValue::String(s)
    }
}

impl From<bool> for SampleValue {
    fn from(b: bool) -> Self {
        SampleValue::Bool(b)
    }
}

impl From<i64> for SampleValue {
    fn from(n: i64) -> Self {
        SampleValue::Number(n.into())
    }
}

impl From<DateTime<Utc>> for SampleValue {
    fn from(d: DateTime<Utc>) -> Self {
        SampleValue::Date(d)
    }
}

impl From<Vec<SampleValue>> for SampleValue {
    fn from(items: Vec<SampleValue>) -> Self {
        SampleValue::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date_serializes_with_millis() {
        let date = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let value = SampleValue::object([("createdAt", SampleValue::Date(date))]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"createdAt":"2020-01-01T00:00:00.000Z"}"#);
        assert_eq!(value.to_json()["createdAt"], "2020-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_from_json_keeps_key_order() {
        let value = SampleValue::from(serde_json::json!({"z": 1, "a": [true, null]}));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(value.pointer("a/0"), Some(&SampleValue::Bool(true)));
        assert!(value.pointer("a/1").unwrap().is_null());
    }

    #[test]
    fn test_pointer_misses() {
        let value = SampleValue::from(serde_json::json!({"a": {"b": "c"}}));
        assert_eq!(value.pointer("a/b").and_then(SampleValue::as_str), Some("c"));
        assert!(value.pointer("a/x").is_none());
        assert!(value.pointer("a/b/c").is_none());
    }
}
