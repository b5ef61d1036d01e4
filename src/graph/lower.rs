//! JSON Schema Lowering
//!
//! Converts raw JSON Schema documents into [`TypeDescription`]s. Like shape
//! detection in the codegen tooling this is purely structural: references are
//! kept as [`TypeDescription::Named`] keys and resolved later against the type
//! graph.
//!
//! A reference key is the referenced document's path relative to the schema
//! root, plus the JSON pointer fragment when there is one:
//! `common/Address.schema.json` or `models/Account.schema.json#/$defs/Role`.

use std::collections::HashMap;
use std::path::{Component, Path};

use crate::types::{EnumMember, Literal, Property, TypeDescription};

/// Lower one schema found in the document at `file` (first matching rule wins)
pub fn lower_schema(schema: &serde_json::Value, file: &Path) -> TypeDescription {
    let Some(obj) = schema.as_object() else {
        return TypeDescription::Unknown;
    };

    if let Some(target) = obj.get("$ref").and_then(|v| v.as_str()) {
        return TypeDescription::Named(normalize_ref(target, file));
    }

    if let Some(value) = obj.get("const") {
        return Literal::from_json(value)
            .map(TypeDescription::Literal)
            .unwrap_or(TypeDescription::Unknown);
    }

    if let Some(values) = obj.get("enum").and_then(|v| v.as_array()) {
        return lower_enum(schema, values);
    }

    if let Some(members) = obj
        .get("oneOf")
        .or_else(|| obj.get("anyOf"))
        .and_then(|v| v.as_array())
    {
        return TypeDescription::Union(members.iter().map(|m| lower_schema(m, file)).collect());
    }

    if let Some(members) = obj.get("allOf").and_then(|v| v.as_array()) {
        return lower_all_of(schema, members, file);
    }

    match obj.get("type") {
        Some(serde_json::Value::String(json_type)) => lower_typed(schema, json_type, file),
        // `"type": ["string", "null"]` is a union of each listed type
        Some(serde_json::Value::Array(types)) => TypeDescription::Union(
            types
                .iter()
                .filter_map(|t| t.as_str())
                .map(|t| lower_typed(schema, t, file))
                .collect(),
        ),
        _ if obj.contains_key("properties") => lower_object(schema, file),
        _ => TypeDescription::Unknown,
    }
}

/// Normalize a `$ref` found in the document at `current_path` to a reference key.
///
/// `#/$defs/Item` stays in the current document, relative paths are joined to
/// the current document's directory, and absolute URLs are kept as they are.
pub fn normalize_ref(target: &str, current_path: &Path) -> String {
    if target.starts_with("http://") || target.starts_with("https://") {
        return target.to_string();
    }

    let (path, fragment) = target.split_once('#').unwrap_or((target, ""));
    let document = if path.is_empty() {
        current_path.to_path_buf()
    } else {
        current_path.parent().unwrap_or(Path::new("")).join(path)
    };

    let mut components = Vec::new();
    for component in document.components() {
        match component {
            Component::ParentDir => {
                components.pop();
            }
            Component::Normal(s) => {
                components.push(s.to_string_lossy().to_string());
            }
            _ => {}
        }
    }

    let document = components.join("/");
    if fragment.trim_matches('/').is_empty() {
        document
    } else {
        format!("{}#{}", document, fragment)
    }
}

fn lower_typed(schema: &serde_json::Value, json_type: &str, file: &Path) -> TypeDescription {
    match json_type {
        "string" => match schema.get("format").and_then(|v| v.as_str()) {
            Some("date-time") | Some("date") => TypeDescription::Date,
            _ => TypeDescription::String,
        },
        "integer" | "number" => TypeDescription::Number,
        "boolean" => TypeDescription::Boolean,
        "null" => TypeDescription::Literal(Literal::Null),
        "array" => {
            let items = schema
                .get("items")
                .map(|items| lower_schema(items, file))
                .unwrap_or(TypeDescription::Unknown);
            TypeDescription::array_of(items)
        }
        "object" => lower_object(schema, file),
        _ => TypeDescription::Unknown,
    }
}

fn lower_object(schema: &serde_json::Value, file: &Path) -> TypeDescription {
    let properties = schema
        .get("properties")
        .and_then(|v| v.as_object())
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| match prop {
                    serde_json::Value::Object(_) => {
                        Property::new(name.clone(), lower_schema(prop, file))
                    }
                    serde_json::Value::Bool(true) => {
                        Property::new(name.clone(), TypeDescription::Unknown)
                    }
                    _ => Property::undeclared(name.clone()),
                })
                .collect()
        })
        .unwrap_or_default();

    TypeDescription::Object(properties)
}

fn lower_enum(schema: &serde_json::Value, values: &[serde_json::Value]) -> TypeDescription {
    // x-familiar-variants: { "ACTIVE": "Active", ... }
    let labels: HashMap<&str, &str> = schema
        .get("x-familiar-variants")
        .and_then(|v| v.as_object())
        .map(|variants| {
            variants
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|label| (k.as_str(), label)))
                .collect()
        })
        .unwrap_or_default();

    let members = values
        .iter()
        .filter_map(Literal::from_json)
        .map(|value| {
            let text = value.to_string();
            let label = labels.get(text.as_str()).map(|l| l.to_string()).unwrap_or(text);
            EnumMember::new(label, Some(value))
        })
        .collect();

    TypeDescription::Enum(members)
}

fn lower_all_of(
    schema: &serde_json::Value,
    members: &[serde_json::Value],
    file: &Path,
) -> TypeDescription {
    let lowered: Vec<TypeDescription> = members.iter().map(|m| lower_schema(m, file)).collect();

    if lowered.len() == 1 && schema.get("properties").is_none() {
        return lowered.into_iter().next().unwrap_or(TypeDescription::Unknown);
    }

    // Intersection of inline objects: properties concatenated, later ones replace earlier
    let mut merged: Vec<Property> = Vec::new();
    for member in lowered.into_iter().chain(std::iter::once(lower_object(schema, file))) {
        let TypeDescription::Object(props) = member else {
            return TypeDescription::Unknown;
        };
        for prop in props {
            push_property(&mut merged, prop);
        }
    }

    TypeDescription::Object(merged)
}

fn push_property(properties: &mut Vec<Property>, prop: Property) {
    match properties.iter_mut().find(|p| p.name == prop.name) {
        Some(existing) => *existing = prop,
        None => properties.push(prop),
    }
}
