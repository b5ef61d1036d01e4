//! Type descriptions
//!
//! Structural shape of a declared type, as handed to the synthesizer by the
//! type graph. Descriptions are immutable once loaded.

use serde::{Deserialize, Serialize};

use crate::value::SampleValue;

/// Structural description of a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeDescription {
    String,
    Number,
    Boolean,
    /// Date-time instant
    Date,
    /// Homogeneous array of the element type
    Array(Box<TypeDescription>),
    /// Members in declaration order
    Enum(Vec<EnumMember>),
    /// Members in declaration order
    Union(Vec<TypeDescription>),
    /// A single literal value (`const` in JSON Schema)
    Literal(Literal),
    /// Properties in declaration order
    Object(Vec<Property>),
    /// Reference to another declared type by name
    Named(String),
    /// Shape we have no synthesis rule for
    Unknown,
}

impl TypeDescription {
    /// Shorthand for an array of `element`
    pub fn array_of(element: TypeDescription) -> Self {
        TypeDescription::Array(Box::new(element))
    }

    /// Shorthand for a reference to a declared type
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescription::Named(name.into())
    }

    /// Build an object shape from `(name, type)` pairs
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, TypeDescription)>,
        K: Into<String>,
    {
        TypeDescription::Object(
            properties
                .into_iter()
                .map(|(name, ty)| Property::new(name, ty))
                .collect(),
        )
    }

    pub fn is_object(&self) -> bool {
        matches!(self, TypeDescription::Object(_))
    }

    /// Short name of the shape, for logs and diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDescription::String => "string",
            TypeDescription::Number => "number",
            TypeDescription::Boolean => "boolean",
            TypeDescription::Date => "date",
            TypeDescription::Array(_) => "array",
            TypeDescription::Enum(_) => "enum",
            TypeDescription::Union(_) => "union",
            TypeDescription::Literal(_) => "literal",
            TypeDescription::Object(_) => "object",
            TypeDescription::Named(_) => "named",
            TypeDescription::Unknown => "unknown",
        }
    }
}

/// One member of an enum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    /// Member name as declared
    pub label: String,
    /// Member value, if the enum carries explicit values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
}

impl EnumMember {
    pub fn new(label: impl Into<String>, value: Option<Literal>) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Literal value carried by a type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
    Null,
}

impl Literal {
    /// Convert a JSON scalar into a literal. Arrays and objects are not literals.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Literal::String(s.clone())),
            serde_json::Value::Number(n) => Some(Literal::Number(n.clone())),
            serde_json::Value::Bool(b) => Some(Literal::Boolean(*b)),
            serde_json::Value::Null => Some(Literal::Null),
            _ => None,
        }
    }

    pub fn to_sample(&self) -> SampleValue {
        match self {
            Literal::String(s) => SampleValue::String(s.clone()),
            Literal::Number(n) => SampleValue::Number(n.clone()),
            Literal::Boolean(b) => SampleValue::Bool(*b),
            Literal::Null => SampleValue::Null,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{}", s),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Null => write!(f, "null"),
        }
    }
}

/// A property of an object shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Declared type; `None` when no declaration could be obtained
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared: Option<TypeDescription>,
}

impl Property {
    pub fn new(name: impl Into<String>, declared: TypeDescription) -> Self {
        Self {
            name: name.into(),
            declared: Some(declared),
        }
    }

    /// A property with no obtainable declaration
    pub fn undeclared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_builder_keeps_order() {
        let ty = TypeDescription::object([
            ("b", TypeDescription::String),
            ("a", TypeDescription::Number),
        ]);
        match ty {
            TypeDescription::Object(props) => {
                let names: Vec<_> = props.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, vec!["b", "a"]);
            }
            other => panic!("Expected Object, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_from_json() {
        assert_eq!(
            Literal::from_json(&serde_json::json!("a")),
            Some(Literal::String("a".to_string()))
        );
        assert_eq!(Literal::from_json(&serde_json::json!(null)), Some(Literal::Null));
        assert_eq!(Literal::from_json(&serde_json::json!([1])), None);
    }
}
