//! Sample value synthesis
//!
//! Produces a fixed, plausible value for every shape a [`TypeDescription`]
//! can take. Named references are expanded through the project graph; a type
//! that refers back to itself is cut off with `null` instead of recursing
//! forever.
//!
//! Dates are taken from the wall clock, so two syntheses of a date-bearing
//! type are not equal.

use chrono::Utc;
use indexmap::IndexMap;

use crate::graph::TypeGraph;
use crate::resolve::{find_type, resolve_ref};
use crate::types::TypeDescription;
use crate::value::SampleValue;

/// Placeholder for string fields
pub const PLACEHOLDER_STRING: &str = "example";
/// Placeholder for number fields
pub const PLACEHOLDER_NUMBER: i64 = 42;
/// Placeholder for boolean fields
pub const PLACEHOLDER_BOOLEAN: bool = true;
/// Default nesting limit
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Name that always synthesizes to the current instant
const DATE_TYPE_NAME: &str = "Date";

/// Synthesize a value for a standalone description (no named references)
pub fn synthesize(ty: &TypeDescription) -> SampleValue {
    Synthesizer::new(None).synthesize(ty)
}

/// Recursive sample builder
pub struct Synthesizer<'g> {
    graph: Option<&'g TypeGraph>,
    max_depth: usize,
    /// Declarations currently being expanded, outermost first. Compared by
    /// identity: one declaration can be reached through differently spelled
    /// references.
    expanding: Vec<&'g TypeDescription>,
}

impl<'g> Synthesizer<'g> {
    /// Create a synthesizer that resolves `Named` references against `graph`
    pub fn new(graph: Option<&'g TypeGraph>) -> Self {
        Self {
            graph,
            max_depth: DEFAULT_MAX_DEPTH,
            expanding: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build a fresh sample for `ty`
    pub fn synthesize(&mut self, ty: &TypeDescription) -> SampleValue {
        self.expanding.clear();
        self.sample(ty, 0)
    }

    /// Build a fresh sample for a declaration taken from the graph.
    ///
    /// The declaration itself counts as being expanded, so a reference back to
    /// it from inside is truncated just like any other cycle.
    pub fn synthesize_declared(&mut self, ty: &'g TypeDescription) -> SampleValue {
        self.expanding.clear();
        self.expanding.push(ty);
        let value = self.sample(ty, 0);
        self.expanding.pop();
        value
    }

    fn sample(&mut self, ty: &TypeDescription, depth: usize) -> SampleValue {
        if depth > self.max_depth {
            tracing::debug!(
                depth,
                kind = ty.kind_name(),
                "max depth reached, truncating to null"
            );
            return SampleValue::Null;
        }

        match ty {
            TypeDescription::String => SampleValue::String(PLACEHOLDER_STRING.to_string()),
            TypeDescription::Number => SampleValue::Number(PLACEHOLDER_NUMBER.into()),
            TypeDescription::Boolean => SampleValue::Bool(PLACEHOLDER_BOOLEAN),
            TypeDescription::Date => SampleValue::Date(Utc::now()),
            TypeDescription::Named(name) if name == DATE_TYPE_NAME => {
                SampleValue::Date(Utc::now())
            }
            TypeDescription::Array(element) => {
                SampleValue::Array(vec![self.sample(element, depth + 1)])
            }
            TypeDescription::Enum(members) => match members.first() {
                Some(member) => member
                    .value
                    .as_ref()
                    .map(|v| v.to_sample())
                    .unwrap_or_else(|| SampleValue::String(member.label.clone())),
                None => SampleValue::Null,
            },
            // Only a literal first member is used; anything else degrades to null
            TypeDescription::Union(members) => match members.first() {
                Some(TypeDescription::Literal(literal)) => literal.to_sample(),
                _ => SampleValue::Null,
            },
            TypeDescription::Literal(literal) => literal.to_sample(),
            TypeDescription::Object(properties) => {
                let mut fields = IndexMap::with_capacity(properties.len());
                for prop in properties {
                    let Some(declared) = &prop.declared else {
                        continue;
                    };
                    let value = self.sample(declared, depth + 1);
                    fields.insert(prop.name.clone(), value);
                }
                SampleValue::Object(fields)
            }
            TypeDescription::Named(name) => self.sample_named(name, depth),
            TypeDescription::Unknown => SampleValue::Null,
        }
    }

    fn sample_named(&mut self, name: &str, depth: usize) -> SampleValue {
        let target = self
            .graph
            .and_then(|graph| resolve_ref(name, graph).or_else(|| find_type(name, graph)));
        let Some(target) = target else {
            tracing::warn!(type_name = name, "unresolved type reference");
            return SampleValue::Null;
        };

        if self.expanding.iter().any(|ty| std::ptr::eq(*ty, target)) {
            tracing::debug!(type_name = name, "recursive type reference, truncating to null");
            return SampleValue::Null;
        }

        self.expanding.push(target);
        let value = self.sample(target, depth + 1);
        self.expanding.pop();
        value
    }
}
