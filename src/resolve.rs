//! Type name resolution
//!
//! Looks a type name up in the project graph. Files are searched in graph
//! order; within a file a type alias or interface of that name wins over an
//! exported symbol. The first hit is returned.
//!
//! References produced by schema lowering are resolved differently: they name
//! a document by path, so they go straight to that file.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::error::{MockError, Result};
use crate::graph::TypeGraph;
use crate::types::TypeDescription;

/// How many near-miss names a `TypeNotFound` error carries
const MAX_SUGGESTIONS: usize = 3;

/// Find the declared type called `type_name`
pub fn resolve_type<'g>(type_name: &str, graph: &'g TypeGraph) -> Result<&'g TypeDescription> {
    find_type(type_name, graph).ok_or_else(|| MockError::TypeNotFound {
        name: type_name.to_string(),
        suggestions: suggest(type_name, graph),
    })
}

/// Like [`resolve_type`], without building an error on a miss
pub fn find_type<'g>(type_name: &str, graph: &'g TypeGraph) -> Option<&'g TypeDescription> {
    for file in graph.source_files() {
        if let Some(ty) = file.type_alias(type_name).or_else(|| file.interface(type_name)) {
            return Some(ty);
        }

        if let Some(symbol) = file.export_symbols().iter().find(|s| s.name == type_name) {
            return Some(&symbol.declared);
        }
    }
    None
}

/// Resolve a reference key (`path` or `path#/pointer`) to the declaration it points at.
///
/// A bare path selects the document's root declaration; a fragment selects the
/// declaration named by its last segment in that same document.
pub fn resolve_ref<'g>(key: &str, graph: &'g TypeGraph) -> Option<&'g TypeDescription> {
    let (path, fragment) = key.split_once('#').unwrap_or((key, ""));
    let file = graph.source_file(path)?;

    match fragment.rsplit('/').find(|s| !s.is_empty()) {
        Some(segment) => file.declaration(&segment.replace("~1", "/").replace("~0", "~")),
        None => file.root_type(),
    }
}

/// Declared names that fuzzily match `query`, best first
fn suggest(query: &str, graph: &TypeGraph) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &str)> = graph
        .declared_names()
        .into_iter()
        .filter_map(|name| matcher.fuzzy_match(name, query).map(|score| (score, name)))
        .collect();

    // Sort by score descending
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name.to_string())
        .collect()
}
