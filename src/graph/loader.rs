//! Schema Directory Loading
//!
//! Walks a project's schema directory, lowers every JSON Schema document and
//! records its declarations in a [`TypeGraph`].

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{lower_schema, SourceFile, TypeGraph, TypeGraphLoader};
use crate::config::{MockConfig, ProjectConfig};

/// Loads the type graph from the `schema_dir` named in the project config
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaDirLoader;

impl TypeGraphLoader for SchemaDirLoader {
    fn load(&self, config_path: &Path, config: &MockConfig) -> anyhow::Result<TypeGraph> {
        let schema_dir = config.schema_dir(config_path);
        load_from_directory(&schema_dir, &config.project)
    }
}

/// Load every `*.json` schema under `schema_dir`
pub fn load_from_directory(schema_dir: &Path, config: &ProjectConfig) -> anyhow::Result<TypeGraph> {
    if !schema_dir.is_dir() {
        anyhow::bail!("Schema directory not found: {}", schema_dir.display());
    }

    let mut files = Vec::new();
    let mut hasher = Sha256::new();

    // Sorted walk so the bundle hash is stable
    for entry in WalkDir::new(schema_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().map(|e| e != "json").unwrap_or(true) {
            continue;
        }

        let relative_path = path.strip_prefix(schema_dir)?.to_path_buf();
        let relative_str = relative_path.to_string_lossy().replace('\\', "/");

        // Apply include/skip filters
        if !config.include_prefixes.is_empty()
            && !config.include_prefixes.iter().any(|p| relative_str.starts_with(p))
        {
            continue;
        }
        if config.skip_prefixes.iter().any(|p| relative_str.starts_with(p)) {
            continue;
        }

        let content = fs::read_to_string(path)?;
        hasher.update(content.as_bytes());

        let json: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse JSON in {}: {}", path.display(), e))?;

        let file = extract_declarations(&json, &relative_path);
        tracing::debug!(
            path = %relative_str,
            declarations = file.declared_names().count(),
            "loaded schema file"
        );
        files.push(file);
    }

    let bundle_hash = format!("{:x}", hasher.finalize());
    Ok(TypeGraph::from_files(files).with_bundle_hash(bundle_hash))
}

/// Collect the declarations of one schema document
fn extract_declarations(json: &serde_json::Value, relative_path: &Path) -> SourceFile {
    let mut file = SourceFile::new(relative_path);

    let name = json
        .get("title")
        .and_then(|v| v.as_str())
        .map(String::from)
        .unwrap_or_else(|| {
            relative_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .replace(".schema", "")
        });
    if !name.is_empty() {
        file.declare_root(name, lower_schema(json, relative_path));
    }

    for key in ["$defs", "definitions"] {
        if let Some(defs) = json.get(key).and_then(|v| v.as_object()) {
            for (def_name, def) in defs {
                file.declare(def_name.clone(), lower_schema(def, relative_path));
            }
        }
    }

    // x-familiar-exports: { "defaultUser": { "$ref": "#/$defs/User" } }
    if let Some(exports) = json.get("x-familiar-exports").and_then(|v| v.as_object()) {
        for (symbol, declared) in exports {
            file = file.with_export(symbol.clone(), lower_schema(declared, relative_path));
        }
    }

    file
}
