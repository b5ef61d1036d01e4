//! Project Type Graph
//!
//! Declared types of a project, grouped by source file. Files are kept in a
//! deterministic (lexical path) order so name lookups are reproducible.
//!
//! The graph is produced by a [`TypeGraphLoader`]. [`SchemaDirLoader`] builds
//! it from a directory of JSON Schema documents; tests and other front ends can
//! supply their own loader, including a plain closure.

pub mod loader;
pub mod lower;

pub use loader::SchemaDirLoader;
pub use lower::{lower_schema, normalize_ref};

use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::MockConfig;
use crate::types::TypeDescription;

/// Produces the type graph for a project
pub trait TypeGraphLoader {
    /// Load the graph of the project configured by `config_path`
    fn load(&self, config_path: &Path, config: &MockConfig) -> anyhow::Result<TypeGraph>;
}

impl<F> TypeGraphLoader for F
where
    F: Fn(&Path, &MockConfig) -> anyhow::Result<TypeGraph>,
{
    fn load(&self, config_path: &Path, config: &MockConfig) -> anyhow::Result<TypeGraph> {
        self(config_path, config)
    }
}

/// Exported symbol with its declared type
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSymbol {
    pub name: String,
    pub declared: TypeDescription,
}

/// Declarations found in one source file
#[derive(Debug, Clone, Default)]
pub struct SourceFile {
    /// Path relative to the schema root
    pub path: PathBuf,
    /// Name of the document's own (root) declaration
    pub(crate) root: Option<String>,
    pub(crate) aliases: IndexMap<String, TypeDescription>,
    pub(crate) interfaces: IndexMap<String, TypeDescription>,
    pub(crate) exports: Vec<ExportSymbol>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Add a type alias declaration
    pub fn with_alias(mut self, name: impl Into<String>, ty: TypeDescription) -> Self {
        self.aliases.insert(name.into(), ty);
        self
    }

    /// Add an interface declaration
    pub fn with_interface(mut self, name: impl Into<String>, ty: TypeDescription) -> Self {
        self.interfaces.insert(name.into(), ty);
        self
    }

    /// Add an exported symbol
    pub fn with_export(mut self, name: impl Into<String>, declared: TypeDescription) -> Self {
        self.exports.push(ExportSymbol {
            name: name.into(),
            declared,
        });
        self
    }

    /// Declare `ty` under `name`: object shapes become interfaces, everything else an alias
    pub fn declare(&mut self, name: impl Into<String>, ty: TypeDescription) {
        if ty.is_object() {
            self.interfaces.insert(name.into(), ty);
        } else {
            self.aliases.insert(name.into(), ty);
        }
    }

    /// Declare the document's root schema; path references without a fragment land here
    pub fn declare_root(&mut self, name: impl Into<String>, ty: TypeDescription) {
        let name = name.into();
        self.root = Some(name.clone());
        self.declare(name, ty);
    }

    /// Builder form of [`SourceFile::declare_root`]
    pub fn with_root(mut self, name: impl Into<String>, ty: TypeDescription) -> Self {
        self.declare_root(name, ty);
        self
    }

    /// The root declaration, when the document has one
    pub fn root_type(&self) -> Option<&TypeDescription> {
        self.root.as_deref().and_then(|name| self.declaration(name))
    }

    /// A type alias or interface declared in this file
    pub fn declaration(&self, name: &str) -> Option<&TypeDescription> {
        self.type_alias(name).or_else(|| self.interface(name))
    }

    pub fn type_alias(&self, name: &str) -> Option<&TypeDescription> {
        self.aliases.get(name)
    }

    pub fn interface(&self, name: &str) -> Option<&TypeDescription> {
        self.interfaces.get(name)
    }

    pub fn export_symbols(&self) -> &[ExportSymbol] {
        &self.exports
    }

    /// Every name declared in this file, in declaration order
    pub fn declared_names(&self) -> impl Iterator<Item = &str> {
        self.aliases
            .keys()
            .chain(self.interfaces.keys())
            .map(String::as_str)
            .chain(self.exports.iter().map(|e| e.name.as_str()))
    }

    /// Path key used by reference lookups (`/`-separated, relative to the schema root)
    pub fn path_key(&self) -> String {
        path_key(&self.path)
    }
}

/// The declared types of a project
#[derive(Debug, Clone, Default)]
pub struct TypeGraph {
    files: Vec<SourceFile>,
    /// Path key → index into `files`
    by_path: HashMap<String, usize>,
    /// Hash over the loaded file contents
    pub bundle_hash: String,
}

impl TypeGraph {
    /// Build a graph from source files. Files are sorted by path.
    pub fn from_files(mut files: Vec<SourceFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        let by_path = files
            .iter()
            .enumerate()
            .map(|(idx, file)| (file.path_key(), idx))
            .collect();
        Self {
            files,
            by_path,
            bundle_hash: String::new(),
        }
    }

    pub fn with_bundle_hash(mut self, hash: impl Into<String>) -> Self {
        self.bundle_hash = hash.into();
        self
    }

    /// Source files in lookup order
    pub fn source_files(&self) -> &[SourceFile] {
        &self.files
    }

    /// The file whose path key is `key`
    pub fn source_file(&self, key: &str) -> Option<&SourceFile> {
        self.by_path.get(key).map(|&idx| &self.files[idx])
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of declarations across all files
    pub fn declaration_count(&self) -> usize {
        self.files.iter().map(|f| f.declared_names().count()).sum()
    }

    /// All declared names, deduplicated, in lookup order
    pub fn declared_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.files
            .iter()
            .flat_map(|file| file.declared_names())
            .filter(|name| seen.insert(*name))
            .collect()
    }
}

fn path_key(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_sorted_by_path() {
        let graph = TypeGraph::from_files(vec![
            SourceFile::new("b.json"),
            SourceFile::new("a/z.json"),
            SourceFile::new("a.json"),
        ]);
        let paths: Vec<_> = graph
            .source_files()
            .iter()
            .map(|f| f.path.to_string_lossy().to_string())
            .collect();
        // Component-wise: directory "a" sorts before file "a.json"
        assert_eq!(paths, vec!["a/z.json", "a.json", "b.json"]);
    }

    #[test]
    fn test_declare_splits_interfaces_and_aliases() {
        let mut file = SourceFile::new("user.json");
        file.declare("User", TypeDescription::object([("id", TypeDescription::Number)]));
        file.declare("UserId", TypeDescription::String);

        assert!(file.interface("User").is_some());
        assert!(file.type_alias("User").is_none());
        assert_eq!(file.type_alias("UserId"), Some(&TypeDescription::String));
    }

    #[test]
    fn test_files_indexed_by_path() {
        let graph = TypeGraph::from_files(vec![
            SourceFile::new("common/address.json")
                .with_root("Address", TypeDescription::object([("city", TypeDescription::String)]))
                .with_alias("Zip", TypeDescription::String),
            SourceFile::new("user.json"),
        ]);

        let file = graph.source_file("common/address.json").unwrap();
        assert!(file.root_type().unwrap().is_object());
        assert_eq!(file.declaration("Zip"), Some(&TypeDescription::String));
        assert!(graph.source_file("user.json").unwrap().root_type().is_none());
        assert!(graph.source_file("address.json").is_none());
    }

    #[test]
    fn test_declared_names_deduplicated() {
        let graph = TypeGraph::from_files(vec![
            SourceFile::new("a.json").with_alias("Id", TypeDescription::String),
            SourceFile::new("b.json")
                .with_alias("Id", TypeDescription::Number)
                .with_export("defaultUser", TypeDescription::named("User")),
        ]);
        assert_eq!(graph.declared_names(), vec!["Id", "defaultUser"]);
        assert_eq!(graph.declaration_count(), 3);
    }

    #[test]
    fn test_closure_loader() {
        let loader = |_: &Path, _: &MockConfig| -> anyhow::Result<TypeGraph> {
            Ok(TypeGraph::from_files(vec![SourceFile::new("x.json")]))
        };
        let graph = loader.load(Path::new("mocks.toml"), &MockConfig::default()).unwrap();
        assert_eq!(graph.file_count(), 1);
    }
}
