//! Mock Generator
//!
//! Ties the pieces together: locate the project config, load the type graph,
//! resolve the requested name, synthesize a sample and merge the caller's
//! overrides on top.

use std::path::PathBuf;

use crate::config::MockConfig;
use crate::error::Result;
use crate::graph::{SchemaDirLoader, TypeGraph, TypeGraphLoader};
use crate::locate::{default_config_path, locate_config};
use crate::merge::deep_merge;
use crate::resolve::resolve_type;
use crate::synth::Synthesizer;
use crate::types::TypeDescription;
use crate::value::SampleValue;

/// Generates mocks for the project around a start directory
pub struct MockGenerator<L = SchemaDirLoader> {
    loader: L,
    /// Where the config search starts (current directory when unset)
    start_dir: Option<PathBuf>,
}

impl Default for MockGenerator<SchemaDirLoader> {
    fn default() -> Self {
        Self::new(SchemaDirLoader)
    }
}

impl<L: TypeGraphLoader> MockGenerator<L> {
    /// Create a generator that loads the type graph with `loader`
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            start_dir: None,
        }
    }

    /// Search for the project config starting at `dir`
    pub fn with_start_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.start_dir = Some(dir.into());
        self
    }

    /// Generate a mock of `type_name` with `overrides` merged on top
    pub fn generate_mock(&self, type_name: &str, overrides: &SampleValue) -> Result<SampleValue> {
        let project = self.open()?;
        let ty = resolve_type(type_name, &project.graph)?;

        let mock = Synthesizer::new(Some(&project.graph))
            .with_max_depth(project.config.synthesis.max_depth)
            .synthesize_declared(ty);

        tracing::debug!(type_name, kind = ty.kind_name(), "synthesized mock");
        Ok(deep_merge(mock, overrides))
    }

    /// Generate a mock of `type_name` with every field auto-filled
    pub fn generate(&self, type_name: &str) -> Result<SampleValue> {
        self.generate_mock(type_name, &SampleValue::empty_object())
    }

    /// The resolved type description of `type_name`
    pub fn describe(&self, type_name: &str) -> Result<TypeDescription> {
        let project = self.open()?;
        resolve_type(type_name, &project.graph).cloned()
    }

    /// Effective configuration for the project
    pub fn config(&self) -> Result<MockConfig> {
        let config_path = self.config_path();
        Ok(MockConfig::load_from(&config_path)?)
    }

    fn config_path(&self) -> PathBuf {
        let start = self
            .start_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        match locate_config(&start) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "found project config");
                path
            }
            None => {
                let fallback = default_config_path();
                tracing::debug!(
                    start = %start.display(),
                    fallback = %fallback.display(),
                    "no project config found, using fallback"
                );
                fallback
            }
        }
    }

    fn open(&self) -> Result<Project> {
        let config_path = self.config_path();
        let config = MockConfig::load_from(&config_path)?;
        let graph = self.loader.load(&config_path, &config)?;

        tracing::info!(
            files = graph.file_count(),
            declarations = graph.declaration_count(),
            bundle_hash = %graph.bundle_hash,
            "loaded type graph"
        );

        Ok(Project { config, graph })
    }
}

/// A loaded project: its configuration and type graph
struct Project {
    config: MockConfig,
    graph: TypeGraph,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SourceFile;
    use serde_json::json;
    use std::cell::Cell;
    use std::path::Path;

    fn user_graph() -> TypeGraph {
        TypeGraph::from_files(vec![SourceFile::new("user.json").with_interface(
            "User",
            TypeDescription::object([
                ("id", TypeDescription::Number),
                ("name", TypeDescription::String),
                ("tags", TypeDescription::array_of(TypeDescription::String)),
            ]),
        )])
    }

    fn static_loader(_: &Path, _: &MockConfig) -> anyhow::Result<TypeGraph> {
        Ok(user_graph())
    }

    #[test]
    fn test_generate_with_injected_graph() {
        let dir = tempfile::tempdir().unwrap();
        let generator = MockGenerator::new(static_loader).with_start_dir(dir.path());

        let mock = generator.generate("User").unwrap();
        assert_eq!(mock.get("id").and_then(SampleValue::as_i64), Some(42));
        assert_eq!(mock.get("name").and_then(SampleValue::as_str), Some("example"));
        assert_eq!(mock.pointer("tags/0").and_then(SampleValue::as_str), Some("example"));
    }

    #[test]
    fn test_overrides_applied() {
        let dir = tempfile::tempdir().unwrap();
        let generator = MockGenerator::new(static_loader).with_start_dir(dir.path());

        let overrides = SampleValue::from(json!({"name": "George", "tags": []}));
        let mock = generator.generate_mock("User", &overrides).unwrap();
        assert_eq!(mock.get("name").and_then(SampleValue::as_str), Some("George"));
        assert_eq!(mock.get("tags").and_then(SampleValue::as_array).map(Vec::len), Some(0));
        assert_eq!(mock.get("id").and_then(SampleValue::as_i64), Some(42));
    }

    #[test]
    fn test_self_referential_root_truncated_at_first_reentry() {
        let dir = tempfile::tempdir().unwrap();
        let loader = |_: &Path, _: &MockConfig| -> anyhow::Result<TypeGraph> {
            Ok(TypeGraph::from_files(vec![SourceFile::new("node.json").with_interface(
                "Node",
                TypeDescription::object([
                    ("id", TypeDescription::Number),
                    ("next", TypeDescription::named("Node")),
                ]),
            )]))
        };
        let generator = MockGenerator::new(loader).with_start_dir(dir.path());

        let mock = generator.generate("Node").unwrap();
        assert_eq!(mock.to_json(), json!({"id": 42, "next": null}));
    }

    #[test]
    fn test_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let generator = MockGenerator::new(static_loader).with_start_dir(dir.path());

        let err = generator.generate("NoSuchType").unwrap_err();
        assert!(err.is_type_not_found());
    }

    #[test]
    fn test_loader_receives_located_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mocks.toml"), "[synthesis]\nmax_depth = 3\n").unwrap();
        let nested = dir.path().join("src/models");
        std::fs::create_dir_all(&nested).unwrap();

        let expected = dir.path().join("mocks.toml");
        let calls = Cell::new(0);
        let loader = |path: &Path, config: &MockConfig| -> anyhow::Result<TypeGraph> {
            assert_eq!(path, expected.as_path());
            assert_eq!(config.synthesis.max_depth, 3);
            calls.set(calls.get() + 1);
            Ok(user_graph())
        };

        let generator = MockGenerator::new(loader).with_start_dir(&nested);
        generator.generate("User").unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_load_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let loader = |_: &Path, _: &MockConfig| -> anyhow::Result<TypeGraph> {
            anyhow::bail!("project unreadable")
        };
        let generator = MockGenerator::new(loader).with_start_dir(dir.path());

        let err = generator.generate("User").unwrap_err();
        assert!(!err.is_type_not_found());
        assert_eq!(err.to_string(), "project unreadable");
    }

    #[test]
    fn test_describe() {
        let dir = tempfile::tempdir().unwrap();
        let generator = MockGenerator::new(static_loader).with_start_dir(dir.path());
        assert!(generator.describe("User").unwrap().is_object());
    }
}
