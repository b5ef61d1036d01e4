//! Configuration management for mock generation
//!
//! Supports loading configuration from:
//! - Default values
//! - User config file (`mocks.toml` in the XDG config directory)
//! - Project config file (`mocks.toml`, found by walking up from the working directory)
//! - Environment variables (MOCKS__*)
//!
//! ## Example config file (mocks.toml):
//! ```toml
//! [project]
//! schema_dir = "schemas"
//! skip_prefixes = ["drafts/"]
//!
//! [synthesis]
//! max_depth = 16
//!
//! [output]
//! format = "compact"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration for mock generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockConfig {
    /// Where the project's schemas live
    #[serde(default)]
    pub project: ProjectConfig,

    /// Synthesis limits
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Schema directory, relative to the config file
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Skip schemas whose relative path starts with one of these
    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,

    /// Only load schemas whose relative path starts with one of these (empty = all)
    #[serde(default)]
    pub include_prefixes: Vec<String>,
}

/// Synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Nesting depth past which values are truncated to null
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

// Default value functions
fn default_schema_dir() -> PathBuf {
    PathBuf::from("schemas")
}

fn default_skip_prefixes() -> Vec<String> {
    vec![
        "target/".to_string(),
        ".git/".to_string(),
        "node_modules/".to_string(),
    ]
}

fn default_max_depth() -> usize {
    32
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            skip_prefixes: default_skip_prefixes(),
            include_prefixes: Vec::new(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl MockConfig {
    /// Load configuration layered under the given project config file.
    ///
    /// The file is optional: a missing file yields defaults (plus user and
    /// environment overrides).
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // User-level defaults from the XDG config directory
        if let Some(dirs) = directories::ProjectDirs::from("dev", "familiar", "mocks") {
            let user_config = dirs.config_dir().join("mocks.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        builder = builder.add_source(File::from(config_path.to_path_buf()).required(false));

        // Environment variables (MOCKS__SYNTHESIS__MAX_DEPTH=8)
        builder = builder.add_source(
            Environment::with_prefix("MOCKS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Schema directory for a project whose config file is `config_path`
    pub fn schema_dir(&self, config_path: &Path) -> PathBuf {
        if self.project.schema_dir.is_absolute() {
            return self.project.schema_dir.clone();
        }
        config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&self.project.schema_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = MockConfig::default();
        assert_eq!(config.project.schema_dir, PathBuf::from("schemas"));
        assert_eq!(config.synthesis.max_depth, 32);
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_serialize_config() {
        let toml_str = MockConfig::default().to_toml().unwrap();
        assert!(toml_str.contains("[project]"));
        assert!(toml_str.contains("[synthesis]"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mocks.toml");
        fs::write(
            &path,
            "[project]\nschema_dir = \"types\"\n\n[synthesis]\nmax_depth = 4\n\n[output]\nformat = \"compact\"\n",
        )
        .unwrap();

        let config = MockConfig::load_from(&path).unwrap();
        assert_eq!(config.project.schema_dir, PathBuf::from("types"));
        assert_eq!(config.synthesis.max_depth, 4);
        assert_eq!(config.output.format, OutputFormat::Compact);
        assert_eq!(config.schema_dir(&path), dir.path().join("types"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = MockConfig::load_from(&dir.path().join("mocks.toml")).unwrap();
        assert_eq!(config.project.schema_dir, PathBuf::from("schemas"));
    }

    #[test]
    fn test_absolute_schema_dir_kept() {
        let mut config = MockConfig::default();
        config.project.schema_dir = PathBuf::from("/opt/schemas");
        assert_eq!(
            config.schema_dir(Path::new("/work/mocks.toml")),
            PathBuf::from("/opt/schemas")
        );
    }
}
