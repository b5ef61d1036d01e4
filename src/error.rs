//! Error types for mock generation

use thiserror::Error;

/// Result type for mock operations
pub type Result<T> = std::result::Result<T, MockError>;

/// Mock generation errors
#[derive(Error, Debug)]
pub enum MockError {
    #[error("Type {name} not found in project{}", format_suggestions(.suggestions))]
    TypeNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),

    #[error(transparent)]
    Load(#[from] anyhow::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

impl MockError {
    /// Whether this error means the requested type does not exist
    pub fn is_type_not_found(&self) -> bool {
        matches!(self, MockError::TypeNotFound { .. })
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
