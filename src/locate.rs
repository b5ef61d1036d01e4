//! Project configuration lookup
//!
//! Walks from a start directory towards the filesystem root looking for the
//! project configuration file. Only existence is checked; the file is not read.

use std::path::{Component, Path, PathBuf};

/// Name of the project configuration file
pub const PROJECT_CONFIG_FILE: &str = "mocks.toml";

/// Find the nearest `mocks.toml` at or above `start_dir`
pub fn locate_config(start_dir: &Path) -> Option<PathBuf> {
    locate_file(start_dir, PROJECT_CONFIG_FILE)
}

/// Find the nearest file called `file_name` at or above `start_dir`.
///
/// Relative start directories are resolved against the current directory, and
/// `.`/`..` components are folded away before walking up.
pub fn locate_file(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let start = if start_dir.is_absolute() {
        normalize(start_dir)
    } else {
        normalize(&std::env::current_dir().ok()?.join(start_dir))
    };

    // `ancestors` stops once the parent equals the current directory (root)
    start
        .ancestors()
        .map(|dir| dir.join(file_name))
        .find(|candidate| candidate.is_file())
}

/// Lexically normalize `path`; `..` at the root stays at the root
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::ParentDir => {
                if normalized.file_name().is_some() {
                    normalized.pop();
                }
            }
            Component::CurDir => {}
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Fallback used when no configuration file is found
pub fn default_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_default()
        .join(PROJECT_CONFIG_FILE)
}
