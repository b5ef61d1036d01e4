//! Familiar Mocks
//!
//! Test-data helper for the Familiar platform: synthesize a plausible sample
//! value for a named schema type, then deep-merge caller overrides on top.
//!
//! ## Features
//!
//! - **Project Discovery**: `mocks.toml` is found by walking up from the working directory
//! - **Schema Loading**: JSON Schema documents become a typed graph of declarations
//! - **Sample Synthesis**: fixed placeholders per primitive, one-element arrays, first enum member
//! - **Deep Merge**: overrides replace leaves, arrays and dates; nested objects merge per field
//!
//! ## Usage
//!
//! ```no_run
//! use familiar_mocks::{generate_mock, SampleValue};
//!
//! let overrides = SampleValue::from(serde_json::json!({
//!     "name": "George",
//!     "address": { "city": "Akron" }
//! }));
//! let user = generate_mock("UserProfile", &overrides)?;
//! assert_eq!(user.get("name").and_then(SampleValue::as_str), Some("George"));
//! # Ok::<(), familiar_mocks::MockError>(())
//! ```
//!
//! ## Project Layout
//!
//! ```text
//! my-project/
//! ├── mocks.toml              # [project] schema_dir = "schemas"
//! └── schemas/
//!     ├── UserProfile.schema.json
//!     └── common/
//!         └── Address.schema.json
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod locate;
pub mod merge;
pub mod resolve;
pub mod synth;
pub mod types;
pub mod value;

pub use config::{MockConfig, OutputFormat};
pub use error::{MockError, Result};
pub use generator::MockGenerator;
pub use graph::{SchemaDirLoader, SourceFile, TypeGraph, TypeGraphLoader};
pub use locate::{locate_config, PROJECT_CONFIG_FILE};
pub use merge::{deep_merge, merge_into, Mergeable};
pub use resolve::{resolve_ref, resolve_type};
pub use synth::{synthesize, Synthesizer};
pub use types::{EnumMember, Literal, Property, TypeDescription};
pub use value::SampleValue;

/// Generate a mock of `type_name` for the project around the current directory.
///
/// Fails with [`MockError::TypeNotFound`] when no declaration of that name exists.
pub fn generate_mock(type_name: &str, overrides: &SampleValue) -> Result<SampleValue> {
    MockGenerator::default().generate_mock(type_name, overrides)
}
