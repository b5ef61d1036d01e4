//! Schema Mock CLI
//!
//! Prints a sample value for a schema type, with optional overrides.

use clap::Parser;
use familiar_mocks::{MockGenerator, OutputFormat, Result, SampleValue};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-mock")]
#[command(about = "Generate a sample value for a schema type")]
struct Cli {
    /// Type to mock (type alias, interface or exported symbol)
    #[arg(required_unless_present = "print_config")]
    type_name: Option<String>,

    /// Overrides as a JSON object
    #[arg(short, long)]
    overrides: Option<String>,

    /// Read overrides from a JSON file
    #[arg(long, conflicts_with = "overrides")]
    overrides_file: Option<PathBuf>,

    /// Directory to start the mocks.toml search from (defaults to current directory)
    #[arg(short, long)]
    project: Option<PathBuf>,

    /// Print the resolved type description instead of a mock
    #[arg(long)]
    describe: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,

    /// Single-line JSON output
    #[arg(long)]
    compact: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut generator = MockGenerator::default();
    if let Some(project) = &cli.project {
        generator = generator.with_start_dir(project);
    }

    let config = generator.config()?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // clap enforces TYPE_NAME unless --print-config was given
    let type_name = cli.type_name.as_deref().unwrap_or_default();
    let compact = cli.compact || config.output.format == OutputFormat::Compact;

    let output = if cli.describe {
        let ty = generator.describe(type_name)?;
        render(&ty, compact)?
    } else {
        let overrides = read_overrides(&cli)?;
        let mock = generator.generate_mock(type_name, &overrides)?;
        render(&mock, compact)?
    };

    println!("{}", output);
    Ok(())
}

fn read_overrides(cli: &Cli) -> Result<SampleValue> {
    let raw = match (&cli.overrides, &cli.overrides_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Ok(SampleValue::empty_object()),
    };

    let json: serde_json::Value = serde_json::from_str(&raw)?;
    Ok(SampleValue::from(json))
}

fn render<T: serde::Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use familiar_mocks::MockError;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("schema-mock").chain(args.iter().copied()))
    }

    #[test]
    fn test_inline_overrides() {
        let overrides = read_overrides(&cli(&["User", "-o", r#"{"name": "George"}"#])).unwrap();
        assert_eq!(overrides.get("name").and_then(SampleValue::as_str), Some("George"));
    }

    #[test]
    fn test_invalid_overrides_are_json_errors() {
        let err = read_overrides(&cli(&["User", "-o", "{ nope"])).unwrap_err();
        assert!(matches!(err, MockError::Json(_)));
    }

    #[test]
    fn test_missing_overrides_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let args = cli(&["User", "--overrides-file", missing.to_str().unwrap()]);

        let err = read_overrides(&args).unwrap_err();
        assert!(matches!(err, MockError::Io(_)));
    }

    #[test]
    fn test_type_name_optional_only_with_print_config() {
        assert!(cli(&["--print-config"]).type_name.is_none());
        assert!(Cli::try_parse_from(["schema-mock"]).is_err());
    }
}
