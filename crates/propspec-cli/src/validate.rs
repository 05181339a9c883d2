//! # Validate Subcommand
//!
//! Validates a value set read from a JSON or YAML file against one
//! component and prints the diagnostics.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use propspec_core::{PropValue, PropValues};
use propspec_schema::{render, Report, Validator};

use crate::config::{OutputFormat, Settings};
use crate::{load_table, EXIT_INVALID};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Component name, matched exactly (e.g. `QTime`).
    pub component: String,

    /// JSON or YAML file holding a mapping of prop name to value.
    pub values: PathBuf,
}

/// Read a value set. `.yaml`/`.yml` files are YAML, everything else JSON.
pub fn load_values(path: &Path) -> Result<PropValues> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read value set {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value: serde_json::Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?,
    };
    match value {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, PropValue::from(v)))
            .collect()),
        other => bail!(
            "value set {} must be a mapping of prop names to values, found {}",
            path.display(),
            PropValue::from(other).kind()
        ),
    }
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<u8> {
    let table = load_table(settings)?;
    let values = load_values(&args.values)?;
    let result = Validator::new(&table).validate_component(&args.component, &values)?;

    match settings.format {
        OutputFormat::Text => {
            for line in render(&result) {
                eprintln!("{line}");
            }
            if result.valid {
                println!("{}: OK", result.component);
            } else {
                println!(
                    "{}: {} problem(s) found",
                    result.component,
                    result.error_count()
                );
            }
        }
        OutputFormat::Json => {
            let report = Report::from_result(&result);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(if result.valid { 0 } else { EXIT_INVALID })
}
