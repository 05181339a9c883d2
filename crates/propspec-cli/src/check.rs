//! # Check Subcommand
//!
//! Verifies that every declaration file in the configured directory parses
//! and builds a well-formed schema, then that the files together form a
//! valid table (no duplicate component names). Every broken file is
//! reported, not only the first.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use propspec_schema::{load_declaration_file, DeclarationFormat};

use crate::config::{OutputFormat, Settings};
use crate::{load_table, EXIT_LOAD_FAILURE};

/// Outcome of checking one declaration file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FileCheck {
    /// Declaration file that was checked.
    pub path: PathBuf,
    /// Component name on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileCheck {
    /// True when the file built a schema on its own.
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Check each declaration file in `dir` independently, in file-name order.
pub fn check_files(dir: &Path) -> Result<Vec<FileCheck>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read declaration directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && DeclarationFormat::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .map(|path| {
            match load_declaration_file(&path).and_then(|decl| decl.into_schema()) {
                Ok(schema) => FileCheck {
                    path,
                    component: Some(schema.name().to_string()),
                    error: None,
                },
                Err(e) => FileCheck {
                    path,
                    component: None,
                    error: Some(e.to_string()),
                },
            }
        })
        .collect())
}

/// Execute the check subcommand.
pub fn run_check(settings: &Settings) -> Result<u8> {
    let checks = check_files(&settings.declarations)?;
    let failed = checks.iter().filter(|c| !c.passed()).count();

    match settings.format {
        OutputFormat::Text => {
            for check in &checks {
                match (&check.component, &check.error) {
                    (_, Some(error)) => println!("FAIL {}: {error}", check.path.display()),
                    (Some(name), None) => println!("ok   {} ({name})", check.path.display()),
                    (None, None) => {}
                }
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&checks)?),
    }

    if failed > 0 {
        tracing::error!(failed, total = checks.len(), "declaration check failed");
        return Ok(EXIT_LOAD_FAILURE);
    }

    // Cross-file invariants only hold once every file builds on its own.
    let table = load_table(settings)?;
    if settings.format == OutputFormat::Text {
        println!("{} component(s) OK", table.len());
    }
    Ok(0)
}
