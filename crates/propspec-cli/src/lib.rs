//! # propspec-cli: Command-Line Interface
//!
//! Provides the `propspec` command for checking component prop values
//! against component declarations from the shell or CI.
//!
//! ## Subcommands
//!
//! - `propspec validate <COMPONENT> <VALUES>`: validate a JSON/YAML value set.
//! - `propspec list`: list declared components.
//! - `propspec describe <COMPONENT>`: show a component's props and events.
//! - `propspec check`: verify that a declaration directory loads cleanly.
//!
//! ```bash
//! propspec --declarations declarations validate QTime usage.json
//! propspec --format json validate QSelect usage.yaml
//! propspec describe QBtnDropdown
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live here.
//! - Handlers return an exit code; no business logic beyond loading and
//!   printing. Validation is delegated to `propspec-schema`.

pub mod check;
pub mod config;
pub mod describe;
pub mod validate;

use anyhow::{Context, Result};
use propspec_schema::SchemaTable;

use crate::config::Settings;

/// Exit code for a value set with field errors.
pub const EXIT_INVALID: u8 = 1;

/// Exit code for load-time failures (unreadable files, malformed schemas).
pub const EXIT_LOAD_FAILURE: u8 = 2;

/// Load the schema table from the configured declaration directory.
pub fn load_table(settings: &Settings) -> Result<SchemaTable> {
    SchemaTable::load_dir(&settings.declarations).with_context(|| {
        format!(
            "failed to load declarations from {}",
            settings.declarations.display()
        )
    })
}
