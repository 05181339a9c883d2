//! # CLI Configuration
//!
//! Settings come from, in order of precedence:
//!
//! 1. command-line flags (`--declarations`, `--format`);
//! 2. a YAML config file (`--config <FILE>`, or `propspec.yaml` in the
//!    working directory when present);
//! 3. the `PROPSPEC_DECLARATIONS` environment variable (directory only);
//! 4. built-in defaults (`declarations/`, text output).
//!
//! A relative `declarations` path in a config file is resolved against the
//! directory containing that file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "propspec.yaml";

/// Environment variable naming the declaration directory.
pub const DECLARATIONS_ENV: &str = "PROPSPEC_DECLARATIONS";

/// Declaration directory used when nothing else names one.
pub const DEFAULT_DECLARATIONS_DIR: &str = "declarations";

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One diagnostic line per problem.
    #[default]
    Text,
    /// A JSON document.
    Json,
}

/// Contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory of component declarations.
    #[serde(default)]
    pub declarations: Option<PathBuf>,
    /// Default output format.
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl ConfigFile {
    /// Read and parse a config file, resolving `declarations` relative to it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        if let (Some(dir), Some(base)) = (&config.declarations, path.parent()) {
            if dir.is_relative() {
                config.declarations = Some(base.join(dir));
            }
        }
        Ok(config)
    }

    /// Load the explicit config file, or `propspec.yaml` in `cwd` if it exists.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::load(path).map(Some),
            None => {
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                if candidate.is_file() {
                    tracing::debug!(path = %candidate.display(), "using config file");
                    Self::load(&candidate).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }
}

/// Effective settings after merging every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory of component declarations.
    pub declarations: PathBuf,
    /// Output format.
    pub format: OutputFormat,
}

impl Settings {
    /// Merge sources by precedence: flags, config file, environment, defaults.
    pub fn resolve(
        declarations_flag: Option<PathBuf>,
        format_flag: Option<OutputFormat>,
        file: Option<ConfigFile>,
        env_declarations: Option<String>,
    ) -> Self {
        let file = file.unwrap_or_default();
        let declarations = declarations_flag
            .or(file.declarations)
            .or_else(|| env_declarations.filter(|s| !s.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DECLARATIONS_DIR));
        let format = format_flag.or(file.format).unwrap_or_default();
        Self {
            declarations,
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let settings = Settings::resolve(None, None, None, None);
        assert_eq!(settings.declarations, PathBuf::from("declarations"));
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn flags_override_file_and_env() {
        let file = ConfigFile {
            declarations: Some(PathBuf::from("/from/file")),
            format: Some(OutputFormat::Json),
        };
        let settings = Settings::resolve(
            Some(PathBuf::from("/from/flag")),
            Some(OutputFormat::Text),
            Some(file),
            Some("/from/env".to_string()),
        );
        assert_eq!(settings.declarations, PathBuf::from("/from/flag"));
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn file_overrides_env() {
        let file = ConfigFile {
            declarations: Some(PathBuf::from("/from/file")),
            format: None,
        };
        let settings = Settings::resolve(None, None, Some(file), Some("/from/env".to_string()));
        assert_eq!(settings.declarations, PathBuf::from("/from/file"));
    }

    #[test]
    fn env_used_when_no_flag_or_file() {
        let settings = Settings::resolve(None, None, None, Some("/from/env".to_string()));
        assert_eq!(settings.declarations, PathBuf::from("/from/env"));
        let empty = Settings::resolve(None, None, None, Some(String::new()));
        assert_eq!(empty.declarations, PathBuf::from(DEFAULT_DECLARATIONS_DIR));
    }

    #[test]
    fn config_file_paths_resolve_relative_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("propspec.yaml");
        std::fs::write(&path, "declarations: decls\nformat: json\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(config.declarations, Some(dir.path().join("decls")));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn discover_finds_default_file_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ConfigFile::discover(None, dir.path()).unwrap(), None);

        std::fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "format: text\n").unwrap();
        let found = ConfigFile::discover(None, dir.path()).unwrap().unwrap();
        assert_eq!(found.format, Some(OutputFormat::Text));
    }

    #[test]
    fn unknown_config_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "declaration_dir: x\n").unwrap();
        assert!(ConfigFile::load(&path).is_err());
    }
}
