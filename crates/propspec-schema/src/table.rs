//! # Schema Table
//!
//! An immutable registry of component schemas keyed by exact,
//! case-sensitive component name.
//!
//! ## Fail-Fast Construction
//!
//! The table is built once, at load time. Any malformed declaration (empty
//! name, duplicate prop or event, bad type expression, dangling literal
//! variant) or a component registered twice aborts construction with
//! [`SchemaError::MalformedSchema`]. No partially loaded table is ever
//! returned, so validation never meets a malformed schema.
//!
//! ## Thread Safety
//!
//! `SchemaTable` is `Send + Sync` and has no mutating methods after
//! construction. Share it by reference or `Arc` across any number of
//! concurrent validation calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use propspec_core::{ComponentName, ComponentSchema, SchemaError};

use crate::declaration::{load_declaration_file, ComponentDeclaration, DeclarationFormat};

/// Component name to schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    schemas: HashMap<ComponentName, ComponentSchema>,
}

impl SchemaTable {
    /// Build a table from already-checked schemas.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedSchema`] if two schemas share a
    /// component name.
    pub fn new<I>(schemas: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ComponentSchema>,
    {
        let mut map = HashMap::new();
        for schema in schemas {
            let name = schema.name().clone();
            if map.insert(name.clone(), schema).is_some() {
                return Err(SchemaError::malformed(
                    name.as_str(),
                    "component declared more than once",
                ));
            }
        }
        Ok(Self { schemas: map })
    }

    /// Build a table from parsed declarations.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError::MalformedSchema`] raised by any
    /// declaration, or by a duplicate component name.
    pub fn from_declarations<I>(declarations: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = ComponentDeclaration>,
    {
        let schemas = declarations
            .into_iter()
            .map(ComponentDeclaration::into_schema)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(schemas)
    }

    /// Load every `*.json`, `*.yaml` and `*.yml` file in `dir`, one
    /// component per file, in file-name order. Other files are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Io`] if the directory or a file cannot be read,
    /// [`SchemaError::DeclarationParse`] if a file cannot be parsed, and
    /// [`SchemaError::MalformedSchema`] for any construction failure.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if DeclarationFormat::from_path(&path).is_some() {
                paths.push(path);
            } else {
                tracing::warn!(path = %path.display(), "skipping non-declaration file");
            }
        }
        paths.sort();

        let declarations = paths
            .iter()
            .map(|p| load_declaration_file(p))
            .collect::<Result<Vec<_>, _>>()?;
        let table = Self::from_declarations(declarations)?;

        tracing::info!(
            dir = %dir.display(),
            components = table.len(),
            "loaded component declarations"
        );
        Ok(table)
    }

    /// Look up a schema by exact component name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] if no such component is registered.
    pub fn lookup(&self, name: &str) -> Result<&ComponentSchema, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    /// Look up a schema, returning `None` if absent.
    pub fn get(&self, name: &str) -> Option<&ComponentSchema> {
        self.schemas.get(name)
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no components are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered component names, sorted alphabetically.
    pub fn component_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Iterate over schemas in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentSchema> {
        let mut schemas: Vec<&ComponentSchema> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.name().cmp(b.name()));
        schemas.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{parse_declaration, DeclarationFormat};

    fn decl(content: &str) -> ComponentDeclaration {
        parse_declaration(content, DeclarationFormat::Yaml, "test.yaml").unwrap()
    }

    fn btn() -> ComponentDeclaration {
        decl(
            r#"
name: Btn
props:
  - name: label
    type: [String, Number]
  - name: disable
    type: Boolean
"#,
        )
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let table = SchemaTable::from_declarations([btn()]).unwrap();
        assert!(table.lookup("Btn").is_ok());
        assert!(matches!(table.lookup("btn"), Err(SchemaError::NotFound(n)) if n == "btn"));
        assert!(table.get("Btn ").is_none());
    }

    #[test]
    fn duplicate_prop_fails_construction() {
        let bad = decl(
            r#"
name: Btn
props:
  - name: label
    type: String
  - name: label
    type: String
"#,
        );
        let err = SchemaTable::from_declarations([bad]).unwrap_err();
        assert!(err.is_malformed(), "{err}");
    }

    #[test]
    fn nameless_schema_fails_construction() {
        let err = SchemaTable::from_declarations([decl("name: ''\n")]).unwrap_err();
        assert!(err.is_malformed(), "{err}");
    }

    #[test]
    fn duplicate_component_fails_construction() {
        let err = SchemaTable::from_declarations([btn(), btn()]).unwrap_err();
        match err {
            SchemaError::MalformedSchema { component, reason } => {
                assert_eq!(component, "Btn");
                assert!(reason.contains("more than once"));
            }
            other => panic!("expected MalformedSchema, got {other}"),
        }
    }

    #[test]
    fn one_bad_declaration_aborts_the_whole_table() {
        let bad = decl("name: Broken\nprops:\n  - name: x\n    type: Nope\n");
        assert!(SchemaTable::from_declarations([btn(), bad]).is_err());
    }

    #[test]
    fn names_and_iteration_are_sorted() {
        let table = SchemaTable::from_declarations([
            decl("name: QTime\n"),
            btn(),
            decl("name: QSelect\n"),
        ])
        .unwrap();
        assert_eq!(table.component_names(), vec!["Btn", "QSelect", "QTime"]);
        let names: Vec<&str> = table.iter().map(|s| s.name().as_str()).collect();
        assert_eq!(names, vec!["Btn", "QSelect", "QTime"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn load_dir_reads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("Btn.yaml"),
            "name: Btn\nprops:\n  - name: disable\n    type: Boolean\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Chip.json"),
            r#"{"name": "Chip", "props": [{"name": "label", "type": "String|Number"}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("NOTES.md"), "not a declaration").unwrap();

        let table = SchemaTable::load_dir(dir.path()).unwrap();
        assert_eq!(table.component_names(), vec!["Btn", "Chip"]);
    }

    #[test]
    fn load_dir_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Bad.yaml"), "name: [unclosed\n").unwrap();
        let err = SchemaTable::load_dir(dir.path()).unwrap_err();
        match err {
            SchemaError::DeclarationParse { path, .. } => assert!(path.ends_with("Bad.yaml")),
            other => panic!("expected DeclarationParse, got {other}"),
        }
    }

    #[test]
    fn load_dir_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaTable::load_dir(dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }

    #[test]
    fn table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaTable>();
    }
}
