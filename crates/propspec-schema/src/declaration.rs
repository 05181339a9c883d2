//! # Component Declarations
//!
//! The on-disk form of a component schema and its conversion into a
//! checked [`ComponentSchema`].
//!
//! ## Format
//!
//! ```yaml
//! name: QBtnDropdown
//! events:
//!   - name: before-show
//!     params: [evt]
//! props:
//!   - name: label
//!     type: [String, Number]
//!   - name: align
//!     type: String
//!   - name: align="left"
//!     type: String
//!   - name: align="right"
//!     type: String
//! ```
//!
//! `type` is a type expression (`"Boolean|'a'|null"`) or a list of them.
//!
//! ## Literal Variant Folding
//!
//! Component libraries often list an enumerated prop once generically and
//! once more per option (`align="left"`, `align="right"`). These entries are
//! not props. Every variant entry folds into its base prop: the base's
//! `String` member is replaced by the union of the variant literals, other
//! members are kept. A variant without a base prop, or whose base does not
//! accept `String`, is a malformed schema.
//!
//! A variant entry only names an option. It must be typed `String` and may
//! not set `required` or `default`; those belong on the base prop. Its
//! `description` is tooltip text for the option and is not kept. A literal
//! containing both `'` and `"` has no expression spelling and is rejected.

use std::path::Path;

use propspec_core::{
    ComponentName, ComponentSchema, DescriptorError, EventName, EventSpec, Literal,
    PrimitiveKind, PropName, PropSpec, PropValue, SchemaError, TypeDescriptor,
};
use serde::{Deserialize, Serialize};

/// One component as written in a declaration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDeclaration {
    /// Component name.
    pub name: String,
    /// Tooltip text for the component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Props, in declaration order, including literal variant entries.
    #[serde(default)]
    pub props: Vec<PropDeclaration>,
    /// Emitted events.
    #[serde(default)]
    pub events: Vec<EventDeclaration>,
}

/// One prop entry of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropDeclaration {
    /// Prop name, or `base="literal"` for a literal variant entry.
    pub name: String,
    /// Accepted type expression(s).
    #[serde(rename = "type")]
    pub accepted: TypeExpr,
    /// Whether the prop must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Value used when absent. `null` is indistinguishable from no default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Tooltip text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One event entry of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventDeclaration {
    /// Event name, without `@`.
    pub name: String,
    /// Handler parameter names.
    #[serde(default)]
    pub params: Vec<String>,
    /// Tooltip text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A `type` field: one expression or a list of expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeExpr {
    /// `type: String|Number`
    One(String),
    /// `type: [String, Number]`
    Many(Vec<String>),
}

impl TypeExpr {
    /// Parse into a descriptor. A list is the union of its entries.
    pub fn to_descriptor(&self) -> Result<TypeDescriptor, DescriptorError> {
        match self {
            Self::One(expr) => expr.parse(),
            Self::Many(exprs) => TypeDescriptor::union(
                exprs
                    .iter()
                    .map(|e| e.parse::<TypeDescriptor>())
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        }
    }
}

/// File format of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    /// `.json`
    Json,
    /// `.yaml` / `.yml`
    Yaml,
}

impl DeclarationFormat {
    /// Format implied by a file extension, or `None` for other files.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Self::Json),
            Some("yaml" | "yml") => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parse declaration text. `origin` labels errors (usually the file path).
///
/// # Errors
///
/// Returns [`SchemaError::DeclarationParse`] for syntax errors and unknown
/// fields.
pub fn parse_declaration(
    content: &str,
    format: DeclarationFormat,
    origin: &str,
) -> Result<ComponentDeclaration, SchemaError> {
    let parsed = match format {
        DeclarationFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DeclarationFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|reason| SchemaError::DeclarationParse {
        path: origin.to_string(),
        reason,
    })
}

/// Read and parse one declaration file, format chosen by extension.
///
/// # Errors
///
/// Returns [`SchemaError::Io`] if the file cannot be read and
/// [`SchemaError::DeclarationParse`] if it cannot be parsed or has an
/// unsupported extension.
pub fn load_declaration_file(path: &Path) -> Result<ComponentDeclaration, SchemaError> {
    let origin = path.display().to_string();
    let format = DeclarationFormat::from_path(path).ok_or_else(|| {
        SchemaError::DeclarationParse {
            path: origin.clone(),
            reason: "unsupported extension; expected .json, .yaml or .yml".to_string(),
        }
    })?;
    let content = std::fs::read_to_string(path)?;
    parse_declaration(&content, format, &origin)
}

/// Split `base="literal"` (or single quotes) into its parts.
///
/// Returns `None` when `name` has no `=`, and `Some(Err(..))` when it has
/// one but is not a well-formed variant entry.
fn parse_variant(name: &str) -> Option<Result<(&str, &str), String>> {
    let (base, rest) = name.split_once('=')?;
    let literal = ['"', '\'']
        .into_iter()
        .find_map(|q| rest.strip_prefix(q).and_then(|r| r.strip_suffix(q)));
    Some(match literal {
        Some(lit) if lit.contains('\'') && lit.contains('"') => Err(format!(
            "literal variant entry '{name}' mixes single and double quotes"
        )),
        Some(lit) if !base.is_empty() => Ok((base, lit)),
        _ => Err(format!(
            "malformed literal variant entry '{name}'; expected base=\"literal\""
        )),
    })
}

/// A variant entry carries no typing of its own beyond `String`.
fn check_variant_entry(decl: &PropDeclaration) -> Result<(), String> {
    let string = TypeDescriptor::primitive(PrimitiveKind::String);
    match decl.accepted.to_descriptor() {
        Ok(d) if d == string => {}
        Ok(d) => {
            return Err(format!(
                "literal variant entry '{}' must be typed String, found {d}",
                decl.name
            ))
        }
        Err(e) => return Err(format!("literal variant entry '{}': {e}", decl.name)),
    }
    if decl.required {
        return Err(format!(
            "literal variant entry '{}' must not be required",
            decl.name
        ));
    }
    if decl.default.is_some() {
        return Err(format!(
            "literal variant entry '{}' must not declare a default",
            decl.name
        ));
    }
    Ok(())
}

/// Replace the `String` member of `base` with the given string literals.
fn fold_literals(
    base: &TypeDescriptor,
    literals: &[String],
) -> Result<TypeDescriptor, String> {
    if !base.has_primitive(PrimitiveKind::String) {
        return Err(format!(
            "literal variants require a String-typed base prop, found {base}"
        ));
    }
    let mut members = Vec::with_capacity(base.members().len() + literals.len());
    for member in base.members() {
        if matches!(member, TypeDescriptor::Primitive(PrimitiveKind::String)) {
            members.extend(
                literals
                    .iter()
                    .map(|l| TypeDescriptor::literal(Literal::String(l.clone()))),
            );
        } else {
            members.push(member.clone());
        }
    }
    TypeDescriptor::union(members).map_err(|e| e.to_string())
}

impl ComponentDeclaration {
    /// Convert into a checked schema, folding literal variant entries.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedSchema`] for an invalid component,
    /// prop or event name, an unparseable type expression, a dangling or
    /// malformed variant entry, or any [`ComponentSchema::new`] violation.
    pub fn into_schema(self) -> Result<ComponentSchema, SchemaError> {
        let component = self.name.clone();
        let malformed = |reason: String| SchemaError::malformed(component.as_str(), reason);

        let name = ComponentName::new(self.name).map_err(|e| malformed(e.to_string()))?;

        let mut specs: Vec<PropSpec> = Vec::with_capacity(self.props.len());
        let mut variants: Vec<(String, String)> = Vec::new();

        for decl in self.props {
            if let Some(variant) = parse_variant(&decl.name) {
                let (base, literal) = variant.map_err(&malformed)?;
                check_variant_entry(&decl).map_err(&malformed)?;
                variants.push((base.to_string(), literal.to_string()));
                continue;
            }

            let prop_name = PropName::new(decl.name).map_err(|e| malformed(e.to_string()))?;
            let accepted = decl
                .accepted
                .to_descriptor()
                .map_err(|e| malformed(format!("prop '{prop_name}': {e}")))?;

            let mut spec = PropSpec::new(prop_name, accepted);
            if decl.required {
                spec = spec.required();
            }
            if let Some(default) = decl.default {
                spec = spec.with_default(PropValue::from(default));
            }
            if let Some(description) = decl.description {
                spec = spec.with_description(description);
            }
            specs.push(spec);
        }

        // Grouped per base prop, in first-seen order.
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (base, literal) in variants {
            match grouped.iter_mut().find(|(b, _)| *b == base) {
                Some((_, literals)) if literals.contains(&literal) => {}
                Some((_, literals)) => literals.push(literal),
                None => grouped.push((base, vec![literal])),
            }
        }
        for (base, literals) in &grouped {
            let spec = specs
                .iter_mut()
                .find(|s| s.name().as_str() == base.as_str())
                .ok_or_else(|| {
                    malformed(format!(
                        "literal variants {literals:?} have no base prop '{base}'"
                    ))
                })?;
            let folded = fold_literals(spec.accepted(), literals)
                .map_err(|reason| malformed(format!("prop '{base}': {reason}")))?;
            *spec = spec.clone().with_accepted(folded);
        }

        let events = self
            .events
            .into_iter()
            .map(|decl| {
                let event = EventName::new(decl.name).map_err(|e| malformed(e.to_string()))?;
                let mut spec = EventSpec::new(event).with_params(decl.params);
                if let Some(description) = decl.description {
                    spec = spec.with_description(description);
                }
                Ok(spec)
            })
            .collect::<Result<Vec<_>, SchemaError>>()?;

        let schema = ComponentSchema::new(name, specs, events)?;
        Ok(match self.description {
            Some(description) => schema.with_description(description),
            None => schema,
        })
    }
}
