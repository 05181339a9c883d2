//! # Type Descriptors
//!
//! A [`TypeDescriptor`] states which values a prop accepts:
//!
//! - `Primitive(kind)` matches any value of that runtime kind. `Array` and
//!   `Object` are structural: element and field types are not checked.
//! - `LiteralValue(lit)` matches only a value equal to `lit`.
//! - `Union(members)` matches when any member matches.
//!
//! ## Union Invariant
//!
//! A union is never empty, never nests another union, and never repeats a
//! member. [`TypeDescriptor::union`] is the only way to build one; it
//! flattens nested unions, drops duplicates (first occurrence wins) and
//! collapses a single survivor to the member itself.
//!
//! ## Expression Syntax
//!
//! Descriptors display as, and parse from, `|`-separated terms:
//!
//! ```text
//! Boolean|Object
//! 'a'|'submit'|'button'|'reset'
//! String|null
//! ```
//!
//! A term is a primitive name, `null`, `true`, `false`, a JSON number, or a
//! single- or double-quoted string. Quoted strings have no escape sequences,
//! so a string literal cannot contain both quote characters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DescriptorError;
use crate::value::{Literal, PrimitiveKind, PropValue};

/// An accepted value shape.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// Any value of the given kind.
    Primitive(PrimitiveKind),
    /// Exactly this constant.
    LiteralValue(Literal),
    /// Any of the members. Built only through [`TypeDescriptor::union`].
    Union(UnionMembers),
}

/// The flattened, deduplicated, non-empty member list of a union.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionMembers(Vec<TypeDescriptor>);

impl UnionMembers {
    /// Members in declaration order.
    pub fn as_slice(&self) -> &[TypeDescriptor] {
        &self.0
    }

    /// Iterate over members in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, TypeDescriptor> {
        self.0.iter()
    }
}

impl TypeDescriptor {
    /// `Primitive(kind)`.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }

    /// `LiteralValue(literal)`.
    pub fn literal(literal: Literal) -> Self {
        Self::LiteralValue(literal)
    }

    /// `LiteralValue(null)`, the explicit "unset" member.
    pub fn null() -> Self {
        Self::LiteralValue(Literal::Null)
    }

    /// Build a union, enforcing the union invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::EmptyUnion`] when `members` is empty.
    pub fn union<I>(members: I) -> Result<Self, DescriptorError>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut flat: Vec<TypeDescriptor> = Vec::new();
        for member in members {
            match member {
                // Existing unions are already flat, one level suffices.
                Self::Union(inner) => {
                    for d in inner.0 {
                        push_unique(&mut flat, d);
                    }
                }
                other => push_unique(&mut flat, other),
            }
        }
        match flat.len() {
            0 => Err(DescriptorError::EmptyUnion),
            1 => Ok(flat.remove(0)),
            _ => Ok(Self::Union(UnionMembers(flat))),
        }
    }

    /// True when `value` is accepted.
    pub fn matches(&self, value: &PropValue) -> bool {
        match self {
            Self::Primitive(kind) => kind.value_kind() == value.kind(),
            Self::LiteralValue(literal) => literal.matches(value),
            Self::Union(members) => members.iter().any(|m| m.matches(value)),
        }
    }

    /// Members of a union, or a one-element slice holding `self`.
    pub fn members(&self) -> &[TypeDescriptor] {
        match self {
            Self::Union(members) => members.as_slice(),
            other => std::slice::from_ref(other),
        }
    }

    /// True when any member is `Primitive(kind)`.
    pub fn has_primitive(&self, kind: PrimitiveKind) -> bool {
        self.members()
            .iter()
            .any(|m| matches!(m, Self::Primitive(k) if *k == kind))
    }
}

fn push_unique(flat: &mut Vec<TypeDescriptor>, d: TypeDescriptor) {
    if !flat.contains(&d) {
        flat.push(d);
    }
}

impl From<PrimitiveKind> for TypeDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<Literal> for TypeDescriptor {
    fn from(literal: Literal) -> Self {
        Self::LiteralValue(literal)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::LiteralValue(literal) => write!(f, "{literal}"),
            Self::Union(members) => {
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{m}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let members = split_terms(expr)?
            .into_iter()
            .map(parse_term)
            .collect::<Result<Vec<_>, _>>()?;
        Self::union(members)
    }
}

/// Split on `|` outside quoted literals.
fn split_terms(expr: &str) -> Result<Vec<&str>, DescriptorError> {
    let mut terms = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    for (i, c) in expr.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '|') => {
                terms.push(&expr[start..i]);
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    if quote.is_some() {
        return Err(DescriptorError::UnterminatedLiteral(expr.to_string()));
    }
    terms.push(&expr[start..]);

    if terms.iter().any(|t| t.trim().is_empty()) {
        return Err(DescriptorError::EmptyTerm(expr.to_string()));
    }
    Ok(terms)
}

fn parse_term(term: &str) -> Result<TypeDescriptor, DescriptorError> {
    let term = term.trim();
    if let Some(kind) = PrimitiveKind::from_name(term) {
        return Ok(TypeDescriptor::Primitive(kind));
    }
    let literal = match term {
        "null" => Literal::Null,
        "true" => Literal::Boolean(true),
        "false" => Literal::Boolean(false),
        _ => {
            let quoted = ['\'', '"'].into_iter().find_map(|q| {
                term.strip_prefix(q)
                    .and_then(|rest| rest.strip_suffix(q))
            });
            match quoted {
                Some(inner) if term.len() >= 2 => Literal::String(inner.to_string()),
                _ => term
                    .parse::<serde_json::Number>()
                    .map(Literal::Number)
                    .map_err(|_| DescriptorError::UnknownTerm(term.to_string()))?,
            }
        }
    };
    Ok(TypeDescriptor::LiteralValue(literal))
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TypeDescriptor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let expr = String::deserialize(deserializer)?;
        expr.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn v(value: serde_json::Value) -> PropValue {
        PropValue::from(value)
    }

    #[test]
    fn primitive_matches_kind() {
        let d = TypeDescriptor::primitive(PrimitiveKind::Boolean);
        assert!(d.matches(&v(json!(true))));
        assert!(!d.matches(&v(json!("true"))));
        assert!(!d.matches(&PropValue::Null));
    }

    #[test]
    fn array_and_object_are_structural() {
        let arr = TypeDescriptor::primitive(PrimitiveKind::Array);
        let obj = TypeDescriptor::primitive(PrimitiveKind::Object);
        assert!(arr.matches(&v(json!([]))));
        assert!(arr.matches(&v(json!([1, "mixed", null]))));
        assert!(!arr.matches(&v(json!({}))));
        assert!(obj.matches(&v(json!({"days": []}))));
        assert!(!obj.matches(&PropValue::function("f")));
    }

    #[test]
    fn function_primitive_matches_function_reference() {
        let d = TypeDescriptor::primitive(PrimitiveKind::Function);
        assert!(d.matches(&PropValue::function("filterFn")));
        assert!(!d.matches(&v(json!("filterFn"))));
    }

    #[test]
    fn union_of_boolean_and_null() {
        let d = TypeDescriptor::union([
            TypeDescriptor::primitive(PrimitiveKind::Boolean),
            TypeDescriptor::null(),
        ])
        .unwrap();
        assert!(d.matches(&v(json!(true))));
        assert!(d.matches(&PropValue::Null));
        assert!(!d.matches(&v(json!("x"))));
    }

    #[test]
    fn empty_union_rejected() {
        let err = TypeDescriptor::union(Vec::new()).unwrap_err();
        assert_eq!(err, DescriptorError::EmptyUnion);
    }

    #[test]
    fn nested_union_is_flattened() {
        let inner = TypeDescriptor::union([
            TypeDescriptor::primitive(PrimitiveKind::String),
            TypeDescriptor::primitive(PrimitiveKind::Number),
        ])
        .unwrap();
        let outer = TypeDescriptor::union([
            inner,
            TypeDescriptor::primitive(PrimitiveKind::Array),
        ])
        .unwrap();
        assert_eq!(outer.members().len(), 3);
        assert!(outer
            .members()
            .iter()
            .all(|m| !matches!(m, TypeDescriptor::Union(_))));
        assert_eq!(outer.to_string(), "String|Number|Array");
    }

    #[test]
    fn duplicates_removed_and_single_member_collapses() {
        let d = TypeDescriptor::union([
            TypeDescriptor::primitive(PrimitiveKind::String),
            TypeDescriptor::primitive(PrimitiveKind::String),
        ])
        .unwrap();
        assert_eq!(d, TypeDescriptor::primitive(PrimitiveKind::String));
    }

    #[test]
    fn parses_primitive_unions() {
        let d: TypeDescriptor = "Array|String|Object".parse().unwrap();
        assert_eq!(
            d.members(),
            &[
                TypeDescriptor::primitive(PrimitiveKind::Array),
                TypeDescriptor::primitive(PrimitiveKind::String),
                TypeDescriptor::primitive(PrimitiveKind::Object),
            ]
        );
    }

    #[test]
    fn parses_quoted_literals_with_spaces_and_pipes() {
        let d: TypeDescriptor = "'top left' | \"a|b\" | 'bottom right'".parse().unwrap();
        assert_eq!(d.members().len(), 3);
        assert!(d.matches(&v(json!("top left"))));
        assert!(d.matches(&v(json!("a|b"))));
        assert!(!d.matches(&v(json!("top"))));
    }

    #[test]
    fn parses_scalar_literals() {
        let d: TypeDescriptor = "null|true|42|-1.5".parse().unwrap();
        assert!(d.matches(&PropValue::Null));
        assert!(d.matches(&v(json!(true))));
        assert!(!d.matches(&v(json!(false))));
        assert!(d.matches(&v(json!(42))));
        assert!(d.matches(&v(json!(-1.5))));
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            "".parse::<TypeDescriptor>(),
            Err(DescriptorError::EmptyTerm(_))
        ));
        assert!(matches!(
            "String||Number".parse::<TypeDescriptor>(),
            Err(DescriptorError::EmptyTerm(_))
        ));
        assert!(matches!(
            "'open".parse::<TypeDescriptor>(),
            Err(DescriptorError::UnterminatedLiteral(_))
        ));
        assert!(matches!(
            "string".parse::<TypeDescriptor>(),
            Err(DescriptorError::UnknownTerm(t)) if t == "string"
        ));
    }

    #[test]
    fn display_parses_back_to_same_descriptor() {
        let d: TypeDescriptor = "'a'|'submit'|Boolean|null".parse().unwrap();
        let again: TypeDescriptor = d.to_string().parse().unwrap();
        assert_eq!(d, again);
    }

    #[test]
    fn serializes_as_expression() {
        let d: TypeDescriptor = "Number|String".parse().unwrap();
        assert_eq!(serde_json::to_value(&d).unwrap(), json!("Number|String"));
        let back: TypeDescriptor = serde_json::from_value(json!("Number|String")).unwrap();
        assert_eq!(back, d);
    }
}
