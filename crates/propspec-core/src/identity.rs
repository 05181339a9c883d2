//! # Schema Identifier Newtypes
//!
//! Newtype wrappers for component, prop and event names. These keep the
//! three namespaces apart: a `PropName` cannot be passed where an
//! `EventName` is expected.
//!
//! Names are matched exactly and case-sensitively. Each type implements
//! `Borrow<str>` so maps keyed by a name can be queried with a plain `&str`.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Name of a component, e.g. `QBtnDropdown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName(String);

/// Name of a prop within one component, e.g. `textColor`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PropName(String);

/// Name of an event emitted by a component, e.g. `before-show`.
///
/// Stored without the `@` prefix used by listener bindings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

/// Prefix marking a listener binding in a supplied value set.
pub const LISTENER_PREFIX: char = '@';

fn check_common(kind: &'static str, raw: &str) -> Result<(), IdentifierError> {
    let reject = |reason| IdentifierError {
        kind,
        value: raw.to_string(),
        reason,
    };
    if raw.is_empty() {
        return Err(reject("must not be empty"));
    }
    if raw.chars().any(char::is_whitespace) {
        return Err(reject("must not contain whitespace"));
    }
    if raw.starts_with(LISTENER_PREFIX) {
        return Err(reject("must not start with '@'"));
    }
    Ok(())
}

impl ComponentName {
    /// Validate and wrap a component name.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        check_common("component", &raw)?;
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PropName {
    /// Validate and wrap a prop name.
    ///
    /// Literal variant spellings such as `type="submit"` are rejected; they
    /// are folded into the base prop's descriptor before a schema is built.
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        check_common("prop", &raw)?;
        if raw.contains(['=', '"', '\'']) {
            return Err(IdentifierError {
                kind: "prop",
                value: raw,
                reason: "must not contain '=' or quotes",
            });
        }
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl EventName {
    /// Validate and wrap an event name (without the `@` prefix).
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentifierError> {
        let raw = raw.into();
        check_common("event", &raw)?;
        Ok(Self(raw))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value-set key that binds a listener to this event (`@name`).
    pub fn listener_key(&self) -> String {
        format!("{LISTENER_PREFIX}{}", self.0)
    }
}

macro_rules! impl_name_traits {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $ty {
            type Error = IdentifierError;

            fn try_from(raw: String) -> Result<Self, Self::Error> {
                Self::new(raw)
            }
        }

        impl From<$ty> for String {
            fn from(name: $ty) -> String {
                name.0
            }
        }
    )*};
}

impl_name_traits!(ComponentName, PropName, EventName);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_name_accepts_identifier() {
        let name = ComponentName::new("QBtnDropdown").unwrap();
        assert_eq!(name.as_str(), "QBtnDropdown");
        assert_eq!(name.to_string(), "QBtnDropdown");
    }

    #[test]
    fn empty_names_rejected() {
        assert!(ComponentName::new("").is_err());
        assert!(PropName::new("").is_err());
        assert!(EventName::new("").is_err());
    }

    #[test]
    fn whitespace_rejected() {
        let err = PropName::new("text color").unwrap_err();
        assert_eq!(err.kind, "prop");
        assert!(err.to_string().contains("whitespace"));
    }

    #[test]
    fn literal_variant_spelling_is_not_a_prop_name() {
        assert!(PropName::new("type=\"submit\"").is_err());
        assert!(PropName::new("align='left'").is_err());
    }

    #[test]
    fn event_names_allow_dashes_but_not_prefix() {
        let name = EventName::new("before-show").unwrap();
        assert_eq!(name.listener_key(), "@before-show");
        assert!(EventName::new("@before-show").is_err());
    }

    #[test]
    fn names_are_case_sensitive() {
        let a = PropName::new("label").unwrap();
        let b = PropName::new("Label").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn serde_rejects_invalid_name() {
        let ok: Result<PropName, _> = serde_json::from_str("\"label\"");
        assert!(ok.is_ok());
        let bad: Result<PropName, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
