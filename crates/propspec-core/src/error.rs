//! # Error Types: Structured Error Hierarchy
//!
//! Defines the load-time error types for component schemas. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Prop validation problems (missing, mistyped, unknown props) are never
//!   errors. They are data inside a validation result.
//! - A malformed schema is the only fatal condition. It surfaces when the
//!   schema or schema table is built, before any value set is validated.
//! - Every malformed-schema error names the component and the reason.

use thiserror::Error;

/// Load-time failure building or looking up component schemas.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A declaration violates a schema invariant. Aborts use of the table.
    #[error("malformed schema '{component}': {reason}")]
    MalformedSchema {
        /// Component the declaration belongs to (may be empty when the
        /// name itself is the problem).
        component: String,
        /// Human-readable description of the violated invariant.
        reason: String,
    },

    /// No schema is registered under the requested component name.
    #[error("component not found: {0}")]
    NotFound(String),

    /// A declaration file could not be parsed.
    #[error("declaration parse error for '{path}': {reason}")]
    DeclarationParse {
        /// Path of the declaration file.
        path: String,
        /// Parser error message.
        reason: String,
    },

    /// IO error reading declarations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Build a [`SchemaError::MalformedSchema`].
    pub fn malformed(component: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            component: component.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for [`SchemaError::MalformedSchema`].
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedSchema { .. })
    }
}

/// Error building or parsing a [`TypeDescriptor`](crate::TypeDescriptor).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// A union was built from zero members.
    #[error("union must have at least one member")]
    EmptyUnion,

    /// A type expression contained an empty `|`-separated term.
    #[error("empty term in type expression '{0}'")]
    EmptyTerm(String),

    /// A quoted literal was opened but never closed.
    #[error("unterminated string literal in type expression '{0}'")]
    UnterminatedLiteral(String),

    /// A term is neither a primitive name nor a literal.
    #[error("unknown type term '{0}'")]
    UnknownTerm(String),
}

/// An identifier rejected by its newtype constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} name '{value}': {reason}")]
pub struct IdentifierError {
    /// Which namespace the identifier belongs to (`component`, `prop`, `event`).
    pub kind: &'static str,
    /// The rejected raw value.
    pub value: String,
    /// Why it was rejected.
    pub reason: &'static str,
}
