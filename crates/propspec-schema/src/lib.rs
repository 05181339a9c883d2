//! # propspec-schema: Schema Table, Validation & Diagnostics
//!
//! Loads component declarations into an immutable [`SchemaTable`], checks
//! caller-supplied prop values against a component's schema, and renders
//! the outcome as stable diagnostic lines.
//!
//! ## Declarations (`declaration`)
//!
//! One JSON or YAML file per component. Literal variant entries such as
//! `type="submit"` are folded into the base prop's descriptor as a union of
//! string literals.
//!
//! ## Schema Table (`table`)
//!
//! [`SchemaTable`] maps component names to schemas. It is built once and
//! fails fast: any malformed declaration aborts construction with
//! [`SchemaError::MalformedSchema`](propspec_core::SchemaError).
//!
//! ## Validation (`validate`)
//!
//! [`validate`] walks a value set against a schema and returns a
//! [`ValidationResult`]. Missing, mistyped and unknown props are reported as
//! data, never as errors.
//!
//! ## Diagnostics (`report`)
//!
//! [`render`] projects a result into one line per problem: declared props
//! in declaration order, then listener bindings, then unknown props sorted
//! by name.
//!
//! ## Crate Policy
//!
//! - Depends only on `propspec-core` internally.
//! - `validate` never panics on well-formed input.
//! - Nothing here mutates a schema after construction.

pub mod declaration;
pub mod report;
pub mod table;
pub mod validate;

pub use declaration::{
    load_declaration_file, parse_declaration, ComponentDeclaration, DeclarationFormat,
    EventDeclaration, PropDeclaration, TypeExpr,
};
pub use report::{render, render_error, Report};
pub use table::SchemaTable;
pub use validate::{
    resolve_defaults, validate, ErrorOrigin, FieldError, FieldErrorReason, ValidationResult,
    Validator,
};
