//! # Diagnostic Rendering
//!
//! Projects a [`ValidationResult`] into human-readable lines for an editor
//! problem panel or a CLI's stderr. Rendering never re-validates.
//!
//! Lines are ordered deterministically: declared props by declaration
//! index, then listener bindings by event index, then unknown keys sorted
//! lexicographically.

use std::cmp::Ordering;

use serde::Serialize;

use crate::validate::{ErrorOrigin, FieldError, FieldErrorReason, ValidationResult};

/// Render one field error as `<Component>.<prop>: <reason>`.
pub fn render_error(component: &str, error: &FieldError) -> String {
    let reason = match &error.reason {
        FieldErrorReason::MissingRequired => "missing required prop".to_string(),
        FieldErrorReason::TypeMismatch { expected, received } => {
            format!("type mismatch: expected {expected}, got {received}")
        }
        FieldErrorReason::UnknownProp => "unknown prop".to_string(),
    };
    format!("{component}.{}: {reason}", error.prop)
}

fn diagnostic_order(a: &FieldError, b: &FieldError) -> Ordering {
    match (a.origin, b.origin) {
        (ErrorOrigin::Undeclared, ErrorOrigin::Undeclared) => a.prop.cmp(&b.prop),
        (x, y) => x.cmp(&y),
    }
}

/// Render every field error of `result`, one line each, in diagnostic order.
pub fn render(result: &ValidationResult) -> Vec<String> {
    let mut errors: Vec<&FieldError> = result.field_errors.iter().collect();
    errors.sort_by(|a, b| diagnostic_order(a, b));
    errors
        .into_iter()
        .map(|e| render_error(&result.component, e))
        .collect()
}

/// Serializable summary of a validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Component validated against.
    pub component: String,
    /// Overall verdict.
    pub valid: bool,
    /// Number of field errors.
    pub error_count: usize,
    /// Rendered lines, in diagnostic order.
    pub diagnostics: Vec<String>,
}

impl Report {
    /// Summarize a result.
    pub fn from_result(result: &ValidationResult) -> Self {
        Self {
            component: result.component.clone(),
            valid: result.valid,
            error_count: result.error_count(),
            diagnostics: render(result),
        }
    }
}
