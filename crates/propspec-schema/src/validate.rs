//! # Prop Validation
//!
//! Checks a caller-supplied value set against a [`ComponentSchema`].
//!
//! ## Algorithm
//!
//! 1. Every declared prop, in declaration order: a required prop that is
//!    absent yields `MissingRequired`; a present value its descriptor
//!    rejects yields `TypeMismatch` with the expected descriptor and the
//!    received kind.
//! 2. Every supplied key the schema does not declare yields `UnknownProp`.
//!    Unknown props are reported, neither dropped nor fatal. A key of the
//!    form `@event` naming a declared event is a listener binding and must
//!    be a function reference.
//! 3. The result is valid exactly when no field error was emitted.
//!
//! `null` is not special: it is accepted only where a descriptor carries an
//! explicit `null` literal member.
//!
//! ## Failure Semantics
//!
//! Validation never returns an error and never panics. The only fatal
//! condition for a schema is being malformed, and that is caught when the
//! [`SchemaTable`] is built.

use propspec_core::{
    ComponentSchema, PrimitiveKind, PropValues, SchemaError, TypeDescriptor, ValueKind,
};
use serde::Serialize;

use crate::table::SchemaTable;

/// Why a single prop failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorReason {
    /// A required prop was not supplied.
    MissingRequired,
    /// The supplied value is not accepted by the prop's descriptor.
    TypeMismatch {
        /// What the prop accepts.
        expected: TypeDescriptor,
        /// Kind of the value that was supplied.
        received: ValueKind,
    },
    /// The key names no declared prop or event.
    UnknownProp,
}

/// Where the offending key sits in the schema, used to order diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum ErrorOrigin {
    /// A declared prop, by declaration index.
    Declared(usize),
    /// A listener binding for a declared event, by event index.
    Listener(usize),
    /// A key the schema does not declare.
    Undeclared,
}

/// One field-level diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// The supplied or declared key the error is about.
    pub prop: String,
    /// Position of the key in the schema.
    pub origin: ErrorOrigin,
    /// What went wrong.
    pub reason: FieldErrorReason,
}

/// Outcome of one validation call. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Component the value set was validated against.
    pub component: String,
    /// True exactly when `field_errors` is empty.
    pub valid: bool,
    /// Field errors in emission order (declared props first).
    pub field_errors: Vec<FieldError>,
}

impl ValidationResult {
    fn from_errors(component: &str, field_errors: Vec<FieldError>) -> Self {
        Self {
            component: component.to_string(),
            valid: field_errors.is_empty(),
            field_errors,
        }
    }

    /// Number of field errors.
    pub fn error_count(&self) -> usize {
        self.field_errors.len()
    }

    /// Field errors about one key.
    pub fn errors_for<'a>(&'a self, prop: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.field_errors.iter().filter(move |e| e.prop == prop)
    }
}

/// Validate `values` against `schema`.
pub fn validate(schema: &ComponentSchema, values: &PropValues) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, spec) in schema.props().iter().enumerate() {
        let name = spec.name().as_str();
        match values.get(name) {
            None if spec.is_required() && spec.default_value().is_none() => {
                errors.push(FieldError {
                    prop: name.to_string(),
                    origin: ErrorOrigin::Declared(index),
                    reason: FieldErrorReason::MissingRequired,
                });
            }
            None => {}
            Some(value) if spec.accepted().matches(value) => {}
            Some(value) => errors.push(FieldError {
                prop: name.to_string(),
                origin: ErrorOrigin::Declared(index),
                reason: FieldErrorReason::TypeMismatch {
                    expected: spec.accepted().clone(),
                    received: value.kind(),
                },
            }),
        }
    }

    for (key, value) in values {
        if schema.prop_position(key).is_some() {
            continue;
        }
        match schema.listener_position(key) {
            Some(_) if value.kind() == ValueKind::Function => {}
            Some(index) => errors.push(FieldError {
                prop: key.clone(),
                origin: ErrorOrigin::Listener(index),
                reason: FieldErrorReason::TypeMismatch {
                    expected: TypeDescriptor::primitive(PrimitiveKind::Function),
                    received: value.kind(),
                },
            }),
            None => errors.push(FieldError {
                prop: key.clone(),
                origin: ErrorOrigin::Undeclared,
                reason: FieldErrorReason::UnknownProp,
            }),
        }
    }

    let result = ValidationResult::from_errors(schema.name().as_str(), errors);
    tracing::debug!(
        component = %schema.name(),
        supplied = values.len(),
        errors = result.error_count(),
        valid = result.valid,
        "validated prop values"
    );
    result
}

/// `values` with declared defaults filled in for absent props.
///
/// Supplied values are kept as-is, including ones that fail validation.
pub fn resolve_defaults(schema: &ComponentSchema, values: &PropValues) -> PropValues {
    let mut resolved = values.clone();
    for spec in schema.props() {
        if let Some(default) = spec.default_value() {
            resolved
                .entry(spec.name().to_string())
                .or_insert_with(|| default.clone());
        }
    }
    resolved
}

/// Validates value sets against components of a shared [`SchemaTable`].
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    table: &'a SchemaTable,
}

impl<'a> Validator<'a> {
    /// Wrap a loaded table.
    pub fn new(table: &'a SchemaTable) -> Self {
        Self { table }
    }

    /// The underlying table.
    pub fn table(&self) -> &'a SchemaTable {
        self.table
    }

    /// Look up `component` and validate `values` against it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotFound`] if the component is not registered.
    /// Validation problems are never errors; they are in the result.
    pub fn validate_component(
        &self,
        component: &str,
        values: &PropValues,
    ) -> Result<ValidationResult, SchemaError> {
        let schema = self.table.lookup(component)?;
        Ok(validate(schema, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{parse_declaration, DeclarationFormat};
    use propspec_core::PropValue;
    use serde_json::json;

    fn btn() -> ComponentSchema {
        parse_declaration(
            r#"
name: Btn
props:
  - name: label
    type: [String, Number]
  - name: disable
    type: Boolean
"#,
            DeclarationFormat::Yaml,
            "btn.yaml",
        )
        .unwrap()
        .into_schema()
        .unwrap()
    }

    fn time() -> ComponentSchema {
        parse_declaration(
            r#"
name: QTime
events:
  - name: input
    params: [value, details]
props:
  - name: value
    type: String
    required: true
  - name: calendar
    type: String
  - name: calendar="gregorian"
    type: String
  - name: calendar="persian"
    type: String
  - name: options
    type: Function
  - name: mask
    type: String|null
    default: HH:mm
"#,
            DeclarationFormat::Yaml,
            "time.yaml",
        )
        .unwrap()
        .into_schema()
        .unwrap()
    }

    fn values(v: serde_json::Value) -> PropValues {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn label_number_and_unknown_prop() {
        let result = validate(&btn(), &values(json!({"label": 42, "unknownProp": 1})));
        assert!(!result.valid);
        assert_eq!(
            result.field_errors,
            vec![FieldError {
                prop: "unknownProp".to_string(),
                origin: ErrorOrigin::Undeclared,
                reason: FieldErrorReason::UnknownProp,
            }]
        );
    }

    #[test]
    fn disable_string_is_type_mismatch() {
        let result = validate(&btn(), &values(json!({"disable": "yes"})));
        assert!(!result.valid);
        assert_eq!(
            result.field_errors,
            vec![FieldError {
                prop: "disable".to_string(),
                origin: ErrorOrigin::Declared(1),
                reason: FieldErrorReason::TypeMismatch {
                    expected: TypeDescriptor::primitive(PrimitiveKind::Boolean),
                    received: ValueKind::String,
                },
            }]
        );
    }

    #[test]
    fn empty_values_valid_without_required_props() {
        let result = validate(&btn(), &PropValues::new());
        assert!(result.valid);
        assert!(result.field_errors.is_empty());
    }

    #[test]
    fn missing_required_prop() {
        let result = validate(&time(), &PropValues::new());
        assert!(!result.valid);
        assert_eq!(result.field_errors.len(), 1);
        assert_eq!(result.field_errors[0].prop, "value");
        assert_eq!(result.field_errors[0].reason, FieldErrorReason::MissingRequired);
    }

    #[test]
    fn null_only_accepted_when_declared() {
        let ok = validate(&time(), &values(json!({"value": "10:30", "mask": null})));
        assert!(ok.valid, "{:?}", ok.field_errors);

        let bad = validate(&time(), &values(json!({"value": null})));
        assert_eq!(
            bad.field_errors[0].reason,
            FieldErrorReason::TypeMismatch {
                expected: TypeDescriptor::primitive(PrimitiveKind::String),
                received: ValueKind::Null,
            }
        );
    }

    #[test]
    fn folded_literals_restrict_values() {
        let ok = validate(&time(), &values(json!({"value": "10:30", "calendar": "persian"})));
        assert!(ok.valid);

        let bad = validate(&time(), &values(json!({"value": "10:30", "calendar": "julian"})));
        assert_eq!(bad.error_count(), 1);
        match &bad.field_errors[0].reason {
            FieldErrorReason::TypeMismatch { expected, received } => {
                assert_eq!(expected.to_string(), "'gregorian'|'persian'");
                assert_eq!(*received, ValueKind::String);
            }
            other => panic!("expected TypeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn function_props_and_listener_bindings() {
        let ok = validate(
            &time(),
            &values(json!({
                "value": "10:30",
                "options": {"$function": "allowed"},
                "@input": {"$function": "onInput"},
            })),
        );
        assert!(ok.valid, "{:?}", ok.field_errors);

        let bad = validate(
            &time(),
            &values(json!({"value": "10:30", "@input": "onInput", "@change": {"$function": "f"}})),
        );
        assert_eq!(bad.error_count(), 2);
        let input: Vec<_> = bad.errors_for("@input").collect();
        assert_eq!(input[0].origin, ErrorOrigin::Listener(0));
        assert!(matches!(
            input[0].reason,
            FieldErrorReason::TypeMismatch { received: ValueKind::String, .. }
        ));
        let change: Vec<_> = bad.errors_for("@change").collect();
        assert_eq!(change[0].reason, FieldErrorReason::UnknownProp);
    }

    #[test]
    fn errors_for_declared_props_follow_declaration_order() {
        let result = validate(
            &btn(),
            &values(json!({"disable": 1, "label": true})),
        );
        let props: Vec<&str> = result.field_errors.iter().map(|e| e.prop.as_str()).collect();
        assert_eq!(props, vec!["label", "disable"]);
    }

    #[test]
    fn resolve_defaults_fills_only_absent_props() {
        let schema = time();
        let resolved = resolve_defaults(&schema, &values(json!({"value": "10:30"})));
        assert_eq!(resolved.get("mask"), Some(&PropValue::from("HH:mm")));
        assert_eq!(resolved.len(), 2);

        let kept = resolve_defaults(&schema, &values(json!({"value": "10:30", "mask": null})));
        assert_eq!(kept.get("mask"), Some(&PropValue::Null));
    }

    #[test]
    fn validator_looks_up_components() {
        let table = SchemaTable::new([btn(), time()]).unwrap();
        let validator = Validator::new(&table);
        let result = validator
            .validate_component("Btn", &values(json!({"label": "Go"})))
            .unwrap();
        assert!(result.valid);
        assert!(matches!(
            validator.validate_component("QBtn", &PropValues::new()),
            Err(SchemaError::NotFound(_))
        ));
    }

    #[test]
    fn concurrent_validation_against_shared_table() {
        let table = std::sync::Arc::new(SchemaTable::new([btn()]).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let table = std::sync::Arc::clone(&table);
                std::thread::spawn(move || {
                    let v = values(json!({"label": i, "disable": i % 2 == 0}));
                    Validator::new(&table).validate_component("Btn", &v).map(|r| r.valid)
                })
            })
            .collect();
        for handle in handles {
            assert!(matches!(handle.join(), Ok(Ok(true))));
        }
    }

    #[test]
    fn result_serializes_with_tagged_reasons() {
        let result = validate(&btn(), &values(json!({"disable": "yes"})));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["field_errors"][0]["reason"]["kind"], "type_mismatch");
        assert_eq!(json["field_errors"][0]["reason"]["expected"], "Boolean");
        assert_eq!(json["field_errors"][0]["reason"]["received"], "String");
    }
}
