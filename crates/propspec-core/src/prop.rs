//! # Prop and Event Specs
//!
//! A [`PropSpec`] declares one configuration input of a component: its
//! name, accepted descriptor, whether it is required, and an optional
//! default. An [`EventSpec`] declares an event the component emits, bound
//! by callers under the key `@<event-name>`.
//!
//! Descriptions are display-only tooltip text and never affect validation.

use serde::Serialize;

use crate::descriptor::TypeDescriptor;
use crate::identity::{EventName, PropName};
use crate::value::PropValue;

/// Declaration of one prop.
///
/// Invariants (checked by [`ComponentSchema::new`](crate::ComponentSchema::new)
/// through [`PropSpec::check`]):
/// - a required prop has no default;
/// - a default, when present, is accepted by the prop's own descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropSpec {
    name: PropName,
    accepted: TypeDescriptor,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<PropValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl PropSpec {
    /// An optional prop with no default.
    pub fn new(name: PropName, accepted: TypeDescriptor) -> Self {
        Self {
            name,
            accepted,
            required: false,
            default_value: None,
            description: None,
        }
    }

    /// Mark the prop as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the value used when the prop is absent.
    pub fn with_default(mut self, value: PropValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Attach tooltip text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the accepted descriptor.
    pub fn with_accepted(mut self, accepted: TypeDescriptor) -> Self {
        self.accepted = accepted;
        self
    }

    /// Prop name.
    pub fn name(&self) -> &PropName {
        &self.name
    }

    /// Accepted values.
    pub fn accepted(&self) -> &TypeDescriptor {
        &self.accepted
    }

    /// Whether a value set must supply this prop.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value used when the prop is absent.
    pub fn default_value(&self) -> Option<&PropValue> {
        self.default_value.as_ref()
    }

    /// Tooltip text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check the per-prop invariants, returning the violated one.
    pub fn check(&self) -> Result<(), String> {
        match &self.default_value {
            Some(_) if self.required => Err(format!(
                "prop '{}' is required and must not declare a default",
                self.name
            )),
            Some(default) if !self.accepted.matches(default) => Err(format!(
                "default {default} of prop '{}' does not match {}",
                self.name, self.accepted
            )),
            _ => Ok(()),
        }
    }
}

/// Declaration of one emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventSpec {
    name: EventName,
    params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl EventSpec {
    /// An event with no documented parameters.
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            params: Vec::new(),
            description: None,
        }
    }

    /// Set the handler parameter names, in call order.
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Attach tooltip text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Event name, without `@`.
    pub fn name(&self) -> &EventName {
        &self.name
    }

    /// Handler parameter names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Tooltip text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
