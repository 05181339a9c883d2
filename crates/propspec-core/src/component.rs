//! # Component Schemas
//!
//! A [`ComponentSchema`] is the declared prop and event surface of one
//! component. It is built once, checked at construction, and read-only
//! afterwards: there are no mutating methods, so a schema can be shared
//! between threads by reference or `Arc` without locking.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::SchemaError;
use crate::identity::{ComponentName, LISTENER_PREFIX};
use crate::prop::{EventSpec, PropSpec};

/// Declared props and events of one component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSchema {
    name: ComponentName,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    props: Vec<PropSpec>,
    events: Vec<EventSpec>,
    /// Prop name to index in `props`.
    #[serde(skip)]
    prop_index: HashMap<String, usize>,
    /// Event name to index in `events`.
    #[serde(skip)]
    event_index: HashMap<String, usize>,
}

impl ComponentSchema {
    /// Build a schema, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::MalformedSchema`] when two props or two events
    /// share a name, or when a prop violates [`PropSpec::check`].
    pub fn new(
        name: ComponentName,
        props: Vec<PropSpec>,
        events: Vec<EventSpec>,
    ) -> Result<Self, SchemaError> {
        let mut prop_index = HashMap::with_capacity(props.len());
        for (i, prop) in props.iter().enumerate() {
            prop.check()
                .map_err(|reason| SchemaError::malformed(name.as_str(), reason))?;
            if prop_index.insert(prop.name().to_string(), i).is_some() {
                return Err(SchemaError::malformed(
                    name.as_str(),
                    format!("duplicate prop '{}'", prop.name()),
                ));
            }
        }

        let mut event_index = HashMap::with_capacity(events.len());
        for (i, event) in events.iter().enumerate() {
            if event_index.insert(event.name().to_string(), i).is_some() {
                return Err(SchemaError::malformed(
                    name.as_str(),
                    format!("duplicate event '{}'", event.name()),
                ));
            }
        }

        Ok(Self {
            name,
            description: None,
            props,
            events,
            prop_index,
            event_index,
        })
    }

    /// Attach tooltip text for the component itself.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Component name.
    pub fn name(&self) -> &ComponentName {
        &self.name
    }

    /// Tooltip text, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Props in declaration order.
    pub fn props(&self) -> &[PropSpec] {
        &self.props
    }

    /// Events in declaration order.
    pub fn events(&self) -> &[EventSpec] {
        &self.events
    }

    /// Look up a prop by exact name.
    pub fn prop(&self, name: &str) -> Option<&PropSpec> {
        self.prop_position(name).map(|i| &self.props[i])
    }

    /// Declaration index of a prop.
    pub fn prop_position(&self, name: &str) -> Option<usize> {
        self.prop_index.get(name).copied()
    }

    /// Look up an event by exact name (without `@`).
    pub fn event(&self, name: &str) -> Option<&EventSpec> {
        self.event_position(name).map(|i| &self.events[i])
    }

    /// Declaration index of an event (without `@`).
    pub fn event_position(&self, name: &str) -> Option<usize> {
        self.event_index.get(name).copied()
    }

    /// Resolve a value-set key of the form `@event` to the event's index.
    /// Returns `None` for plain prop keys and for undeclared events.
    pub fn listener_position(&self, key: &str) -> Option<usize> {
        key.strip_prefix(LISTENER_PREFIX)
            .and_then(|event| self.event_position(event))
    }

    /// Props a value set must supply.
    pub fn required_props(&self) -> impl Iterator<Item = &PropSpec> {
        self.props.iter().filter(|p| p.is_required())
    }
}

impl PartialEq for ComponentSchema {
    fn eq(&self, other: &Self) -> bool {
        // The indexes are derived from `props` and `events`.
        self.name == other.name
            && self.description == other.description
            && self.props == other.props
            && self.events == other.events
    }
}
