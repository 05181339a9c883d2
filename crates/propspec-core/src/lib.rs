//! # propspec-core: Foundational Types for Component Prop Schemas
//!
//! This crate defines the data model every other `propspec` crate builds on:
//! the values a caller supplies for component props, the descriptors that
//! say which values a prop accepts, and the immutable component schemas the
//! validator walks.
//!
//! ## Key Design Principles
//!
//! 1. **Tagged descriptors, not string keys.** A [`TypeDescriptor`] is a
//!    `Primitive`, a `LiteralValue`, or a flattened `Union`. Enumerated prop
//!    options are unions of literals, never one record per option.
//!
//! 2. **Newtype wrappers for identifiers.** [`ComponentName`], [`PropName`]
//!    and [`EventName`] have validated constructors. No bare strings for
//!    schema identifiers.
//!
//! 3. **Construction-time invariants.** [`ComponentSchema::new`] rejects
//!    duplicate prop or event names, required props with defaults, and
//!    defaults that their own descriptor rejects. A schema that exists is
//!    well-formed.
//!
//! 4. **"Unset" is explicit.** `null` is not a primitive kind. A prop accepts
//!    `null` only when its descriptor carries a `LiteralValue(null)` member.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `propspec-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and serialize with `serde`.

pub mod component;
pub mod descriptor;
pub mod error;
pub mod identity;
pub mod prop;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use component::ComponentSchema;
pub use descriptor::TypeDescriptor;
pub use error::{DescriptorError, IdentifierError, SchemaError};
pub use identity::{ComponentName, EventName, PropName};
pub use prop::{EventSpec, PropSpec};
pub use value::{Literal, PrimitiveKind, PropValue, PropValues, ValueKind, FUNCTION_KEY};
