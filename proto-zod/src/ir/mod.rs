//! Intermediate Representation (IR) module.
//!
//! This module defines the data the registry produces and the renderer
//! consumes: wire-type identifiers, schema descriptors, and the message/field
//! shapes handed over by descriptor traversal.

pub mod message;
pub mod schema;
pub mod wire_type;

pub use message::{FieldIR, FieldType, MessageIR};
pub use schema::{Constraint, Primitive, SchemaDescriptor};
pub use wire_type::WireType;
