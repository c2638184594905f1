//! Code generation module.
//!
//! - [`renderer`] serializes descriptors and message objects into Zod
//!   declarations.
//! - [`file`] assembles the declarations needed by one proto file.

pub mod file;
pub mod renderer;

pub use file::{BlockKind, SchemaBlock, SchemaFile, SchemaFileBuilder, HEADER, ZOD_IMPORT};
pub use renderer::{
    value_type, ObjectProperty, ObjectSchema, SchemaRef, TypeProperty, ZodRenderer, ZOD_NAMESPACE,
};
