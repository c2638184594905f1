//! # proto-zod
//!
//! Type mapping and rendering engine for generating TypeScript Zod schemas
//! from protobuf definitions.
//!
//! The crate has two core pieces:
//!
//! - [`SchemaRegistry`] maps each protobuf [`WireType`] to a
//!   [`SchemaDescriptor`]: the Zod primitive plus the exact numeric and
//!   length bounds for that type.
//! - [`ZodRenderer`] turns a descriptor into one
//!   `export const <Name>Schema = z.<primitive>()[.<constraint>]*;` statement.
//!
//! [`SchemaFileBuilder`] ties them together for one output file.
//!
//! ## Usage
//!
//! ```rust
//! use proto_zod::{FieldIR, FieldType, GeneratorOptions, MessageIR, SchemaFileBuilder, WireType};
//!
//! let user = MessageIR::new("User")
//!     .with_field(FieldIR::new("id", FieldType::Scalar(WireType::Int64)))
//!     .with_field(FieldIR::new("name", FieldType::Scalar(WireType::String)));
//!
//! let file = SchemaFileBuilder::new(GeneratorOptions::default())
//!     .build(&[user])
//!     .unwrap();
//!
//! assert_eq!(file.len(), 2);
//! assert!(file.to_source().contains(
//!     "export const Int64Schema = z.number().min(-9223372036854775808).max(9223372036854775807);"
//! ));
//! ```

pub mod error;
pub mod generator;
pub mod ir;
pub mod options;
pub mod registry;

pub use error::{DescriptorError, GenerateError, RegistryError, RegistryResult};
pub use generator::{SchemaFile, SchemaFileBuilder, ZodRenderer};
pub use ir::{Constraint, FieldIR, FieldType, MessageIR, Primitive, SchemaDescriptor, WireType};
pub use options::{schema_name, GeneratorOptions, DEFAULT_MAX_STRING_LENGTH, SCHEMA_SUFFIX};
pub use registry::SchemaRegistry;
