//! # proto-zod-cli
//!
//! protoc plugin and CLI for generating TypeScript Zod schemas from protobuf
//! definitions.
//!
//! ## Architecture
//!
//! - [`plugin`] - `CodeGeneratorRequest`/`CodeGeneratorResponse` transport
//! - [`descriptor`] - descriptor traversal into the `proto-zod` message IR
//! - [`generator`] - per-file schema generation
//! - [`config`] - configuration files and plugin parameters
//! - [`writer`] - file output and dry-run support
//! - [`error`] - error types and handling

pub mod config;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod plugin;
pub mod writer;

pub use config::{Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use generator::{GeneratedFile, SchemaGenerator};
pub use writer::FileWriter;
