//! Schema generator for producing TypeScript Zod files from protobuf
//! descriptors.
//!
//! This module drives the `SchemaFileBuilder` from `proto-zod` once per
//! requested `.proto` file.

use prost_types::FileDescriptorProto;
use proto_zod::SchemaFileBuilder;

use crate::config::Config;
use crate::descriptor::{collect_messages, TypeIndex};
use crate::error::{CliResult, GenerateError};

/// A generated TypeScript file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path, relative to the output root.
    pub name: String,

    /// Complete TypeScript content.
    pub content: String,

    /// Exported schema names, in declaration order.
    pub schemas: Vec<String>,
}

/// Schema generator over a set of file descriptors.
pub struct SchemaGenerator {
    config: Config,
}

impl SchemaGenerator {
    /// Create a new schema generator with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate one TypeScript file per name in `to_generate`.
    ///
    /// `files` must contain every requested file and everything it imports,
    /// in the topological order protoc provides.
    pub fn generate(
        &self,
        files: &[FileDescriptorProto],
        to_generate: &[String],
    ) -> CliResult<Vec<GeneratedFile>> {
        let index = TypeIndex::new(files);
        let builder = SchemaFileBuilder::new(self.config.generator.clone());

        let mut generated = Vec::with_capacity(to_generate.len());
        for name in to_generate {
            let file = files
                .iter()
                .find(|f| f.name() == name)
                .ok_or_else(|| GenerateError::MissingFile { name: name.clone() })?;

            let messages = collect_messages(file, &index)?;
            let schema_file = builder.build(&messages).map_err(|source| GenerateError::Schema {
                file: name.clone(),
                source,
            })?;

            tracing::info!(
                file = %name,
                messages = messages.len(),
                schemas = schema_file.len(),
                "generated schemas"
            );

            generated.push(GeneratedFile {
                name: output_file_name(name, &self.config.output.file_suffix),
                content: schema_file.to_source(),
                schemas: schema_file.schema_names().map(str::to_string).collect(),
            });
        }

        Ok(generated)
    }
}

/// Output file name for a `.proto` path: the path with its `.proto`
/// extension replaced by `suffix`.
pub fn output_file_name(proto: &str, suffix: &str) -> String {
    let stem = proto.strip_suffix(".proto").unwrap_or(proto);
    format!("{stem}{suffix}")
}
