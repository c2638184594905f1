//! Protobuf descriptor traversal.
//!
//! Converts `prost-types` descriptors into the message IR consumed by
//! [`proto_zod::SchemaFileBuilder`]. Nested messages and enums are flattened
//! into single TypeScript names by concatenating their path
//! (`.acme.Outer.Inner` becomes `OuterInner`).

use std::collections::HashMap;
use std::path::Path;

use prost::Message;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet};
use proto_zod::{FieldIR, FieldType, MessageIR, RegistryError, WireType};

use crate::error::{CliResult, DecodeError, GenerateError};

/// Index from fully-qualified protobuf names to flattened TypeScript names.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    names: HashMap<String, String>,
}

impl TypeIndex {
    /// Index every message and enum declared in `files`.
    pub fn new(files: &[FileDescriptorProto]) -> Self {
        let mut index = Self::default();
        for file in files {
            let scope = match file.package() {
                "" => String::new(),
                package => format!(".{package}"),
            };
            for message in &file.message_type {
                index.add_message(&scope, "", message);
            }
            for enumeration in &file.enum_type {
                index.add(&scope, "", enumeration.name());
            }
        }
        index
    }

    fn add_message(&mut self, scope: &str, prefix: &str, message: &DescriptorProto) {
        let (full_name, ts_name) = self.add(scope, prefix, message.name());
        for nested in &message.nested_type {
            self.add_message(&full_name, &ts_name, nested);
        }
        for enumeration in &message.enum_type {
            self.add(&full_name, &ts_name, enumeration.name());
        }
    }

    fn add(&mut self, scope: &str, prefix: &str, name: &str) -> (String, String) {
        let full_name = format!("{scope}.{name}");
        let ts_name = format!("{prefix}{name}");
        self.names.insert(full_name.clone(), ts_name.clone());
        (full_name, ts_name)
    }

    /// TypeScript name for a fully-qualified type name.
    ///
    /// Types missing from the index fall back to their last path segment.
    pub fn resolve(&self, full_name: &str) -> String {
        if let Some(name) = self.names.get(full_name) {
            return name.clone();
        }
        full_name
            .rsplit('.')
            .next()
            .unwrap_or(full_name)
            .to_string()
    }
}

/// Map a field descriptor to its field type.
///
/// Groups and unknown type codes have no schema and fail with
/// [`RegistryError::UnmappedWireType`].
pub fn field_type(field: &FieldDescriptorProto, index: &TypeIndex) -> Result<FieldType, RegistryError> {
    let code = field
        .r#type
        .ok_or_else(|| RegistryError::unmapped("<unset>"))?;
    let ty = Type::try_from(code).map_err(|_| RegistryError::unmapped(format!("type code {code}")))?;

    let wire = match ty {
        Type::Double => WireType::Double,
        Type::Float => WireType::Float,
        Type::Int64 => WireType::Int64,
        Type::Uint64 => WireType::Uint64,
        Type::Int32 => WireType::Int32,
        Type::Fixed64 => WireType::Fixed64,
        Type::Fixed32 => WireType::Fixed32,
        Type::Bool => WireType::Bool,
        Type::String => WireType::String,
        Type::Bytes => WireType::Bytes,
        Type::Uint32 => WireType::Uint32,
        Type::Sfixed32 => WireType::Sfixed32,
        Type::Sfixed64 => WireType::Sfixed64,
        Type::Sint32 => WireType::Sint32,
        Type::Sint64 => WireType::Sint64,
        Type::Group => return Err(RegistryError::unmapped("group")),
        Type::Enum => return Ok(FieldType::Enum(index.resolve(field.type_name()))),
        Type::Message => match WireType::from_well_known(field.type_name()) {
            Some(wire) => wire,
            None => return Ok(FieldType::Message(index.resolve(field.type_name()))),
        },
    };

    Ok(FieldType::Scalar(wire))
}

/// Collect the messages of one file, nested messages flattened after their
/// parent.
pub fn collect_messages(file: &FileDescriptorProto, index: &TypeIndex) -> CliResult<Vec<MessageIR>> {
    let mut messages = Vec::new();
    for message in &file.message_type {
        collect_message(file.name(), "", message, index, &mut messages)?;
    }
    Ok(messages)
}

fn collect_message(
    file: &str,
    prefix: &str,
    message: &DescriptorProto,
    index: &TypeIndex,
    out: &mut Vec<MessageIR>,
) -> CliResult<()> {
    let ts_name = format!("{prefix}{}", message.name());
    let mut ir = MessageIR::new(ts_name.clone());

    for field in &message.field {
        let ty = field_type(field, index)
            .map_err(|source| GenerateError::field(file, &ts_name, field.name(), source))?;

        let mut field_ir = FieldIR::new(property_name(field), ty);
        if field.label() == Label::Repeated {
            field_ir = field_ir.repeated();
        }
        ir.fields.push(field_ir);
    }

    out.push(ir);
    for nested in &message.nested_type {
        collect_message(file, &ts_name, nested, index, out)?;
    }
    Ok(())
}

/// Object property name for a field: its JSON name when protoc supplied one.
fn property_name(field: &FieldDescriptorProto) -> String {
    match field.json_name.as_deref() {
        Some(json_name) if !json_name.is_empty() => json_name.to_string(),
        _ => field.name().to_string(),
    }
}

/// Read a `FileDescriptorSet` written by `protoc --descriptor_set_out`.
pub fn read_descriptor_set(path: &Path) -> CliResult<FileDescriptorSet> {
    let bytes = std::fs::read(path).map_err(|source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = FileDescriptorSet::decode(bytes.as_slice()).map_err(|source| {
        DecodeError::DescriptorSet {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::debug!(path = %path.display(), files = set.file.len(), "read descriptor set");
    Ok(set)
}
