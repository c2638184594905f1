//! Output file assembly.
//!
//! [`SchemaFileBuilder`] walks the messages of one proto file, asks the
//! registry for every field type it touches, renders each distinct schema
//! once, and collects the declarations in first-reference order. Message
//! object schemas, when enabled, follow the scalar schemas in dependency
//! order.

use std::collections::{HashMap, HashSet};

use crate::error::GenerateError;
use crate::generator::renderer::{
    value_type, ObjectProperty, ObjectSchema, SchemaRef, TypeProperty, ZodRenderer, ZOD_NAMESPACE,
};
use crate::ir::{FieldIR, FieldType, MessageIR, Primitive, SchemaDescriptor};
use crate::options::{schema_name, GeneratorOptions};
use crate::registry::SchemaRegistry;

/// First line of every generated file.
pub const HEADER: &str = "// Code generated by proto-zod. DO NOT EDIT.";

/// Import line binding the Zod namespace.
pub const ZOD_IMPORT: &str = "import { z } from 'zod';";

/// Inserted before the schema suffix when a message name collides with a
/// field schema (`String` -> `StringMessageSchema`).
pub const MESSAGE_INFIX: &str = "Message";

/// What a generated block declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A scalar or well-known type schema from the registry.
    Scalar,

    /// A `z.nativeEnum` schema.
    Enum,

    /// A `z.object` schema for a message.
    Message,
}

/// One rendered declaration (plus its type alias, if any).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaBlock {
    /// Exported schema name.
    pub name: String,

    /// Kind of schema declared.
    pub kind: BlockKind,

    /// Rendered TypeScript, newline terminated.
    pub code: String,
}

/// Ordered schema declarations for one output file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaFile {
    blocks: Vec<SchemaBlock>,
}

impl SchemaFile {
    /// Declarations in emission order.
    pub fn blocks(&self) -> &[SchemaBlock] {
        &self.blocks
    }

    /// Exported schema names in emission order.
    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(|block| block.name.as_str())
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the file declares nothing.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Concatenate the header, the import line, and every block, each
    /// followed by a blank line.
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("\n\n");
        out.push_str(ZOD_IMPORT);
        out.push_str("\n\n");

        for block in &self.blocks {
            out.push_str(&block.code);
            out.push('\n');
        }

        out
    }
}

/// Builds the schema declarations of one output file.
#[derive(Debug, Clone, Default)]
pub struct SchemaFileBuilder {
    registry: SchemaRegistry,
    renderer: ZodRenderer,
    options: GeneratorOptions,
}

impl SchemaFileBuilder {
    /// Create a builder from generator options.
    pub fn new(options: GeneratorOptions) -> Self {
        Self {
            registry: SchemaRegistry::from_options(&options),
            renderer: ZodRenderer::new(),
            options,
        }
    }

    /// Build the declarations for the given messages.
    ///
    /// Any field whose type cannot be resolved aborts the whole file.
    pub fn build(&self, messages: &[MessageIR]) -> Result<SchemaFile, GenerateError> {
        let mut file = SchemaFile::default();
        let mut declared: HashMap<String, SchemaDescriptor> = HashMap::new();

        // Field schemas, deduplicated in first-reference order.
        for message in messages {
            for field in &message.fields {
                let Some(descriptor) = self.registry.resolve(&field.ty)? else {
                    continue;
                };

                if let Some(existing) = declared.get(descriptor.name()) {
                    if existing != &descriptor {
                        return Err(GenerateError::DuplicateSchema {
                            name: descriptor.name().to_string(),
                        });
                    }
                    continue;
                }

                let kind = match descriptor.primitive() {
                    Primitive::NativeEnum { .. } => BlockKind::Enum,
                    _ => BlockKind::Scalar,
                };
                tracing::debug!(
                    schema = %descriptor.name(),
                    message = %message.name,
                    field = %field.name,
                    "emitting field schema"
                );
                file.blocks.push(SchemaBlock {
                    name: descriptor.name().to_string(),
                    kind,
                    code: self.renderer.render(&descriptor),
                });
                declared.insert(descriptor.name().to_string(), descriptor);
            }
        }

        if self.options.emits_messages() {
            self.build_messages(messages, &declared, &mut file)?;
        }

        Ok(file)
    }

    fn build_messages(
        &self,
        messages: &[MessageIR],
        field_schemas: &HashMap<String, SchemaDescriptor>,
        file: &mut SchemaFile,
    ) -> Result<(), GenerateError> {
        let mut by_name: HashMap<&str, &MessageIR> = HashMap::new();
        for message in messages {
            if by_name.insert(message.name.as_str(), message).is_some() {
                return Err(GenerateError::DuplicateSchema {
                    name: schema_name(&message.name),
                });
            }
        }

        let names = message_schema_names(messages, field_schemas);
        let recursive = recursive_messages(messages, &by_name);

        let mut declared: HashSet<&str> = HashSet::new();
        for message in topological_order(messages, &by_name) {
            let schema = names
                .get(message.name.as_str())
                .cloned()
                .unwrap_or_else(|| schema_name(&message.name));
            let is_recursive = recursive.contains(message.name.as_str());

            let object = ObjectSchema {
                name: schema.clone(),
                annotation: is_recursive.then(|| message.name.clone()),
                properties: message
                    .fields
                    .iter()
                    .map(|field| ObjectProperty {
                        key: field.name.clone(),
                        schema: self.field_ref(&field.ty, &names, &declared),
                        repeated: field.repeated,
                    })
                    .collect(),
            };

            let mut code = String::new();
            if is_recursive {
                let properties = message
                    .fields
                    .iter()
                    .map(|field| self.type_property(field, &names, &recursive))
                    .collect::<Result<Vec<_>, _>>()?;
                code.push_str(&self.renderer.render_object_type(&message.name, &properties));
            }
            code.push_str(&self.renderer.render_object(&object));
            if self.options.types && !is_recursive {
                code.push_str(&self.renderer.render_type_alias(&message.name, &schema));
            }

            tracing::debug!(
                schema = %schema,
                fields = message.fields.len(),
                recursive = is_recursive,
                "emitting message schema"
            );
            file.blocks.push(SchemaBlock {
                name: schema,
                kind: BlockKind::Message,
                code,
            });
            declared.insert(message.name.as_str());
        }

        Ok(())
    }

    fn field_ref(
        &self,
        ty: &FieldType,
        local_schemas: &HashMap<&str, String>,
        declared: &HashSet<&str>,
    ) -> SchemaRef {
        match ty {
            FieldType::Scalar(wire) => SchemaRef::Direct(schema_name(wire.type_name())),
            FieldType::Enum(name) => SchemaRef::Direct(schema_name(name)),
            FieldType::Message(name) => match local_schemas.get(name.as_str()) {
                Some(schema) if !declared.contains(name.as_str()) => SchemaRef::Lazy(schema.clone()),
                Some(schema) => SchemaRef::Direct(schema.clone()),
                None => SchemaRef::Direct(schema_name(name)),
            },
        }
    }

    /// Member of the explicit type declared for a recursive message.
    fn type_property(
        &self,
        field: &FieldIR,
        local_schemas: &HashMap<&str, String>,
        recursive: &HashSet<&str>,
    ) -> Result<TypeProperty, GenerateError> {
        let (mut ty, optional) = match &field.ty {
            FieldType::Message(name) if recursive.contains(name.as_str()) => (name.clone(), false),
            FieldType::Message(name) => {
                let schema = local_schemas
                    .get(name.as_str())
                    .cloned()
                    .unwrap_or_else(|| schema_name(name));
                (format!("{ZOD_NAMESPACE}.infer<typeof {schema}>"), false)
            }
            other => match self.registry.resolve(other)? {
                Some(descriptor) => {
                    // z.object marks keys whose schema accepts undefined as optional.
                    let optional = !field.repeated
                        && matches!(descriptor.primitive(), Primitive::Any | Primitive::Unknown);
                    (value_type(&descriptor), optional)
                }
                None => ("unknown".to_string(), true),
            },
        };
        if field.repeated {
            ty.push_str("[]");
        }

        Ok(TypeProperty {
            key: field.name.clone(),
            ty,
            optional,
        })
    }
}

/// Assign each local message its exported schema name.
///
/// A message whose natural name (`<Name>Schema`) is already taken by a field
/// schema of the same file, e.g. a message called `String` in a file with
/// `string` fields, is exported as `<Name>MessageSchema` instead, with
/// `Message` repeated until the name is free.
fn message_schema_names<'a>(
    messages: &'a [MessageIR],
    field_schemas: &HashMap<String, SchemaDescriptor>,
) -> HashMap<&'a str, String> {
    let mut taken: HashSet<String> = field_schemas.keys().cloned().collect();
    taken.extend(
        messages
            .iter()
            .map(|message| schema_name(&message.name))
            .filter(|name| !field_schemas.contains_key(name)),
    );

    let mut names = HashMap::with_capacity(messages.len());
    for message in messages {
        let natural = schema_name(&message.name);
        let name = if field_schemas.contains_key(&natural) {
            let mut base = format!("{}{MESSAGE_INFIX}", message.name);
            while taken.contains(&schema_name(&base)) {
                base.push_str(MESSAGE_INFIX);
            }
            let renamed = schema_name(&base);
            tracing::debug!(message = %message.name, schema = %renamed, "renamed colliding message schema");
            taken.insert(renamed.clone());
            renamed
        } else {
            natural
        };
        names.insert(message.name.as_str(), name);
    }
    names
}

/// Messages that can reach themselves through message-typed fields.
fn recursive_messages<'a>(
    messages: &'a [MessageIR],
    by_name: &HashMap<&str, &'a MessageIR>,
) -> HashSet<&'a str> {
    messages
        .iter()
        .filter(|message| {
            let mut seen = HashSet::new();
            let mut stack: Vec<&str> = message.message_dependencies().collect();
            while let Some(name) = stack.pop() {
                if name == message.name {
                    return true;
                }
                if !seen.insert(name) {
                    continue;
                }
                if let Some(next) = by_name.get(name) {
                    stack.extend(next.message_dependencies());
                }
            }
            false
        })
        .map(|message| message.name.as_str())
        .collect()
}

/// Order messages so that referenced messages come before the messages
/// referencing them. Cycles keep declaration order; the back edges are
/// emitted as lazy references.
fn topological_order<'a>(
    messages: &'a [MessageIR],
    by_name: &HashMap<&str, &'a MessageIR>,
) -> Vec<&'a MessageIR> {
    let mut result = Vec::with_capacity(messages.len());
    let mut visited = HashSet::new();
    let mut in_progress = HashSet::new();

    for message in messages {
        visit(message, by_name, &mut visited, &mut in_progress, &mut result);
    }

    result
}

fn visit<'a>(
    message: &'a MessageIR,
    by_name: &HashMap<&str, &'a MessageIR>,
    visited: &mut HashSet<&'a str>,
    in_progress: &mut HashSet<&'a str>,
    result: &mut Vec<&'a MessageIR>,
) {
    let name = message.name.as_str();
    if visited.contains(name) || in_progress.contains(name) {
        return;
    }

    in_progress.insert(name);
    for dependency in message.message_dependencies() {
        if let Some(next) = by_name.get(dependency) {
            visit(*next, by_name, visited, in_progress, result);
        }
    }
    in_progress.remove(name);

    visited.insert(name);
    result.push(message);
}
