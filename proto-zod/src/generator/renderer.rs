//! Zod declaration renderer.
//!
//! Turns schema descriptors into TypeScript statements. Every statement the
//! renderer produces ends with `;` and a newline; separating statements with
//! blank lines is left to the file assembler.

use crate::ir::{Primitive, SchemaDescriptor};
use crate::ir::schema::check_identifier;

/// Namespace the Zod import is bound to.
pub const ZOD_NAMESPACE: &str = "z";

/// Reference from an object property to another schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaRef {
    /// Schema already declared above the reference.
    Direct(String),

    /// Schema declared later (or the enclosing schema itself), wrapped in
    /// `z.lazy` so the reference is resolved on first use.
    Lazy(String),
}

/// One property of a `z.object` schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectProperty {
    /// Property key.
    pub key: String,

    /// Schema validating the property value.
    pub schema: SchemaRef,

    /// Whether the value is a list (`.array()` marker).
    pub repeated: bool,
}

/// A message rendered as `z.object({...})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Exported schema name.
    pub name: String,

    /// Explicit output type, rendered as `: z.ZodType<T>`. Required when the
    /// schema refers to itself, since TypeScript cannot infer the type of a
    /// constant from its own initializer.
    pub annotation: Option<String>,

    /// Properties in declaration order.
    pub properties: Vec<ObjectProperty>,
}

/// One member of an explicit object type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeProperty {
    /// Property key.
    pub key: String,

    /// TypeScript type of the value.
    pub ty: String,

    /// Whether the member is declared optional (`key?: T`).
    pub optional: bool,
}

/// Serializes schemas into Zod declarations.
///
/// # Example
///
/// ```rust
/// use proto_zod::{SchemaRegistry, WireType, ZodRenderer};
///
/// let descriptor = SchemaRegistry::new().lookup(WireType::Bool).unwrap();
/// let code = ZodRenderer::new().render(&descriptor);
/// assert_eq!(code, "export const BooleanSchema = z.boolean();\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodRenderer {
    indent: String,
}

impl Default for ZodRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ZodRenderer {
    /// Create a renderer indenting object properties with two spaces.
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
        }
    }

    /// Create a renderer with a custom property indentation.
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }

    /// Render one descriptor as
    /// `export const <name> = z.<primitive>(<args>)[.<constraint>]*;`.
    pub fn render(&self, descriptor: &SchemaDescriptor) -> String {
        format!(
            "export const {} = {};\n",
            descriptor.name(),
            self.expression(descriptor)
        )
    }

    /// Render the right-hand side of a descriptor declaration.
    pub fn expression(&self, descriptor: &SchemaDescriptor) -> String {
        let mut expr = format!("{ZOD_NAMESPACE}.{}", descriptor.primitive());
        for constraint in descriptor.constraints() {
            expr.push('.');
            expr.push_str(&constraint.to_string());
        }
        expr
    }

    /// Render a message schema as a `z.object` declaration.
    pub fn render_object(&self, object: &ObjectSchema) -> String {
        let binding = match &object.annotation {
            Some(ty) => format!("{}: {ZOD_NAMESPACE}.ZodType<{ty}>", object.name),
            None => object.name.clone(),
        };

        if object.properties.is_empty() {
            return format!("export const {binding} = {ZOD_NAMESPACE}.object({{}});\n");
        }

        let mut out = format!("export const {binding} = {ZOD_NAMESPACE}.object({{\n");
        for property in &object.properties {
            out.push_str(&format!(
                "{}{}: {},\n",
                self.indent,
                property_key(&property.key),
                property_value(property)
            ));
        }
        out.push_str("});\n");
        out
    }

    /// Render `export type <type_name> = { ... };` from explicit members.
    pub fn render_object_type(&self, type_name: &str, properties: &[TypeProperty]) -> String {
        if properties.is_empty() {
            return format!("export type {type_name} = {{}};\n");
        }

        let mut out = format!("export type {type_name} = {{\n");
        for property in properties {
            let marker = if property.optional { "?" } else { "" };
            out.push_str(&format!(
                "{}{}{marker}: {};\n",
                self.indent,
                property_key(&property.key),
                property.ty
            ));
        }
        out.push_str("};\n");
        out
    }

    /// Render `export type <type_name> = z.infer<typeof <schema_name>>;`.
    pub fn render_type_alias(&self, type_name: &str, schema_name: &str) -> String {
        format!("export type {type_name} = {ZOD_NAMESPACE}.infer<typeof {schema_name}>;\n")
    }
}

/// TypeScript type of the values a descriptor accepts.
pub fn value_type(descriptor: &SchemaDescriptor) -> String {
    let mut ty = match descriptor.primitive() {
        Primitive::Number => "number".to_string(),
        Primitive::String => "string".to_string(),
        Primitive::Boolean => "boolean".to_string(),
        Primitive::Date => "Date".to_string(),
        Primitive::NativeEnum { type_name } => type_name.clone(),
        Primitive::Any => "any".to_string(),
        Primitive::Unknown => "unknown".to_string(),
    };
    for _ in 0..descriptor.array_depth() {
        ty.push_str("[]");
    }
    ty
}

fn property_value(property: &ObjectProperty) -> String {
    let mut value = match &property.schema {
        SchemaRef::Direct(name) => name.clone(),
        SchemaRef::Lazy(name) => format!("{ZOD_NAMESPACE}.lazy(() => {name})"),
    };
    if property.repeated {
        value.push_str(".array()");
    }
    value
}

fn property_key(key: &str) -> String {
    if check_identifier(key).is_ok() {
        key.to_string()
    } else {
        format!("\"{}\"", escape_string(key))
    }
}

/// Escape a string for use in a double-quoted TypeScript literal.
fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
