//! Message and field IR.
//!
//! These structures are what descriptor traversal hands to the file
//! pipeline: one [`MessageIR`] per protobuf message (nested messages
//! flattened), each listing its fields in declaration order.

use super::wire_type::WireType;

/// Resolved type of a single protobuf field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A scalar or well-known type served by the registry.
    Scalar(WireType),

    /// An enum, by its TypeScript type name.
    Enum(String),

    /// Another message, by its TypeScript type name.
    Message(String),
}

/// A field of a protobuf message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIR {
    /// Property name in the generated object (the field's JSON name).
    pub name: String,

    /// Resolved field type.
    pub ty: FieldType,

    /// `repeated` cardinality, rendered as an `.array()` marker.
    pub repeated: bool,
}

impl FieldIR {
    /// Create a singular field.
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            repeated: false,
        }
    }

    /// Mark the field as repeated.
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// A protobuf message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageIR {
    /// TypeScript type name (nested names are flattened, e.g. `OuterInner`).
    pub name: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldIR>,
}

impl MessageIR {
    /// Create a message with no fields.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field.
    pub fn with_field(mut self, field: FieldIR) -> Self {
        self.fields.push(field);
        self
    }

    /// Names of the messages this message references, in field order.
    pub fn message_dependencies(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter_map(|field| match &field.ty {
            FieldType::Message(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let message = MessageIR::new("User")
            .with_field(FieldIR::new("id", FieldType::Scalar(WireType::Int64)))
            .with_field(FieldIR::new("tags", FieldType::Scalar(WireType::String)).repeated());

        assert_eq!(message.fields.len(), 2);
        assert!(!message.fields[0].repeated);
        assert!(message.fields[1].repeated);
    }

    #[test]
    fn test_message_dependencies() {
        let message = MessageIR::new("Order")
            .with_field(FieldIR::new("id", FieldType::Scalar(WireType::Uint64)))
            .with_field(FieldIR::new("buyer", FieldType::Message("User".to_string())))
            .with_field(FieldIR::new("status", FieldType::Enum("Status".to_string())))
            .with_field(FieldIR::new("lines", FieldType::Message("OrderLine".to_string())).repeated());

        let deps: Vec<_> = message.message_dependencies().collect();
        assert_eq!(deps, vec!["User", "OrderLine"]);
    }
}
