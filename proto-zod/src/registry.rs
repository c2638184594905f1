//! Wire type to schema descriptor table.
//!
//! The registry decides, for every protobuf wire type, which Zod primitive
//! validates it and which bounds refine it. The bounds are safety limits: a
//! wrong value silently accepts or rejects valid protobuf data, so every one
//! is derived from the Rust integer type of the same width.
//!
//! | Wire type | Schema |
//! |-----------|--------|
//! | `double` | `z.number().max(2^53)` |
//! | `float` | `z.number()` |
//! | `int32`, `sint32`, `sfixed32` | `z.number().min(-2^31).max(2^31-1)` |
//! | `int64`, `sint64`, `sfixed64` | `z.number().min(-2^63).max(2^63-1)` |
//! | `uint32`, `fixed32` | `z.number().min(0).max(2^32-1)` |
//! | `uint64`, `fixed64` | `z.number().min(0).max(2^64-1)` |
//! | `bool` | `z.boolean()` |
//! | `string` | `z.string().max(max_string_length)` |
//! | `bytes` | `z.number().min(0).max(255).array().array()` |
//! | `timestamp` | `z.date()` |
//! | `any` | `z.any()` |
//! | `struct` | `z.unknown()` |
//! | enum `E` | `z.nativeEnum(E)` |

use crate::error::{RegistryError, RegistryResult};
use crate::ir::{Constraint, FieldType, Primitive, SchemaDescriptor, WireType};
use crate::options::{schema_name, GeneratorOptions, DEFAULT_MAX_STRING_LENGTH};

/// Largest integer a double represents exactly (2^53).
pub const MAX_SAFE_DOUBLE: i128 = 1 << 53;

const INT32: (i128, i128) = (i32::MIN as i128, i32::MAX as i128);
const INT64: (i128, i128) = (i64::MIN as i128, i64::MAX as i128);
const UINT32: (i128, i128) = (0, u32::MAX as i128);
const UINT64: (i128, i128) = (0, u64::MAX as i128);
const BYTE: (i128, i128) = (0, u8::MAX as i128);

/// Maps wire types to schema descriptors.
///
/// The registry is immutable after construction and can be shared across
/// threads by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRegistry {
    max_string_length: u64,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Create a registry with the default string length limit.
    pub fn new() -> Self {
        Self {
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
        }
    }

    /// Create a registry with a custom maximum string length.
    pub fn with_max_string_length(max_string_length: u64) -> Self {
        Self { max_string_length }
    }

    /// Create a registry configured from generator options.
    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self::with_max_string_length(options.max_string_length)
    }

    /// Configured maximum string length.
    pub fn max_string_length(&self) -> u64 {
        self.max_string_length
    }

    /// Look up the descriptor for a wire type.
    ///
    /// [`WireType::Enum`] needs the referenced enum type and fails with
    /// [`RegistryError::MissingEnumType`]; use [`Self::lookup_enum`].
    pub fn lookup(&self, wire: WireType) -> RegistryResult<SchemaDescriptor> {
        let (primitive, constraints) = match wire {
            WireType::Double => (Primitive::Number, vec![Constraint::Max(MAX_SAFE_DOUBLE)]),
            WireType::Float => (Primitive::Number, Vec::new()),
            WireType::Int32 | WireType::Sint32 | WireType::Sfixed32 => {
                (Primitive::Number, range(INT32))
            }
            WireType::Int64 | WireType::Sint64 | WireType::Sfixed64 => {
                (Primitive::Number, range(INT64))
            }
            WireType::Uint32 | WireType::Fixed32 => (Primitive::Number, range(UINT32)),
            WireType::Uint64 | WireType::Fixed64 => (Primitive::Number, range(UINT64)),
            WireType::Bool => (Primitive::Boolean, Vec::new()),
            WireType::String => (
                Primitive::String,
                vec![Constraint::Max(i128::from(self.max_string_length))],
            ),
            WireType::Bytes => {
                let mut constraints = range(BYTE);
                constraints.extend([Constraint::Array, Constraint::Array]);
                (Primitive::Number, constraints)
            }
            WireType::Timestamp => (Primitive::Date, Vec::new()),
            WireType::Any => (Primitive::Any, Vec::new()),
            WireType::Struct => (Primitive::Unknown, Vec::new()),
            WireType::Enum => return Err(RegistryError::MissingEnumType),
        };

        let descriptor =
            SchemaDescriptor::new(schema_name(wire.type_name()), primitive, constraints)?;
        Ok(descriptor)
    }

    /// Build the descriptor for an enum defined elsewhere.
    ///
    /// The schema is exported as `<type_name>Schema` and validates with
    /// `z.nativeEnum(<type_name>)`.
    pub fn lookup_enum(&self, type_name: &str) -> RegistryResult<SchemaDescriptor> {
        if type_name.is_empty() {
            return Err(RegistryError::MissingEnumType);
        }

        let primitive = Primitive::NativeEnum {
            type_name: type_name.to_string(),
        };
        let descriptor = SchemaDescriptor::new(schema_name(type_name), primitive, Vec::new())?;
        Ok(descriptor)
    }

    /// Parse an identifier such as `"int32"` and look it up.
    pub fn lookup_identifier(&self, identifier: &str) -> RegistryResult<SchemaDescriptor> {
        self.lookup(identifier.parse()?)
    }

    /// Resolve a field type to its descriptor.
    ///
    /// Message references have no registry entry and resolve to `None`.
    pub fn resolve(&self, ty: &FieldType) -> RegistryResult<Option<SchemaDescriptor>> {
        match ty {
            FieldType::Scalar(wire) => self.lookup(*wire).map(Some),
            FieldType::Enum(type_name) => self.lookup_enum(type_name).map(Some),
            FieldType::Message(_) => Ok(None),
        }
    }
}

fn range((min, max): (i128, i128)) -> Vec<Constraint> {
    vec![Constraint::Min(min), Constraint::Max(max)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    /// Hand-written expectations: (wire, name, primitive, constraints).
    fn oracle() -> Vec<(WireType, &'static str, Primitive, Vec<Constraint>)> {
        use Constraint::{Array, Max, Min};
        vec![
            (WireType::Double, "DoubleSchema", Primitive::Number, vec![Max(9007199254740992)]),
            (WireType::Float, "FloatSchema", Primitive::Number, vec![]),
            (
                WireType::Int32,
                "Int32Schema",
                Primitive::Number,
                vec![Min(-2147483648), Max(2147483647)],
            ),
            (
                WireType::Int64,
                "Int64Schema",
                Primitive::Number,
                vec![Min(-9223372036854775808), Max(9223372036854775807)],
            ),
            (
                WireType::Uint32,
                "Uint32Schema",
                Primitive::Number,
                vec![Min(0), Max(4294967295)],
            ),
            (
                WireType::Uint64,
                "Uint64Schema",
                Primitive::Number,
                vec![Min(0), Max(18446744073709551615)],
            ),
            (
                WireType::Sint32,
                "Sint32Schema",
                Primitive::Number,
                vec![Min(-2147483648), Max(2147483647)],
            ),
            (
                WireType::Sint64,
                "Sint64Schema",
                Primitive::Number,
                vec![Min(-9223372036854775808), Max(9223372036854775807)],
            ),
            (
                WireType::Fixed32,
                "Fixed32Schema",
                Primitive::Number,
                vec![Min(0), Max(4294967295)],
            ),
            (
                WireType::Fixed64,
                "Fixed64Schema",
                Primitive::Number,
                vec![Min(0), Max(18446744073709551615)],
            ),
            (
                WireType::Sfixed32,
                "Sfixed32Schema",
                Primitive::Number,
                vec![Min(-2147483648), Max(2147483647)],
            ),
            (
                WireType::Sfixed64,
                "Sfixed64Schema",
                Primitive::Number,
                vec![Min(-9223372036854775808), Max(9223372036854775807)],
            ),
            (WireType::Bool, "BooleanSchema", Primitive::Boolean, vec![]),
            (WireType::String, "StringSchema", Primitive::String, vec![Max(4294967296)]),
            (
                WireType::Bytes,
                "BytesSchema",
                Primitive::Number,
                vec![Min(0), Max(255), Array, Array],
            ),
            (WireType::Timestamp, "TimestampSchema", Primitive::Date, vec![]),
            (WireType::Any, "AnySchema", Primitive::Any, vec![]),
            (WireType::Struct, "StructSchema", Primitive::Unknown, vec![]),
        ]
    }

    // =========================================================================
    // Table
    // =========================================================================

    #[test]
    fn test_lookup_matches_oracle() {
        let oracle = oracle();
        assert_eq!(oracle.len(), WireType::ALL.len() - 1);

        for (wire, name, primitive, constraints) in oracle {
            let d = registry().lookup(wire).unwrap();
            assert_eq!(d.name(), name, "{wire}");
            assert_eq!(d.primitive(), &primitive, "{wire}");
            assert_eq!(d.constraints(), constraints.as_slice(), "{wire}");
        }
    }

    #[test]
    fn test_every_wire_type_except_enum_resolves() {
        for wire in WireType::ALL {
            let result = registry().lookup(wire);
            if wire == WireType::Enum {
                assert_eq!(result, Err(RegistryError::MissingEnumType));
            } else {
                assert!(result.is_ok(), "{wire} should be mapped");
            }
        }
    }

    #[test]
    fn test_unsigned_64_bit_max_is_exact() {
        let d = registry().lookup(WireType::Uint64).unwrap();
        assert_eq!(d.element_max(), Some(i128::from(u64::MAX)));
        assert_eq!(d.element_max(), Some(18_446_744_073_709_551_615));
    }

    #[test]
    fn test_double_has_no_minimum() {
        let d = registry().lookup(WireType::Double).unwrap();
        assert_eq!(d.element_min(), None);
        assert_eq!(d.element_max(), Some(9_007_199_254_740_992));
    }

    #[test]
    fn test_bytes_element_bounds_and_wrappers() {
        let d = registry().lookup(WireType::Bytes).unwrap();
        assert_eq!(d.element_min(), Some(0));
        assert_eq!(d.element_max(), Some(255));
        assert_eq!(d.array_depth(), 2);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn test_custom_max_string_length() {
        let registry = SchemaRegistry::with_max_string_length(1024);
        let d = registry.lookup(WireType::String).unwrap();
        assert_eq!(d.constraints(), &[Constraint::Max(1024)]);
    }

    #[test]
    fn test_from_options() {
        let options = GeneratorOptions::new().with_max_string_length(77);
        assert_eq!(SchemaRegistry::from_options(&options).max_string_length(), 77);
    }

    #[test]
    fn test_max_u64_string_length_is_exact() {
        let registry = SchemaRegistry::with_max_string_length(u64::MAX);
        let d = registry.lookup(WireType::String).unwrap();
        assert_eq!(d.element_max(), Some(i128::from(u64::MAX)));
    }

    // =========================================================================
    // Enums and identifiers
    // =========================================================================

    #[test]
    fn test_lookup_enum() {
        let d = registry().lookup_enum("Status").unwrap();
        assert_eq!(d.name(), "StatusSchema");
        assert_eq!(
            d.primitive(),
            &Primitive::NativeEnum {
                type_name: "Status".to_string()
            }
        );
        assert!(d.constraints().is_empty());
    }

    #[test]
    fn test_lookup_enum_requires_name() {
        assert_eq!(
            registry().lookup_enum(""),
            Err(RegistryError::MissingEnumType)
        );
    }

    #[test]
    fn test_lookup_enum_rejects_dotted_name() {
        let err = registry().lookup_enum("acme.Status").unwrap_err();
        assert!(matches!(err, RegistryError::Descriptor(_)));
    }

    #[test]
    fn test_lookup_identifier() {
        let d = registry().lookup_identifier("sfixed32").unwrap();
        assert_eq!(d.name(), "Sfixed32Schema");
    }

    #[test]
    fn test_lookup_unknown_identifier_fails() {
        for identifier in ["group", "message", "int128", "Int32", ""] {
            let err = registry().lookup_identifier(identifier).unwrap_err();
            assert_eq!(err, RegistryError::unmapped(identifier));
        }
    }

    #[test]
    fn test_resolve_field_types() {
        let registry = registry();

        let scalar = registry
            .resolve(&FieldType::Scalar(WireType::Bool))
            .unwrap()
            .unwrap();
        assert_eq!(scalar.name(), "BooleanSchema");

        let enumeration = registry
            .resolve(&FieldType::Enum("Color".to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(enumeration.name(), "ColorSchema");

        let message = registry
            .resolve(&FieldType::Message("User".to_string()))
            .unwrap();
        assert!(message.is_none());
    }
}
