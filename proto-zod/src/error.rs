//! Error types for the schema engine.
//!
//! Every error in this module is fatal for a generation run. Generation is
//! deterministic, so a failure reproduces identically on every run and is
//! surfaced to the caller instead of being recovered from.

use thiserror::Error;

/// Result type alias for registry lookups.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Error raised while resolving a wire type to a schema descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The identifier is not part of the supported protobuf type set.
    #[error("no schema is mapped for wire type '{identifier}'")]
    UnmappedWireType { identifier: String },

    /// An enum schema was requested without the enum type it references.
    #[error("enum schemas require the name of the referenced enum type")]
    MissingEnumType,

    /// The registry built a descriptor that violates its own invariants.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}

impl RegistryError {
    /// Create an unmapped wire type error.
    pub fn unmapped(identifier: impl Into<String>) -> Self {
        Self::UnmappedWireType {
            identifier: identifier.into(),
        }
    }
}

/// A schema descriptor whose parts contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The exported name or referenced type is not a valid identifier.
    #[error("'{0}' is not a valid TypeScript identifier")]
    InvalidIdentifier(String),

    /// A bound was attached to a primitive that has no numeric or length range.
    #[error("schema '{schema}': constraint `{constraint}` cannot refine `{primitive}`")]
    IncompatibleConstraint {
        schema: String,
        constraint: String,
        primitive: String,
    },

    /// The minimum bound is greater than the maximum bound.
    #[error("schema '{schema}': minimum {min} exceeds maximum {max}")]
    InvertedBounds { schema: String, min: i128, max: i128 },

    /// A length bound on a string or array is negative.
    #[error("schema '{schema}': length bound {value} is negative")]
    NegativeLength { schema: String, value: i128 },
}

/// Error raised while assembling the schemas of one output file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// A field could not be resolved through the registry.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Two different schemas would be exported under the same name.
    #[error("schema name '{name}' is exported more than once")]
    DuplicateSchema { name: String },
}
