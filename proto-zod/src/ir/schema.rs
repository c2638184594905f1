//! Schema descriptor definitions.
//!
//! A [`SchemaDescriptor`] is the in-memory form of one generated schema
//! declaration: an exported name, the Zod primitive it composes, and the
//! ordered chain of constraints refining that primitive.

use std::fmt;

use crate::error::DescriptorError;

/// Base Zod constructor a schema composes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `z.number()`
    Number,

    /// `z.string()`
    String,

    /// `z.boolean()`
    Boolean,

    /// `z.date()`
    Date,

    /// `z.nativeEnum(TypeName)`, referencing an enum defined elsewhere.
    NativeEnum { type_name: String },

    /// `z.any()`
    Any,

    /// `z.unknown()`
    Unknown,
}

impl Primitive {
    /// Constructor name without arguments.
    pub fn constructor(&self) -> &'static str {
        match self {
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::Date => "date",
            Primitive::NativeEnum { .. } => "nativeEnum",
            Primitive::Any => "any",
            Primitive::Unknown => "unknown",
        }
    }

    /// Arguments passed to the constructor call.
    pub fn arguments(&self) -> &str {
        match self {
            Primitive::NativeEnum { type_name } => type_name,
            _ => "",
        }
    }

    /// Whether `min`/`max` constrain this primitive (value or length).
    fn is_bounded(&self) -> bool {
        matches!(self, Primitive::Number | Primitive::String)
    }

    /// Whether bounds on this primitive count characters rather than values.
    fn bounds_are_lengths(&self) -> bool {
        matches!(self, Primitive::String)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.constructor(), self.arguments())
    }
}

/// One chained refinement applied to a primitive.
///
/// Bounds are `i128` so every protobuf extreme, including `2^64 - 1`, is
/// held and printed exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    /// `.min(n)`: lower value bound, or minimum length.
    Min(i128),

    /// `.max(n)`: upper value bound, or maximum length.
    Max(i128),

    /// `.array()`: wraps everything before it as the element schema.
    Array,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Min(n) => write!(f, "min({n})"),
            Constraint::Max(n) => write!(f, "max({n})"),
            Constraint::Array => f.write_str("array()"),
        }
    }
}

/// One generated validation schema before rendering.
///
/// Descriptors are checked on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaDescriptor {
    name: String,
    primitive: Primitive,
    constraints: Vec<Constraint>,
}

impl SchemaDescriptor {
    /// Build a descriptor, rejecting constraint chains that contradict the
    /// primitive they refine.
    pub fn new(
        name: impl Into<String>,
        primitive: Primitive,
        constraints: Vec<Constraint>,
    ) -> Result<Self, DescriptorError> {
        let descriptor = Self {
            name: name.into(),
            primitive,
            constraints,
        };
        descriptor.check()?;
        Ok(descriptor)
    }

    /// Exported identifier of the schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primitive the schema composes.
    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Constraints in emission order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Lower bound on the element value, if any.
    ///
    /// Only constraints before the first `.array()` are considered.
    pub fn element_min(&self) -> Option<i128> {
        self.element_constraints().find_map(|c| match c {
            Constraint::Min(n) => Some(*n),
            _ => None,
        })
    }

    /// Upper bound on the element value, if any.
    pub fn element_max(&self) -> Option<i128> {
        self.element_constraints().find_map(|c| match c {
            Constraint::Max(n) => Some(*n),
            _ => None,
        })
    }

    /// Number of `.array()` wrappers applied.
    pub fn array_depth(&self) -> usize {
        self.constraints
            .iter()
            .filter(|c| matches!(c, Constraint::Array))
            .count()
    }

    fn element_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .take_while(|c| !matches!(c, Constraint::Array))
    }

    fn check(&self) -> Result<(), DescriptorError> {
        check_identifier(&self.name)?;
        if let Primitive::NativeEnum { type_name } = &self.primitive {
            check_identifier(type_name)?;
        }

        // Each `.array()` starts a new segment whose bounds are lengths.
        let mut in_array = false;
        let mut min: Option<i128> = None;
        let mut max: Option<i128> = None;

        for constraint in &self.constraints {
            match *constraint {
                Constraint::Array => {
                    in_array = true;
                    min = None;
                    max = None;
                }
                Constraint::Min(value) | Constraint::Max(value) => {
                    if !in_array && !self.primitive.is_bounded() {
                        return Err(DescriptorError::IncompatibleConstraint {
                            schema: self.name.clone(),
                            constraint: constraint.to_string(),
                            primitive: self.primitive.to_string(),
                        });
                    }
                    if (in_array || self.primitive.bounds_are_lengths()) && value < 0 {
                        return Err(DescriptorError::NegativeLength {
                            schema: self.name.clone(),
                            value,
                        });
                    }
                    if matches!(constraint, Constraint::Min(_)) {
                        min = Some(value);
                    } else {
                        max = Some(value);
                    }
                    if let (Some(min), Some(max)) = (min, max) {
                        if min > max {
                            return Err(DescriptorError::InvertedBounds {
                                schema: self.name.clone(),
                                min,
                                max,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

/// Check that `name` can be used as a TypeScript binding.
pub(crate) fn check_identifier(name: &str) -> Result<(), DescriptorError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DescriptorError::InvalidIdentifier(name.to_string()))
    }
}
