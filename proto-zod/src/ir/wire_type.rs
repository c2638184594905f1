//! Protobuf wire-type identifiers.
//!
//! [`WireType`] is the closed set of protobuf types the registry knows how to
//! map: the fifteen scalar kinds plus four structural kinds (enum and the
//! `Timestamp`, `Any` and `Struct` well-known types).

use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// A protobuf scalar or structural type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireType {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Enum,
    Timestamp,
    Any,
    Struct,
}

impl WireType {
    /// Every supported wire type, scalars first.
    pub const ALL: [WireType; 19] = [
        WireType::Double,
        WireType::Float,
        WireType::Int32,
        WireType::Int64,
        WireType::Uint32,
        WireType::Uint64,
        WireType::Sint32,
        WireType::Sint64,
        WireType::Fixed32,
        WireType::Fixed64,
        WireType::Sfixed32,
        WireType::Sfixed64,
        WireType::Bool,
        WireType::String,
        WireType::Bytes,
        WireType::Enum,
        WireType::Timestamp,
        WireType::Any,
        WireType::Struct,
    ];

    /// The identifier as written in `.proto` files (`int32`, `bytes`, ...).
    ///
    /// Structural kinds use `enum`, `timestamp`, `any` and `struct`.
    pub const fn as_str(self) -> &'static str {
        match self {
            WireType::Double => "double",
            WireType::Float => "float",
            WireType::Int32 => "int32",
            WireType::Int64 => "int64",
            WireType::Uint32 => "uint32",
            WireType::Uint64 => "uint64",
            WireType::Sint32 => "sint32",
            WireType::Sint64 => "sint64",
            WireType::Fixed32 => "fixed32",
            WireType::Fixed64 => "fixed64",
            WireType::Sfixed32 => "sfixed32",
            WireType::Sfixed64 => "sfixed64",
            WireType::Bool => "bool",
            WireType::String => "string",
            WireType::Bytes => "bytes",
            WireType::Enum => "enum",
            WireType::Timestamp => "timestamp",
            WireType::Any => "any",
            WireType::Struct => "struct",
        }
    }

    /// The type name used to build the exported schema name.
    ///
    /// `bool` is spelled `Boolean` so the schema reads `BooleanSchema`.
    pub const fn type_name(self) -> &'static str {
        match self {
            WireType::Double => "Double",
            WireType::Float => "Float",
            WireType::Int32 => "Int32",
            WireType::Int64 => "Int64",
            WireType::Uint32 => "Uint32",
            WireType::Uint64 => "Uint64",
            WireType::Sint32 => "Sint32",
            WireType::Sint64 => "Sint64",
            WireType::Fixed32 => "Fixed32",
            WireType::Fixed64 => "Fixed64",
            WireType::Sfixed32 => "Sfixed32",
            WireType::Sfixed64 => "Sfixed64",
            WireType::Bool => "Boolean",
            WireType::String => "String",
            WireType::Bytes => "Bytes",
            WireType::Enum => "Enum",
            WireType::Timestamp => "Timestamp",
            WireType::Any => "Any",
            WireType::Struct => "Struct",
        }
    }

    /// Whether this is one of the fifteen protobuf scalar kinds.
    pub const fn is_scalar(self) -> bool {
        !matches!(
            self,
            WireType::Enum | WireType::Timestamp | WireType::Any | WireType::Struct
        )
    }

    /// Map a fully-qualified well-known message type to its wire type.
    ///
    /// Accepts names with or without the leading dot
    /// (`.google.protobuf.Timestamp`). Returns `None` for any other message.
    pub fn from_well_known(type_name: &str) -> Option<Self> {
        match type_name.trim_start_matches('.') {
            "google.protobuf.Timestamp" => Some(WireType::Timestamp),
            "google.protobuf.Any" => Some(WireType::Any),
            "google.protobuf.Struct" => Some(WireType::Struct),
            _ => None,
        }
    }
}

impl FromStr for WireType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WireType::ALL
            .into_iter()
            .find(|wire| wire.as_str() == s)
            .ok_or_else(|| RegistryError::unmapped(s))
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
