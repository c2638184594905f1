//! Generator options.
//!
//! Options are plain data so they can be read from a `[generator]` table in
//! a config file or filled in from protoc plugin parameters.

use serde::Deserialize;

/// Suffix appended to every exported schema name.
pub const SCHEMA_SUFFIX: &str = "Schema";

/// Default maximum length of a protobuf `string` field (2^32).
pub const DEFAULT_MAX_STRING_LENGTH: u64 = 1 << 32;

/// Exported schema name for a type name (`Int32` -> `Int32Schema`).
pub fn schema_name(type_name: &str) -> String {
    format!("{type_name}{SCHEMA_SUFFIX}")
}

/// Options controlling what the generator emits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Upper bound attached to `StringSchema` via `.max(n)`.
    pub max_string_length: u64,

    /// Emit one `z.object` schema per message.
    pub messages: bool,

    /// Emit `export type X = z.infer<typeof XSchema>` after each message
    /// schema. Implies `messages`.
    pub types: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            max_string_length: DEFAULT_MAX_STRING_LENGTH,
            messages: false,
            types: false,
        }
    }
}

impl GeneratorOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum string length.
    pub fn with_max_string_length(mut self, max: u64) -> Self {
        self.max_string_length = max;
        self
    }

    /// Set whether message object schemas are emitted.
    pub fn with_messages(mut self, messages: bool) -> Self {
        self.messages = messages;
        self
    }

    /// Set whether type inference aliases are emitted.
    pub fn with_types(mut self, types: bool) -> Self {
        self.types = types;
        self
    }

    /// Whether message object schemas are emitted, either requested directly
    /// or needed by the type aliases.
    pub fn emits_messages(&self) -> bool {
        self.messages || self.types
    }
}
