//! Error types for the plugin and CLI.
//!
//! This module defines all error types used throughout the binary,
//! carrying the file, message, and field context needed to locate a failure
//! in the protobuf sources.

use std::path::PathBuf;
use thiserror::Error;

use proto_zod::RegistryError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for plugin and CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error decoding protobuf input.
    #[error("Failed to decode input: {0}")]
    Decode(#[from] DecodeError),

    /// Error during schema generation.
    #[error("Failed to generate schemas: {0}")]
    Generate(#[from] GenerateError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// Validation failed (generated files out of date).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error decoding a protobuf-encoded request or descriptor set.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The code generator request read from stdin is malformed.
    #[error("invalid CodeGeneratorRequest: {0}")]
    Request(#[source] prost::DecodeError),

    /// A descriptor set file could not be read.
    #[error("Failed to read descriptor set {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A descriptor set file is malformed.
    #[error("invalid FileDescriptorSet in {path}: {source}")]
    DescriptorSet {
        path: PathBuf,
        #[source]
        source: prost::DecodeError,
    },
}

/// Error during schema generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A field's declared type has no schema mapping.
    #[error("{file}: field '{message}.{field}': {source}")]
    Field {
        file: String,
        message: String,
        field: String,
        #[source]
        source: RegistryError,
    },

    /// Schema assembly for a file failed.
    #[error("{file}: {source}")]
    Schema {
        file: String,
        #[source]
        source: proto_zod::GenerateError,
    },

    /// A file listed for generation has no descriptor.
    #[error("File '{name}' was requested but no descriptor was provided")]
    MissingFile { name: String },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Plugin parameter key that is not recognised.
    #[error("Unknown plugin parameter '{key}'")]
    UnknownParameter { key: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Create a field mapping error.
    pub fn field(
        file: impl Into<String>,
        message: impl Into<String>,
        field: impl Into<String>,
        source: RegistryError,
    ) -> Self {
        Self::Field {
            file: file.into(),
            message: message.into(),
            field: field.into(),
            source,
        }
    }
}

impl ConfigError {
    /// Create a not found error.
    pub fn not_found(path: PathBuf) -> Self {
        Self::NotFound { path }
    }

    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_message() {
        let err = GenerateError::field("acme/v1/user.proto", "User", "legacy", RegistryError::unmapped("group"));
        assert_eq!(
            err.to_string(),
            "acme/v1/user.proto: field 'User.legacy': no schema is mapped for wire type 'group'"
        );
    }

    #[test]
    fn test_cli_error_wraps_config() {
        let err: CliError = ConfigError::invalid_value("messages", "expected true or false").into();
        assert_eq!(
            err.to_string(),
            "Failed to load configuration: Invalid configuration value for 'messages': expected true or false"
        );
    }
}
