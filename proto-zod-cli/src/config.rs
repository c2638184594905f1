//! Configuration management.
//!
//! This module handles loading configuration from `proto-zod.toml` files,
//! merging command-line arguments, and parsing protoc plugin parameters
//! (`--proto-zod_opt=messages=true,max_string_length=1024`).

use crate::error::{CliResult, ConfigError};
use proto_zod::GeneratorOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration filename.
pub const CONFIG_FILENAME: &str = "proto-zod.toml";

/// Default suffix replacing `.proto` in generated file names.
pub const DEFAULT_FILE_SUFFIX: &str = "_proto_zod.pb.ts";

/// Main configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration.
    pub output: OutputConfig,

    /// Generator options.
    pub generator: GeneratorOptions,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory for generated files (CLI mode only).
    pub dir: PathBuf,

    /// Suffix replacing `.proto` in generated file names.
    pub file_suffix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./generated"),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
        }
    }
}

/// Configuration manager for loading and merging configs.
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file path.
    ///
    /// With no explicit path, `proto-zod.toml` in the working directory is
    /// used when present and defaults otherwise. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> CliResult<Config> {
        let config_path = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path.to_path_buf()).into());
                }
                path.to_path_buf()
            }
            None => {
                let default = PathBuf::from(CONFIG_FILENAME);
                if !default.exists() {
                    return Ok(Config::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&config_path, &content)?;
        tracing::debug!(path = %config_path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration file content.
    pub fn parse(path: &Path, content: &str) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::invalid_toml(path.to_path_buf(), e.to_string()))
    }

    /// Merge CLI arguments into configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn merge_cli_args(mut config: Config, args: &CliArgs) -> Config {
        if let Some(ref output) = args.output {
            config.output.dir = output.clone();
        }

        if let Some(max) = args.max_string_length {
            config.generator.max_string_length = max;
        }

        if let Some(messages) = args.messages {
            config.generator.messages = messages;
        }

        if let Some(types) = args.types {
            config.generator.types = types;
        }

        config
    }

    /// Generate default configuration file content with comments.
    pub fn default_config_content() -> &'static str {
        r#"# proto-zod configuration file

[output]
# Output directory for generated TypeScript files (ignored when run by protoc)
dir = "./generated"

# Suffix replacing ".proto" in generated file names
file_suffix = "_proto_zod.pb.ts"

[generator]
# Maximum length accepted by StringSchema (z.string().max(n))
max_string_length = 4294967296

# Emit a z.object schema for every message
messages = false

# Emit `export type X = z.infer<typeof XSchema>` after each message schema
# (turns on message schemas as well)
types = false
"#
    }
}

/// CLI arguments that can override configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Output directory override.
    pub output: Option<PathBuf>,

    /// Maximum string length override.
    pub max_string_length: Option<u64>,

    /// Message schema emission override.
    pub messages: Option<bool>,

    /// Type alias emission override.
    pub types: Option<bool>,
}

/// Parameters passed by protoc through `--proto-zod_opt`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PluginParameters {
    /// Explicit configuration file.
    pub config: Option<PathBuf>,

    /// Overrides applied on top of the configuration.
    pub overrides: CliArgs,
}

/// Parse a comma-separated `key=value` plugin parameter string.
///
/// A boolean key given without a value (`messages`) is read as `true`.
/// Unknown keys and malformed values are errors.
pub fn parse_parameter(parameter: &str) -> Result<PluginParameters, ConfigError> {
    let mut params = PluginParameters::default();

    for pair in parameter.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (pair, None),
        };

        match key {
            "config" => {
                let value = require_value(key, value)?;
                params.config = Some(PathBuf::from(value));
            }
            "max_string_length" => {
                let value = require_value(key, value)?;
                let max = value.parse::<u64>().map_err(|e| {
                    ConfigError::invalid_value(key, format!("'{value}' is not a length: {e}"))
                })?;
                params.overrides.max_string_length = Some(max);
            }
            "messages" => params.overrides.messages = Some(parse_flag(key, value)?),
            "types" => params.overrides.types = Some(parse_flag(key, value)?),
            _ => {
                return Err(ConfigError::UnknownParameter {
                    key: key.to_string(),
                })
            }
        }
    }

    Ok(params)
}

fn require_value<'a>(key: &str, value: Option<&'a str>) -> Result<&'a str, ConfigError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::invalid_value(key, "a value is required")),
    }
}

fn parse_flag(key: &str, value: Option<&str>) -> Result<bool, ConfigError> {
    match value {
        None => Ok(true),
        Some(value) => value
            .parse::<bool>()
            .map_err(|_| ConfigError::invalid_value(key, format!("expected true or false, got '{value}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.dir, PathBuf::from("./generated"));
        assert_eq!(config.output.file_suffix, "_proto_zod.pb.ts");
        assert_eq!(config.generator, GeneratorOptions::default());
    }

    #[test]
    fn test_default_content_parses_to_defaults() {
        let config =
            ConfigManager::parse(Path::new(CONFIG_FILENAME), ConfigManager::default_config_content())
                .unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[output]
dir = "./web/src/gen"
file_suffix = ".zod.ts"

[generator]
max_string_length = 1024
messages = true
types = true
"#;

        let config = ConfigManager::parse(Path::new("proto-zod.toml"), toml).unwrap();
        assert_eq!(config.output.dir, PathBuf::from("./web/src/gen"));
        assert_eq!(config.output.file_suffix, ".zod.ts");
        assert_eq!(config.generator.max_string_length, 1024);
        assert!(config.generator.messages);
        assert!(config.generator.types);
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = ConfigManager::parse(Path::new("bad.toml"), "[generator\nmessages = ").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { .. }));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = ConfigManager::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CliError::Config(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_merge_cli_args() {
        let args = CliArgs {
            output: Some(PathBuf::from("./custom")),
            max_string_length: Some(10),
            messages: Some(true),
            types: None,
        };

        let merged = ConfigManager::merge_cli_args(Config::default(), &args);
        assert_eq!(merged.output.dir, PathBuf::from("./custom"));
        assert_eq!(merged.generator.max_string_length, 10);
        assert!(merged.generator.messages);
        assert!(!merged.generator.types);
    }

    #[test]
    fn test_merge_cli_args_preserves_unset() {
        let config = Config::default();
        let merged = ConfigManager::merge_cli_args(config.clone(), &CliArgs::default());
        assert_eq!(merged, config);
    }

    // =========================================================================
    // Plugin parameters
    // =========================================================================

    #[test]
    fn test_parse_empty_parameter() {
        assert_eq!(parse_parameter("").unwrap(), PluginParameters::default());
    }

    #[test]
    fn test_parse_parameter() {
        let params =
            parse_parameter("max_string_length=2048, messages=true,types=false,config=zod.toml").unwrap();
        assert_eq!(params.config, Some(PathBuf::from("zod.toml")));
        assert_eq!(params.overrides.max_string_length, Some(2048));
        assert_eq!(params.overrides.messages, Some(true));
        assert_eq!(params.overrides.types, Some(false));
    }

    #[test]
    fn test_bare_flag_is_true() {
        let params = parse_parameter("messages,types").unwrap();
        assert_eq!(params.overrides.messages, Some(true));
        assert_eq!(params.overrides.types, Some(true));
    }

    #[test]
    fn test_unknown_parameter() {
        let err = parse_parameter("paths=source_relative").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownParameter { ref key } if key == "paths"));
    }

    #[test]
    fn test_invalid_parameter_values() {
        assert!(matches!(
            parse_parameter("max_string_length=-1"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_parameter("messages=yes"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            parse_parameter("config="),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
