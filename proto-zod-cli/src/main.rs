//! # protoc-gen-proto-zod
//!
//! protoc plugin and CLI generating TypeScript Zod schemas from protobuf
//! definitions.
//!
//! ## Usage
//!
//! ```bash
//! # As a protoc plugin
//! protoc --plugin=protoc-gen-proto-zod --proto-zod_out=./gen --proto-zod_opt=messages user.proto
//!
//! # From a descriptor set
//! protoc --include_imports --descriptor_set_out=user.pb user.proto
//! protoc-gen-proto-zod generate --descriptor-set user.pb --output ./gen
//!
//! # Initialize configuration
//! protoc-gen-proto-zod init
//!
//! # Validate generated files are up-to-date
//! protoc-gen-proto-zod validate --descriptor-set user.pb --output ./gen
//! ```

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use proto_zod_cli::{
    config::{CliArgs, Config, ConfigManager, CONFIG_FILENAME},
    descriptor::read_descriptor_set,
    error::CliError,
    generator::{GeneratedFile, SchemaGenerator},
    plugin,
    writer::{FileWriter, WriteResult},
};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PROTO_ZOD_LOG";

#[derive(Parser)]
#[command(name = "protoc-gen-proto-zod")]
#[command(author, version, about = "Generate TypeScript Zod schemas from protobuf definitions", long_about = None)]
struct Cli {
    /// Without a subcommand, run as a protoc plugin over stdin/stdout
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Zod schemas from a FileDescriptorSet
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory for generated TypeScript files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Preview changes without writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Initialize a new proto-zod configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Validate that generated files are up-to-date
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Directory holding the generated TypeScript files
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// FileDescriptorSet written by `protoc --include_imports --descriptor_set_out`
    #[arg(short, long)]
    descriptor_set: PathBuf,

    /// Proto files to generate (defaults to every non-google file in the set)
    #[arg(short, long = "file")]
    files: Vec<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum length accepted by StringSchema
    #[arg(long)]
    max_string_length: Option<u64>,

    /// Emit a z.object schema for every message
    #[arg(long)]
    messages: bool,

    /// Emit a z.infer type alias for every message schema (implies --messages)
    #[arg(long)]
    types: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return match run_plugin() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                ExitCode::FAILURE
            }
        };
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            match e {
                CliError::Validation(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

/// Log to stderr; stdout carries the plugin response.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_plugin() -> anyhow::Result<()> {
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();
    plugin::run(stdin, stdout).context("protoc plugin run failed")
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Generate {
            input,
            output,
            dry_run,
        } => cmd_generate(input, output, dry_run),

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Validate { input, output } => cmd_validate(input, output),
    }
}

/// Load configuration and generate every requested file.
fn generate(input: &InputArgs, output: Option<PathBuf>) -> Result<(Config, Vec<GeneratedFile>), CliError> {
    let config = ConfigManager::load(input.config.as_deref())?;
    let config = ConfigManager::merge_cli_args(
        config,
        &CliArgs {
            output,
            max_string_length: input.max_string_length,
            messages: input.messages.then_some(true),
            types: input.types.then_some(true),
        },
    );

    let set = read_descriptor_set(&input.descriptor_set)?;
    let to_generate = if input.files.is_empty() {
        set.file
            .iter()
            .map(|f| f.name().to_string())
            .filter(|name| !name.starts_with("google/protobuf/"))
            .collect()
    } else {
        input.files.clone()
    };

    let files = SchemaGenerator::new(config.clone()).generate(&set.file, &to_generate)?;
    Ok((config, files))
}

/// Generate command implementation.
fn cmd_generate(input: InputArgs, output: Option<PathBuf>, dry_run: bool) -> Result<(), CliError> {
    println!(
        "{} {}",
        "Reading descriptor set".cyan(),
        input.descriptor_set.display()
    );

    let (config, files) = generate(&input, output)?;
    if files.is_empty() {
        println!("{}", "No proto files to generate.".yellow());
        return Ok(());
    }

    let schemas: usize = files.iter().map(|f| f.schemas.len()).sum();
    println!(
        "  Generated {} schema(s) in {} file(s)",
        schemas.to_string().green(),
        files.len().to_string().green()
    );

    let writer = FileWriter::new(dry_run);
    for result in writer.write_all(&config.output.dir, &files)? {
        match result {
            WriteResult::Written { path, bytes } => {
                println!("{} Written {} bytes to {}", "✓".green(), bytes, path.display());
            }
            WriteResult::DryRun { content, path } => {
                println!("{} Would write to {}:", "[dry-run]".yellow(), path.display());
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    if output.exists() && !force {
        println!(
            "{} Configuration file already exists: {}",
            "Error:".red(),
            output.display()
        );
        println!("  Use --force to overwrite");
        return Err(CliError::Validation(
            "Configuration file already exists".to_string(),
        ));
    }

    std::fs::write(&output, ConfigManager::default_config_content())?;
    println!("{} Created configuration file: {}", "✓".green(), output.display());
    Ok(())
}

/// Validate command implementation.
fn cmd_validate(input: InputArgs, output: Option<PathBuf>) -> Result<(), CliError> {
    println!("{}", "Validating generated files...".cyan());

    let (config, files) = generate(&input, output)?;
    let stale: Vec<&GeneratedFile> = files
        .iter()
        .filter(|file| !is_current(&config.output.dir.join(&file.name), &file.content))
        .collect();

    if stale.is_empty() {
        println!("{} {} file(s) are up-to-date", "✓".green(), files.len());
        return Ok(());
    }

    for file in &stale {
        println!("{} {} is out of date", "✗".red(), file.name);
    }
    println!("  Run 'protoc-gen-proto-zod generate' to update");
    Err(CliError::Validation(format!(
        "{} generated file(s) are out of date",
        stale.len()
    )))
}

fn is_current(path: &Path, expected: &str) -> bool {
    std::fs::read_to_string(path)
        .map(|existing| existing == expected)
        .unwrap_or(false)
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
