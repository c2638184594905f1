//! protoc plugin transport.
//!
//! protoc writes a `CodeGeneratorRequest` to the plugin's stdin and reads a
//! `CodeGeneratorResponse` from its stdout. Generation failures are reported
//! through the response's `error` field so protoc can print them against
//! the offending file; only transport failures surface as `Err`.

use std::io::{Read, Write};

use prost::Message;
use prost_types::compiler::code_generator_response::{Feature, File};
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::config::{parse_parameter, ConfigManager};
use crate::error::{CliResult, DecodeError};
use crate::generator::{GeneratedFile, SchemaGenerator};

/// Read a request from `input`, generate, and write the response to
/// `output`.
pub fn run<R: Read, W: Write>(mut input: R, mut output: W) -> CliResult<()> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;

    let request = CodeGeneratorRequest::decode(bytes.as_slice()).map_err(DecodeError::Request)?;
    let response = handle_request(&request);

    output.write_all(&response.encode_to_vec())?;
    output.flush()?;
    Ok(())
}

/// Build the response for a decoded request.
pub fn handle_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    let mut response = CodeGeneratorResponse {
        supported_features: Some(Feature::Proto3Optional as u64),
        ..Default::default()
    };

    match generate(request) {
        Ok(files) => {
            response.file = files.into_iter().map(into_response_file).collect();
        }
        Err(e) => {
            tracing::error!(error = %e, "generation failed");
            response.error = Some(e.to_string());
        }
    }

    response
}

fn generate(request: &CodeGeneratorRequest) -> CliResult<Vec<GeneratedFile>> {
    let params = parse_parameter(request.parameter())?;
    let config = ConfigManager::load(params.config.as_deref())?;
    let config = ConfigManager::merge_cli_args(config, &params.overrides);

    tracing::debug!(
        files = request.file_to_generate.len(),
        descriptors = request.proto_file.len(),
        "handling code generator request"
    );

    SchemaGenerator::new(config).generate(&request.proto_file, &request.file_to_generate)
}

fn into_response_file(file: GeneratedFile) -> File {
    File {
        name: Some(file.name),
        content: Some(file.content),
        ..Default::default()
    }
}
