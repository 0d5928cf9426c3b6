use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::compiler::CompileOptions;
use crate::encoding::TextEncoding;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "output")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerSettings {
    /// PO catalog to compile.
    pub input: PathBuf,
    /// Where the compiled catalog is written.
    pub output: PathBuf,

    /// Include fuzzy entries that have a translation.
    pub include_fuzzy: bool,

    /// Encoding of hashed keys and payloads.
    /// Must match the encoding the runtime hashes lookup strings with.
    pub encoding: TextEncoding,
}

impl CompilerSettings {
    #[must_use]
    pub const fn compile_options(&self) -> CompileOptions {
        CompileOptions { include_fuzzy: self.include_fuzzy, encoding: self.encoding }
    }

    /// # Errors
    /// - Required path is empty
    /// - Input and output are the same file
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.input.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "input",
                "The input path cannot be empty. Example: \"locales/fr.po\"",
            ));
        }

        if self.output.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "output",
                "The output path cannot be empty. Example: \"locales/fr.ymo\"",
            ));
        } else if self.output == self.input {
            errors.push(ValidationError::new(
                "output",
                format!(
                    "The output path '{}' is the same as the input. Please choose a different file",
                    self.output.display()
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            input: PathBuf::from("t.po"),
            output: PathBuf::from("out.ymo"),
            include_fuzzy: false,
            encoding: TextEncoding::default(),
        }
    }
}
