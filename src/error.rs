//! Crate-level error type.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::compiler::CompileError;
use crate::config::ConfigError;

/// Any error that ends a compilation run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The compiled catalog could not be written.
    #[error("Failed to write compiled catalog '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
