//! Error types for the CLI layer.

use std::path::PathBuf;

/// Errors that can occur while reading specs and writing migration files.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The statement generator rejected the intent.
    #[error("Generation failed: {0}")]
    Generate(#[from] blueprint_core::GenerateError),

    /// IO error (reading the spec, writing the migration file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The spec file is not a valid migration intent.
    #[error("Failed to parse spec file '{path}': {source}")]
    ParseSpec {
        /// Path to the spec file.
        path: PathBuf,
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The target migration file already exists.
    #[error("Migration file already exists: {0}")]
    MigrationExists(PathBuf),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
