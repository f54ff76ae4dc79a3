//! Error types for the emitters.

use std::path::PathBuf;

/// Result type for emit operations.
pub type EmitResult<T> = Result<T, EmitError>;

/// Errors that can occur while rendering or writing an artifact.
///
/// These describe the output environment, never the export files.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Failed to write the output file.
    #[error("Failed to write file {path}: {message}")]
    WriteError { path: PathBuf, message: String },

    /// Failed to read a template.
    #[error("Failed to read template {path}: {message}")]
    TemplateRead { path: PathBuf, message: String },

    /// Failed to read a previously written artifact or an Autolev listing.
    #[error("Failed to read file {path}: {message}")]
    ReadError { path: PathBuf, message: String },

    /// A report line did not have the `name = value[, units]` shape.
    #[error("Malformed report line: {0}")]
    MalformedReport(String),

    /// A placeholder survived substitution.
    #[error("Template placeholder '{0}' has no value")]
    UnresolvedPlaceholder(String),

    /// Failed to serialize JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
