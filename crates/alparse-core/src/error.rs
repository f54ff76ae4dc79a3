//! Error types for alparse-core.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for extraction operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Errors raised while reading an export file pair.
///
/// Every variant is fatal: a failed extraction produces no model document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Failed to read an export file.
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// A required marker line never appeared.
    #[error("section marker not found: {marker}")]
    SectionNotFound { marker: String },

    /// The file ended before a statement reached its terminator.
    #[error("statement starting at line {line} is not terminated before end of file")]
    UnterminatedStatement { line: usize },

    /// The non-state outputs listed by the write statements do not line up
    /// with the output equations found.
    #[error("output classification mismatch: {message}")]
    OutputClassification { message: String },

    /// A line did not match the token layout expected at its position.
    #[error("malformed line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    /// A parameter and a state, or two of either, share a name.
    #[error("duplicate model name '{0}'")]
    DuplicateName(String),

    /// The `z[N]` declaration does not carry a usable size.
    #[error("invalid auxiliary declaration '{0}'")]
    InvalidAuxDeclaration(String),

    /// The parameter file never set one of the integration options.
    #[error("integration option '{0}' missing from parameter file")]
    MissingIntegrationOption(&'static str),
}

impl ExtractError {
    pub(crate) fn section_not_found(marker: impl Into<String>) -> Self {
        Self::SectionNotFound {
            marker: marker.into(),
        }
    }

    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedLine {
            line,
            message: message.into(),
        }
    }
}
