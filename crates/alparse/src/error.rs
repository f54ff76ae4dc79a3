//! Error types for the conversion pipeline.

use alparse_core::ExtractError;
use alparse_emit::EmitError;

/// Result type for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur during a conversion.
///
/// Extraction failures mean the export files are bad; emit failures mean
/// the output environment is.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The export files could not be extracted.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// The artifact could not be rendered or written.
    #[error(transparent)]
    Emit(#[from] EmitError),

    /// The class name cannot name both a file and a generated type.
    #[error("invalid class name '{0}': expected an identifier")]
    InvalidClassName(String),
}

impl ConvertError {
    /// Whether the failure came from the export files.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ConvertError::Extract(_))
    }
}
