//! JSON dump of the model document.

use std::fs;
use std::path::Path;

use alparse_core::ModelDocument;

use crate::emitter::Emitter;
use crate::error::{EmitError, EmitResult};

/// Emitter for `<className>.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }

    /// Read a document previously written by this emitter.
    pub fn read_from_file(path: impl AsRef<Path>) -> EmitResult<ModelDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| EmitError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl Emitter for JsonEmitter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, document: &ModelDocument) -> EmitResult<String> {
        Ok(serde_json::to_string_pretty(document)?)
    }
}
