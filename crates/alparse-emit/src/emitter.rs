//! The emitter interface shared by every output format.

use std::fs;
use std::path::{Path, PathBuf};

use alparse_core::ModelDocument;

use crate::error::{EmitError, EmitResult};

/// Renders a model document into one artifact.
pub trait Emitter {
    /// File extension of the artifact, without the dot.
    fn extension(&self) -> &'static str;

    /// Render the artifact text.
    fn render(&self, document: &ModelDocument) -> EmitResult<String>;

    /// `<dir>/<className>.<ext>`
    fn output_path(&self, document: &ModelDocument, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", document.name, self.extension()))
    }

    /// Render and write the artifact into `dir`, returning the written path.
    fn emit(&self, document: &ModelDocument, dir: &Path) -> EmitResult<PathBuf> {
        let text = self.render(document)?;
        let path = self.output_path(document, dir);
        write_artifact(&path, &text)?;

        tracing::info!(
            "Wrote {} ({} lines)",
            path.display(),
            text.lines().count()
        );
        Ok(path)
    }
}

/// Write rendered text to `path`.
pub fn write_artifact(path: impl AsRef<Path>, text: &str) -> EmitResult<()> {
    let path = path.as_ref();
    fs::write(path, text).map_err(|e| EmitError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
