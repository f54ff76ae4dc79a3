//! Code templates with `{{placeholder}}` slots.

use std::fs;
use std::path::Path;

use crate::code::CodeLanguage;
use crate::error::{EmitError, EmitResult};

const RUST_TEMPLATE: &str = include_str!("../templates/dynamic_system.rs.tmpl");
const PYTHON_TEMPLATE: &str = include_str!("../templates/dynamic_system.py.tmpl");

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Template text for the code emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    /// Wrap template text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The template compiled into this crate for `language`.
    pub fn builtin(language: CodeLanguage) -> Self {
        match language {
            CodeLanguage::Rust => Self::new(RUST_TEMPLATE),
            CodeLanguage::Python => Self::new(PYTHON_TEMPLATE),
        }
    }

    /// Load a template from disk.
    pub fn from_path(path: impl AsRef<Path>) -> EmitResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EmitError::TemplateRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute every placeholder in one pass over the template.
    ///
    /// Substituted values are never rescanned. A placeholder without a
    /// value is an error.
    pub fn render(&self, values: &[(&str, String)]) -> EmitResult<String> {
        let mut out = String::with_capacity(self.text.len() * 2);
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find(OPEN) {
            out.push_str(&rest[..start]);
            let after = &rest[start + OPEN.len()..];
            let Some(end) = after.find(CLOSE) else {
                return Err(EmitError::UnresolvedPlaceholder(after.lines().next().unwrap_or("").to_string()));
            };
            let key = after[..end].trim();
            let value = values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value)
                .ok_or_else(|| EmitError::UnresolvedPlaceholder(key.to_string()))?;
            out.push_str(value);
            rest = &after[end + CLOSE.len()..];
        }
        out.push_str(rest);
        Ok(out)
    }
}
