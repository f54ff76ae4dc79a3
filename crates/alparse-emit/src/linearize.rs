//! Autolev command text requesting the linear-model Jacobians.
//!
//! Running the rendered commands through Autolev before exporting makes the
//! export carry the `A`, `B`, `C`, `D` entries the extractor collects into
//! the linear model.

use std::path::Path;

use alparse_core::{DEFAULT_MATRIX_NAMES, ModelDocument};

use crate::emitter::write_artifact;
use crate::error::EmitResult;

/// A holonomic constraint eliminated with the chain rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holonomic {
    /// Coordinate the constraint solves for.
    pub dependent: String,
    /// Name of the constraint expression.
    pub constraint: String,
}

/// Builder for the linearization command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearizationScript {
    pub matrices: [String; 4],
    pub states: Vec<String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub holonomic: Option<Holonomic>,
}

impl LinearizationScript {
    pub fn new(states: Vec<String>, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        Self {
            matrices: DEFAULT_MATRIX_NAMES.map(str::to_string),
            states,
            inputs,
            outputs,
            holonomic: None,
        }
    }

    /// Script for the states, inputs and outputs of `document`.
    pub fn for_document(document: &ModelDocument) -> Self {
        let owned =
            |names: Vec<&str>| -> Vec<String> { names.into_iter().map(str::to_string).collect() };
        Self::new(
            owned(document.state_names()),
            owned(document.input_names()),
            document.output_names.clone(),
        )
    }

    pub fn with_matrices(mut self, matrices: [String; 4]) -> Self {
        self.matrices = matrices;
        self
    }

    pub fn with_holonomic(mut self, holonomic: Holonomic) -> Self {
        self.holonomic = Some(holonomic);
        self
    }

    /// Render the command text.
    ///
    /// State and input matrices differentiate the state derivatives
    /// (`x'`); output and feed-forward matrices differentiate the outputs.
    /// Each matrix row ends with a blank line; a matrix with no columns is
    /// left out.
    pub fn render(&self) -> String {
        let [a, b, c, d] = &self.matrices;
        let mut text = String::new();
        self.push_matrix(&mut text, a, &self.states, &self.states, true);
        self.push_matrix(&mut text, b, &self.states, &self.inputs, true);
        self.push_matrix(&mut text, c, &self.outputs, &self.states, false);
        self.push_matrix(&mut text, d, &self.outputs, &self.inputs, false);
        text.push_str(&format!("encode {}", self.matrices.join(", ")));
        text
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> EmitResult<()> {
        write_artifact(path, &self.render())
    }

    fn push_matrix(&self, text: &mut String, matrix: &str, rows: &[String], cols: &[String], prime: bool) {
        if cols.is_empty() {
            return;
        }
        let prime = if prime { "'" } else { "" };
        for (i, row) in rows.iter().enumerate() {
            for (j, col) in cols.iter().enumerate() {
                text.push_str(&format!("{matrix}[{}, {}] = d({row}{prime}, {col})", i + 1, j + 1));
                if let Some(h) = &self.holonomic {
                    text.push_str(&format!(
                        " + d({row}{prime}, {dep}) * d({con}, {col}) / d({con}, {dep})",
                        dep = h.dependent,
                        con = h.constraint,
                    ));
                }
                text.push('\n');
            }
            text.push('\n');
        }
    }
}
