//! The model document: the intermediate representation the emitters consume.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::STATEMENT_TERMINATOR;
use crate::error::{ExtractError, ExtractResult};

/// Prefix shared by every auxiliary variable reference (`z[idx]`).
pub const AUX_PREFIX: &str = "z[";

/// Numerical integration settings from the parameter file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntegrationOptions {
    pub initial_time: f64,
    pub final_time: f64,
    pub step_size: f64,
    pub absolute_error: f64,
    pub relative_error: f64,
}

impl IntegrationOptions {
    /// Short keys used in reports and generated mappings, with their values.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("ti", self.initial_time),
            ("tf", self.final_time),
            ("ts", self.step_size),
            ("abserr", self.absolute_error),
            ("relerr", self.relative_error),
        ]
    }
}

/// A named constant with its default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

/// A state with its initial condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVariable {
    pub name: String,
    pub initial_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
}

/// One assignment: left-hand name and opaque right-hand expression text.
///
/// The expression keeps its trailing terminator when it was extracted for a
/// code target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equation {
    pub lhs: String,
    pub rhs: String,
}

impl Equation {
    pub fn new(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into(),
        }
    }

    /// Split a statement at its first `=`.
    pub fn parse(statement: &str, line: usize) -> ExtractResult<Self> {
        let (lhs, rhs) = statement.split_once('=').ok_or_else(|| {
            ExtractError::malformed(line, format!("expected an assignment, got '{statement}'"))
        })?;
        let lhs = lhs.trim();
        if lhs.is_empty() {
            return Err(ExtractError::malformed(line, "assignment has no left-hand side"));
        }
        Ok(Self::new(lhs, rhs.trim()))
    }

    /// Whether the left-hand side is an auxiliary variable.
    pub fn is_auxiliary(&self) -> bool {
        self.lhs.starts_with(AUX_PREFIX)
    }

    /// The expression without a trailing terminator.
    pub fn expression(&self) -> &str {
        self.rhs
            .strip_suffix(STATEMENT_TERMINATOR)
            .unwrap_or(&self.rhs)
            .trim_end()
    }

    /// `lhs = rhs` with the terminator removed.
    pub fn to_text(&self) -> String {
        format!("{} = {}", self.lhs, self.expression())
    }
}

/// How an output name is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    State,
    Dependent,
    NonState,
}

/// Everything recovered from one export file pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDocument {
    /// Class name used for generated artifacts.
    pub name: String,
    pub integration: IntegrationOptions,
    pub parameters: Vec<Parameter>,
    pub states: Vec<StateVariable>,
    /// Global variable names declared in the equations file.
    pub globals: Vec<String>,
    /// Declared size of the `z` array (zero when absent).
    pub aux_count: usize,
    pub constants: Vec<Equation>,
    /// Equations of motion.
    pub motion: Vec<Equation>,
    /// Specified-input equations; their left sides are the input names.
    pub inputs: Vec<Equation>,
    /// Non-auxiliary equations of motion whose left side is also an output.
    pub dependents: Vec<Equation>,
    pub output_names: Vec<String>,
    pub outputs: Vec<Equation>,
    /// Linear-model matrix entries plus the auxiliary statements feeding them.
    pub linear: Vec<Equation>,
}

impl ModelDocument {
    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn initial_conditions(&self) -> Vec<f64> {
        self.states.iter().map(|s| s.initial_value).collect()
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(|e| e.lhs.as_str()).collect()
    }

    /// Equations of motion whose left side starts with a state name.
    pub fn kinematical(&self) -> Vec<&Equation> {
        self.motion
            .iter()
            .filter(|eq| self.states.iter().any(|s| eq.lhs.starts_with(&s.name)))
            .collect()
    }

    /// Classify an output name as state, dependent variable or non-state output.
    ///
    /// Returns `None` for names that are none of these.
    pub fn classify_output(&self, name: &str) -> Option<OutputKind> {
        if self.states.iter().any(|s| s.name == name) {
            Some(OutputKind::State)
        } else if self.dependents.iter().any(|e| e.lhs == name) {
            Some(OutputKind::Dependent)
        } else if self.outputs.iter().any(|e| e.lhs == name) {
            Some(OutputKind::NonState)
        } else {
            None
        }
    }

    /// Check the cross-collection invariants.
    pub fn validate(&self) -> ExtractResult<()> {
        let mut seen = FxHashSet::default();
        for name in self
            .parameters
            .iter()
            .map(|p| &p.name)
            .chain(self.states.iter().map(|s| &s.name))
        {
            if !seen.insert(name.as_str()) {
                return Err(ExtractError::DuplicateName(name.clone()));
            }
        }

        let unresolved: Vec<&str> = self
            .output_names
            .iter()
            .filter(|name| self.classify_output(name).is_none())
            .map(String::as_str)
            .collect();
        if !unresolved.is_empty() {
            return Err(ExtractError::OutputClassification {
                message: format!("outputs with no defining equation: {}", unresolved.join(", ")),
            });
        }
        Ok(())
    }
}
