//! Classification of the raw equation log into typed collections.
//!
//! Routing rules:
//!
//! - constants, equations of motion and specified inputs follow their section;
//! - in the write-output block a left side of the form `<matrix>[` is a
//!   linear-matrix entry, anything else an output equation;
//! - in the output-evaluation block statements are outputs until every
//!   non-state output has been defined, after which the rest of the block
//!   feeds the linear model. Matrix entries are linear wherever they appear;
//! - dependent variables are the non-auxiliary equations of motion whose
//!   left side is also a requested output.
//!
//! The count-based switch in the output-evaluation block relies on the
//! exporter writing outputs before the linear-model work.

use rustc_hash::FxHashSet;

use super::equations::{EquationLog, Section};
use crate::config::ParseConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::model::Equation;

/// The equation collections of a model document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedEquations {
    pub constants: Vec<Equation>,
    pub motion: Vec<Equation>,
    pub inputs: Vec<Equation>,
    pub dependents: Vec<Equation>,
    pub outputs: Vec<Equation>,
    pub linear: Vec<Equation>,
}

/// Classify every statement of `log`.
pub fn classify(
    log: &EquationLog,
    state_names: &[&str],
    config: &ParseConfig,
) -> ExtractResult<ClassifiedEquations> {
    let parse_section = |section: Section| -> ExtractResult<Vec<Equation>> {
        log.section(section)
            .map(|entry| Equation::parse(&entry.statement, entry.line))
            .collect()
    };

    let constants = parse_section(Section::Constants)?;
    let motion = parse_section(Section::Motion)?;
    let inputs = parse_section(Section::Specified)?;

    let non_auxiliary: Vec<&Equation> = motion.iter().filter(|eq| !eq.is_auxiliary()).collect();

    let mut outputs = Vec::new();
    let mut written_linear = Vec::new();
    for eq in parse_section(Section::WriteOutput)? {
        if config.matrix_of(&eq.lhs).is_some() {
            written_linear.push(eq);
        } else {
            outputs.push(eq);
        }
    }

    let mut pending = non_state_outputs(log, state_names, &non_auxiliary, &outputs);
    let expected = pending.len();
    let mut linear = Vec::new();
    for eq in parse_section(Section::EvaluateOutput)? {
        if config.matrix_of(&eq.lhs).is_some() || pending.is_empty() {
            linear.push(eq);
            continue;
        }
        pending.retain(|name| *name != eq.lhs);
        outputs.push(eq);
    }

    if !pending.is_empty() {
        return Err(ExtractError::OutputClassification {
            message: format!(
                "expected {expected} non-state outputs, found {}; missing: {}",
                expected - pending.len(),
                pending.join(", ")
            ),
        });
    }
    linear.extend(written_linear);

    let output_names: FxHashSet<&str> = log.output_names.iter().map(String::as_str).collect();
    let dependents = non_auxiliary
        .into_iter()
        .filter(|eq| output_names.contains(eq.lhs.as_str()))
        .cloned()
        .collect();

    Ok(ClassifiedEquations {
        constants,
        motion,
        inputs,
        dependents,
        outputs,
        linear,
    })
}

/// Output names that are neither states, dependent variables, nor already
/// defined in the write-output block. Order follows the write statements.
fn non_state_outputs(
    log: &EquationLog,
    state_names: &[&str],
    non_auxiliary: &[&Equation],
    written: &[Equation],
) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    for name in &log.output_names {
        if !seen.insert(name.as_str()) {
            tracing::warn!("Output '{}' is written more than once", name);
            continue;
        }
        let resolved = state_names.contains(&name.as_str())
            || non_auxiliary.iter().any(|eq| eq.lhs == *name)
            || written.iter().any(|eq| eq.lhs == *name);
        if !resolved {
            names.push(name.clone());
        }
    }
    names
}
