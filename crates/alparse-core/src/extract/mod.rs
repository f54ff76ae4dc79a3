//! Extractors for the `.in` and `.c` export files.
//!
//! ```text
//! model.in ──► ParameterExtractor ──► ParameterFile ─┐
//!                                                    ├──► classify ──► ModelDocument
//! model.c  ──► EquationExtractor  ──► EquationLog  ──┘
//! ```

pub mod classify;
pub mod equations;
pub mod params;

pub use classify::{ClassifiedEquations, classify};
pub use equations::{EquationExtractor, EquationLog, LogEntry, Section};
pub use params::{ParameterExtractor, ParameterFile};

use std::path::Path;

use crate::config::ParseConfig;
use crate::error::ExtractResult;
use crate::model::ModelDocument;

/// Combine both extraction results into a validated model document.
pub fn build_document(
    name: impl Into<String>,
    params: ParameterFile,
    log: EquationLog,
    config: &ParseConfig,
) -> ExtractResult<ModelDocument> {
    let state_names: Vec<&str> = params.states.iter().map(|s| s.name.as_str()).collect();
    let classified = classify(&log, &state_names, config)?;
    let aux_count = log.aux_count()?;

    let document = ModelDocument {
        name: name.into(),
        integration: params.integration,
        parameters: params.parameters,
        states: params.states,
        globals: log.globals,
        aux_count,
        constants: classified.constants,
        motion: classified.motion,
        inputs: classified.inputs,
        dependents: classified.dependents,
        output_names: log.output_names,
        outputs: classified.outputs,
        linear: classified.linear,
    };
    document.validate()?;
    Ok(document)
}

/// Extract a model document from an export file pair on disk.
pub fn extract_model(
    in_path: impl AsRef<Path>,
    c_path: impl AsRef<Path>,
    name: impl Into<String>,
    config: &ParseConfig,
) -> ExtractResult<ModelDocument> {
    let params = ParameterExtractor::new(config).extract_file(in_path)?;
    let log = EquationExtractor::new(config).extract_file(c_path)?;
    let document = build_document(name, params, log, config)?;

    tracing::debug!(
        "Model '{}': {} states, {} motion equations, {} outputs, {} linear entries",
        document.name,
        document.states.len(),
        document.motion.len(),
        document.outputs.len(),
        document.linear.len()
    );
    Ok(document)
}
