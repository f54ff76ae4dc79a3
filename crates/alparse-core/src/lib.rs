//! Extraction engine for Autolev export files.
//!
//! This crate provides:
//! - A marker-anchored line cursor with statement assembly
//! - The parameter-file and equations-file extractors
//! - Classification of extracted statements into a [`ModelDocument`]

pub mod config;
pub mod cursor;
pub mod error;
pub mod extract;
pub mod model;

pub use config::{DEFAULT_MATRIX_NAMES, ParseConfig, STATEMENT_TERMINATOR, TerminatorMode};
pub use cursor::LineCursor;
pub use error::{ExtractError, ExtractResult};
pub use extract::{
    ClassifiedEquations, EquationExtractor, EquationLog, LogEntry, ParameterExtractor,
    ParameterFile, Section, build_document, classify, extract_model,
};
pub use model::{
    AUX_PREFIX, Equation, IntegrationOptions, ModelDocument, OutputKind, Parameter,
    StateVariable,
};
