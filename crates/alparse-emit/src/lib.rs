//! Emitters for alparse model documents.
//!
//! # Architecture
//!
//! ```text
//!                    ┌──► ReportEmitter ──► Model.txt
//!                    │
//! ModelDocument ─────┼──► CodeEmitter ────► Model.rs / Model.py
//!                    │        ▲
//!                    │     Template
//!                    │
//!                    └──► JsonEmitter ────► Model.json
//! ```
//!
//! Emitters never look at the export files; everything they write comes
//! from the document. [`LatexPublisher`] is separate: it typesets Autolev
//! `.all` session listings.

mod code;
mod emitter;
mod error;
mod json;
mod latex;
mod linearize;
mod report;
pub mod rewrite;
mod template;

pub use code::{CodeEmitter, CodeLanguage};
pub use emitter::{Emitter, write_artifact};
pub use error::{EmitError, EmitResult};
pub use json::JsonEmitter;
pub use latex::LatexPublisher;
pub use linearize::{Holonomic, LinearizationScript};
pub use report::{Report, ReportEmitter, ReportEntry, SECTIONS};
pub use template::Template;

/// Report section names.
pub mod sections {
    pub use crate::report::{
        CONSTANTS_SECTION, DEPENDENT_SECTION, INPUTS_SECTION, INTEGRATION_SECTION,
        LINEAR_SECTION, MOTION_SECTION, NAME_SECTION, OUTPUT_NAMES_SECTION, OUTPUTS_SECTION,
        PARAMETERS_SECTION, STATES_SECTION,
    };
}
