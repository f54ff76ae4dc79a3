//! alparse: convert Autolev export files into reports and runnable models.
//!
//! An Autolev export is a pair of files: `<base>.in` holds parameters,
//! initial values and integration options; `<base>.c` holds the generated
//! equations. alparse extracts both into a [`ModelDocument`] and writes one
//! artifact from it:
//!
//! - a sectioned text report (`.txt`)
//! - a Rust module implementing [`DynamicSystem`] (`.rs`)
//! - a Python module with the same interface (`.py`)
//! - a JSON dump of the document (`.json`)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use alparse::prelude::*;
//!
//! let options = ConvertOptions::new("models/pendulum", "Pendulum")
//!     .with_target(Target::Rust)
//!     .with_output_dir("generated");
//! let path = convert(&options)?;
//! println!("wrote {}", path.display());
//! # Ok::<(), alparse::ConvertError>(())
//! ```
//!
//! Lower-level pieces live in `alparse-core` (extraction) and
//! `alparse-emit` (emitters, rewrites, templates).

mod convert;
mod error;
mod system;

pub use convert::{ConvertOptions, Target, convert, extract};
pub use error::{ConvertError, ConvertResult};
pub use system::{DynamicSystem, LinearModel};

pub use alparse_core::{
    Equation, ExtractError, IntegrationOptions, ModelDocument, ParseConfig, Parameter,
    StateVariable,
};
pub use alparse_emit::{
    CodeEmitter, CodeLanguage, EmitError, Emitter, Holonomic, JsonEmitter, LatexPublisher,
    LinearizationScript, Report, ReportEmitter, Template,
};

pub mod prelude {
    //! Common imports for converting models and running generated ones.
    //!
    //! ```rust,ignore
    //! use alparse::prelude::*;
    //! ```

    pub use crate::{
        ConvertError, ConvertOptions, DynamicSystem, IntegrationOptions, LinearModel,
        ModelDocument, Target, convert, extract,
    };
    pub use alparse_emit::Emitter;
}
