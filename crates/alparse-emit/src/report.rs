//! Plain-text report emitter and reader.
//!
//! A report is a sequence of `[Section]` headers, each followed by one
//! entry per line and a blank line:
//!
//! ```text
//! [States]
//! omega = 0.0, rad/s
//! theta = 0.0, rad
//! ```

use std::fs;
use std::path::Path;

use alparse_core::{Equation, ModelDocument};

use crate::emitter::Emitter;
use crate::error::{EmitError, EmitResult};

pub const NAME_SECTION: &str = "Name";
pub const INTEGRATION_SECTION: &str = "Integration Options";
pub const PARAMETERS_SECTION: &str = "Parameters";
pub const STATES_SECTION: &str = "States";
pub const CONSTANTS_SECTION: &str = "Constants";
pub const INPUTS_SECTION: &str = "Inputs";
pub const MOTION_SECTION: &str = "Equations of Motion";
pub const DEPENDENT_SECTION: &str = "Dependent Variables";
pub const OUTPUT_NAMES_SECTION: &str = "Output Names";
pub const OUTPUTS_SECTION: &str = "Outputs";
pub const LINEAR_SECTION: &str = "Linear";

/// Section order of every report.
pub const SECTIONS: [&str; 11] = [
    NAME_SECTION,
    INTEGRATION_SECTION,
    PARAMETERS_SECTION,
    STATES_SECTION,
    CONSTANTS_SECTION,
    INPUTS_SECTION,
    MOTION_SECTION,
    DEPENDENT_SECTION,
    OUTPUT_NAMES_SECTION,
    OUTPUTS_SECTION,
    LINEAR_SECTION,
];

/// Emitter for the `.txt` report.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportEmitter;

impl ReportEmitter {
    pub fn new() -> Self {
        Self
    }

    fn section_lines(&self, document: &ModelDocument, section: &str) -> Vec<String> {
        let equations =
            |eqs: &[Equation]| -> Vec<String> { eqs.iter().map(Equation::to_text).collect() };
        match section {
            NAME_SECTION => vec![document.name.clone()],
            INTEGRATION_SECTION => document
                .integration
                .entries()
                .iter()
                .map(|(key, value)| format!("{key} = {value:?}"))
                .collect(),
            PARAMETERS_SECTION => document
                .parameters
                .iter()
                .map(|p| entry(&p.name, p.value, p.units.as_deref()))
                .collect(),
            STATES_SECTION => document
                .states
                .iter()
                .map(|s| entry(&s.name, s.initial_value, s.units.as_deref()))
                .collect(),
            CONSTANTS_SECTION => equations(&document.constants),
            INPUTS_SECTION => equations(&document.inputs),
            MOTION_SECTION => equations(&document.motion),
            DEPENDENT_SECTION => equations(&document.dependents),
            OUTPUT_NAMES_SECTION => document.output_names.clone(),
            OUTPUTS_SECTION => equations(&document.outputs),
            LINEAR_SECTION => equations(&document.linear),
            _ => Vec::new(),
        }
    }
}

fn entry(name: &str, value: f64, units: Option<&str>) -> String {
    match units {
        Some(units) => format!("{name} = {value:?}, {units}"),
        None => format!("{name} = {value:?}"),
    }
}

impl Emitter for ReportEmitter {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, document: &ModelDocument) -> EmitResult<String> {
        let mut text = String::new();
        for section in SECTIONS {
            text.push_str(&format!("[{section}]\n"));
            for line in self.section_lines(document, section) {
                text.push_str(&line);
                text.push('\n');
            }
            text.push('\n');
        }
        Ok(text)
    }
}

/// One `name = value[, units]` entry read back from a report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
}

/// A report read back into its sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    sections: Vec<(String, Vec<String>)>,
}

impl Report {
    /// Split report text into sections. Blank lines are dropped; lines
    /// before the first header are ignored.
    pub fn parse(text: &str) -> Self {
        let mut sections: Vec<(String, Vec<String>)> = Vec::new();
        for line in text.lines().map(str::trim) {
            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                sections.push((header.to_string(), Vec::new()));
            } else if !line.is_empty()
                && let Some((_, lines)) = sections.last_mut()
            {
                lines.push(line.to_string());
            }
        }
        Self { sections }
    }

    /// Read a report from disk.
    pub fn read_from_file(path: impl AsRef<Path>) -> EmitResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EmitError::ReadError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::parse(&text))
    }

    /// Section names in file order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    /// Lines of one section.
    pub fn section(&self, name: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, lines)| lines.as_slice())
    }

    /// Entries of a `name = value[, units]` section.
    pub fn entries(&self, name: &str) -> EmitResult<Vec<ReportEntry>> {
        self.section(name)
            .unwrap_or_default()
            .iter()
            .map(|line| parse_entry(line))
            .collect()
    }

    /// `(name, initial value)` pairs of the `[States]` section.
    pub fn states(&self) -> EmitResult<Vec<(String, f64)>> {
        Ok(self
            .entries(STATES_SECTION)?
            .into_iter()
            .map(|e| (e.name, e.value))
            .collect())
    }
}

fn parse_entry(line: &str) -> EmitResult<ReportEntry> {
    let malformed = || EmitError::MalformedReport(line.to_string());
    let (name, rest) = line.split_once(" = ").ok_or_else(malformed)?;
    let (value, units) = match rest.split_once(", ") {
        Some((value, units)) => (value, Some(units.to_string())),
        None => (rest, None),
    };
    Ok(ReportEntry {
        name: name.trim().to_string(),
        value: value.trim().parse().map_err(|_| malformed())?,
        units,
    })
}
