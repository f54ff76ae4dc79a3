//! Parameter/state extraction from the `.in` file.
//!
//! Relevant lines have a fixed token layout:
//!
//! ```text
//! Constant       g        m/s^2   =  9.81
//! Initial Value  theta    UNITS   =  0.0
//! Initial Time   TINITIAL s       =  0.0
//! Absolute Error ABSERR           =  1.0E-08
//! ```
//!
//! Anything else is ignored. The scan ends after the `RELERR` line.

use std::path::Path;

use rustc_hash::FxHashSet;

use crate::config::ParseConfig;
use crate::cursor::LineCursor;
use crate::error::{ExtractError, ExtractResult};
use crate::model::{IntegrationOptions, Parameter, StateVariable};

/// Token that stands for "no units given".
const NO_UNITS: &str = "UNITS";

/// Everything recovered from the parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterFile {
    pub integration: IntegrationOptions,
    pub parameters: Vec<Parameter>,
    pub states: Vec<StateVariable>,
}

#[derive(Debug, Default)]
struct PartialOptions {
    initial_time: Option<f64>,
    final_time: Option<f64>,
    step_size: Option<f64>,
    absolute_error: Option<f64>,
    relative_error: Option<f64>,
}

impl PartialOptions {
    fn finish(self) -> ExtractResult<IntegrationOptions> {
        Ok(IntegrationOptions {
            initial_time: self
                .initial_time
                .ok_or(ExtractError::MissingIntegrationOption("TINITIAL"))?,
            final_time: self
                .final_time
                .ok_or(ExtractError::MissingIntegrationOption("TFINAL"))?,
            step_size: self
                .step_size
                .ok_or(ExtractError::MissingIntegrationOption("INTEGSTP"))?,
            absolute_error: self
                .absolute_error
                .ok_or(ExtractError::MissingIntegrationOption("ABSERR"))?,
            relative_error: self
                .relative_error
                .ok_or(ExtractError::MissingIntegrationOption("RELERR"))?,
        })
    }
}

/// Extractor for the `.in` parameter/initial-condition file.
pub struct ParameterExtractor<'a> {
    config: &'a ParseConfig,
}

impl<'a> ParameterExtractor<'a> {
    pub fn new(config: &'a ParseConfig) -> Self {
        Self { config }
    }

    /// Read and extract a parameter file from disk.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> ExtractResult<ParameterFile> {
        let mut cursor = LineCursor::from_path(path)?;
        self.extract(&mut cursor)
    }

    /// Extract from an open cursor.
    pub fn extract(&self, cursor: &mut LineCursor) -> ExtractResult<ParameterFile> {
        cursor.rewind();
        cursor.skip(self.config.in_preamble_lines)?;

        let mut options = PartialOptions::default();
        let mut parameters = Vec::new();
        let mut states = Vec::new();
        let mut names = FxHashSet::default();

        while let Some(line) = cursor.next_trimmed() {
            let number = cursor.line_number();
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(&keyword) = tokens.first() else {
                continue;
            };

            if keyword == "Constant" {
                let name = token(&tokens, 1, number)?;
                if !names.insert(name.to_string()) {
                    return Err(ExtractError::malformed(number, format!("duplicate name '{name}'")));
                }
                parameters.push(Parameter {
                    name: name.to_string(),
                    value: number_at(&tokens, 4, number)?,
                    units: units_at(&tokens, 2),
                });
            } else if keyword == "Initial" && tokens.get(1) == Some(&"Value") {
                let name = token(&tokens, 2, number)?;
                if !names.insert(name.to_string()) {
                    return Err(ExtractError::malformed(number, format!("duplicate name '{name}'")));
                }
                states.push(StateVariable {
                    name: name.to_string(),
                    initial_value: number_at(&tokens, 5, number)?,
                    units: units_at(&tokens, 3),
                });
            } else {
                match tokens.get(2).copied() {
                    Some("TINITIAL") => options.initial_time = Some(number_at(&tokens, 5, number)?),
                    Some("TFINAL") => options.final_time = Some(number_at(&tokens, 5, number)?),
                    Some("INTEGSTP") => options.step_size = Some(number_at(&tokens, 5, number)?),
                    Some("ABSERR") => options.absolute_error = Some(number_at(&tokens, 4, number)?),
                    Some("RELERR") => {
                        options.relative_error = Some(number_at(&tokens, 4, number)?);
                        break;
                    }
                    _ => {}
                }
            }
        }

        let integration = options.finish()?;
        tracing::debug!(
            "Parameter file: {} parameters, {} states",
            parameters.len(),
            states.len()
        );

        Ok(ParameterFile {
            integration,
            parameters,
            states,
        })
    }
}

fn token<'t>(tokens: &[&'t str], index: usize, line: usize) -> ExtractResult<&'t str> {
    tokens.get(index).copied().ok_or_else(|| {
        ExtractError::malformed(line, format!("expected at least {} tokens", index + 1))
    })
}

fn number_at(tokens: &[&str], index: usize, line: usize) -> ExtractResult<f64> {
    let raw = token(tokens, index, line)?;
    parse_number(raw)
        .ok_or_else(|| ExtractError::malformed(line, format!("'{raw}' is not a number")))
}

fn units_at(tokens: &[&str], index: usize) -> Option<String> {
    tokens
        .get(index)
        .filter(|t| **t != NO_UNITS && **t != "=")
        .map(|t| t.to_string())
}

/// Parse a numeric token, accepting Fortran-style `D` exponents.
fn parse_number(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .ok()
        .or_else(|| raw.replace(['D', 'd'], "E").parse::<f64>().ok())
}
