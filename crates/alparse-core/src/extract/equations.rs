//! Raw statement extraction from the `.c` equations file.
//!
//! This pass only walks marker-delimited sections and records every
//! assembled statement with the section it came from. Deciding what each
//! statement *is* happens afterwards in [`super::classify`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ParseConfig;
use crate::cursor::LineCursor;
use crate::error::{ExtractError, ExtractResult};

pub const CONSTANTS_MARKER: &str = "/* Evaluate constants */";
pub const AFTER_STEP_MARKER: &str = "/* Update variables after integration step */";
pub const BEFORE_STEP_MARKER: &str = "/* Update derivative array prior to integration step */";
pub const SPECIFIED_MARKERS: [&str; 2] = [
    "/* Quantities to be specified */",
    "/* Quantities which were specified */",
];
pub const WRITE_OUTPUT_MARKER: &str = "/* Write output to screen and to output file(s) */";
pub const EVALUATE_OUTPUT_MARKER: &str = "/* Evaluate output quantities */";
/// Label reported when the `/* ... MAIN ... */` comment is missing.
pub const MAIN_MARKER: &str = "/* MAIN */";

/// Prefix of the write statements that carry output names.
const OUTPUT_WRITE_PREFIX: &str = "writef(Fptr[";
const WRITE_PREFIX: &str = "writef";

/// Global names the exporter always declares first.
const BUILTIN_GLOBALS: [&str; 3] = ["Pi", "DEGtoRAD", "RADtoDEG"];

/// Section a statement was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Section {
    /// `/* Evaluate constants */`
    Constants,
    /// Dynamics stream outside the specified sub-block.
    Motion,
    /// Dynamics stream inside a "quantities to be specified" sub-block.
    Specified,
    /// `/* Write output to screen and to output file(s) */`
    WriteOutput,
    /// `/* Evaluate output quantities */`
    EvaluateOutput,
}

/// One assembled statement and where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub section: Section,
    pub statement: String,
    /// Line the statement started on.
    pub line: usize,
}

/// Flat, ordered record of the equations file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationLog {
    /// Names from the `double` declarations, including `z[N]`.
    pub globals: Vec<String>,
    /// Names listed by the output write statements, in order.
    pub output_names: Vec<String>,
    /// Statements in the order the phases read them.
    pub entries: Vec<LogEntry>,
}

impl EquationLog {
    /// Statements recorded for one section, in file order.
    pub fn section(&self, section: Section) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.section == section)
    }

    /// Declared size of the auxiliary array, zero when none is declared.
    pub fn aux_count(&self) -> ExtractResult<usize> {
        let Some(decl) = self.globals.iter().find(|g| g.starts_with("z[")) else {
            return Ok(0);
        };
        decl.trim_start_matches("z[")
            .trim_end_matches(']')
            .parse()
            .map_err(|_| ExtractError::InvalidAuxDeclaration(decl.clone()))
    }
}

/// Extractor for the `.c` equations file.
pub struct EquationExtractor<'a> {
    config: &'a ParseConfig,
}

impl<'a> EquationExtractor<'a> {
    pub fn new(config: &'a ParseConfig) -> Self {
        Self { config }
    }

    /// Read and extract an equations file from disk.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> ExtractResult<EquationLog> {
        let mut cursor = LineCursor::from_path(path)?;
        self.extract(&mut cursor)
    }

    /// Run every phase over an open cursor.
    pub fn extract(&self, cursor: &mut LineCursor) -> ExtractResult<EquationLog> {
        let mut log = EquationLog {
            globals: self.read_globals(cursor)?,
            ..Default::default()
        };

        self.read_constants(cursor, &mut log)?;
        self.read_dynamics(cursor, &mut log)?;
        self.read_write_block(cursor, &mut log)?;
        self.read_output_block(cursor, &mut log)?;

        tracing::debug!(
            "Equations file: {} globals, {} statements, {} output names",
            log.globals.len(),
            log.entries.len(),
            log.output_names.len()
        );
        Ok(log)
    }

    /// Phase 1: `double` declarations up to the `MAIN` comment.
    fn read_globals(&self, cursor: &mut LineCursor) -> ExtractResult<Vec<String>> {
        cursor.rewind();
        cursor.skip(self.config.c_preamble_lines)?;

        let mut globals = Vec::new();
        while let Some(line) = cursor.next_trimmed() {
            if is_main_comment(&line) {
                tracing::debug!("Read {} global names", globals.len());
                return Ok(globals);
            }

            let Some(decl) = line.strip_prefix("double") else {
                continue;
            };
            if !decl.starts_with(char::is_whitespace) {
                continue;
            }

            let mut decl = decl.trim().to_string();
            while decl.ends_with(',') {
                match cursor.next_trimmed() {
                    Some(next) => decl.push_str(&next),
                    None => {
                        return Err(ExtractError::UnterminatedStatement {
                            line: cursor.line_number(),
                        });
                    }
                }
            }

            let mut names: Vec<String> = decl
                .trim_end_matches(';')
                .split(',')
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect();

            let builtin = names
                .iter()
                .take_while(|n| BUILTIN_GLOBALS.contains(&n.as_str()))
                .count();
            names.drain(..builtin);

            if names.last().is_some_and(|n| n.starts_with("Encode")) {
                names.pop();
            }
            globals.extend(names);
        }

        Err(ExtractError::section_not_found(MAIN_MARKER))
    }

    /// Phase 2: constants up to the first blank line.
    fn read_constants(&self, cursor: &mut LineCursor, log: &mut EquationLog) -> ExtractResult<()> {
        cursor.seek(CONSTANTS_MARKER)?;
        self.read_block(cursor, log, Section::Constants)
    }

    /// Phase 3: the dynamics stream between the integration-step markers.
    fn read_dynamics(&self, cursor: &mut LineCursor, log: &mut EquationLog) -> ExtractResult<()> {
        cursor.seek(AFTER_STEP_MARKER)?;
        loop {
            match cursor.next_trimmed() {
                Some(line) if line.is_empty() => break,
                Some(_) => continue,
                None => return Err(ExtractError::section_not_found(BEFORE_STEP_MARKER)),
            }
        }

        let mut specified = false;
        loop {
            let Some(line) = cursor.next_trimmed() else {
                return Err(ExtractError::section_not_found(BEFORE_STEP_MARKER));
            };
            if line == BEFORE_STEP_MARKER {
                return Ok(());
            }
            if line.is_empty() {
                specified = false;
                continue;
            }
            if SPECIFIED_MARKERS.contains(&line.as_str()) {
                specified = true;
                continue;
            }

            let section = if specified {
                Section::Specified
            } else {
                Section::Motion
            };
            self.push_statement(cursor, log, section, &line)?;
        }
    }

    /// Phase 4: output names and the statements around the write calls.
    fn read_write_block(&self, cursor: &mut LineCursor, log: &mut EquationLog) -> ExtractResult<()> {
        cursor.seek(WRITE_OUTPUT_MARKER)?;
        while let Some(line) = cursor.next_trimmed() {
            if line.is_empty() {
                break;
            }
            if line.starts_with(OUTPUT_WRITE_PREFIX) {
                let statement = cursor.read_statement(&line, self.config.terminator)?;
                log.output_names.extend(output_names_from_write(&statement));
                continue;
            }
            if line.starts_with(WRITE_PREFIX) {
                cursor.read_statement(&line, self.config.terminator)?;
                continue;
            }
            self.push_statement(cursor, log, Section::WriteOutput, &line)?;
        }
        Ok(())
    }

    /// Phase 5: output evaluation up to the first blank line.
    fn read_output_block(&self, cursor: &mut LineCursor, log: &mut EquationLog) -> ExtractResult<()> {
        cursor.seek(EVALUATE_OUTPUT_MARKER)?;
        self.read_block(cursor, log, Section::EvaluateOutput)
    }

    fn read_block(
        &self,
        cursor: &mut LineCursor,
        log: &mut EquationLog,
        section: Section,
    ) -> ExtractResult<()> {
        while let Some(line) = cursor.next_trimmed() {
            if line.is_empty() {
                break;
            }
            self.push_statement(cursor, log, section, &line)?;
        }
        Ok(())
    }

    fn push_statement(
        &self,
        cursor: &mut LineCursor,
        log: &mut EquationLog,
        section: Section,
        seed: &str,
    ) -> ExtractResult<()> {
        let line = cursor.line_number();
        let statement = cursor.read_statement(seed, self.config.terminator)?;
        log.entries.push(LogEntry {
            section,
            statement,
            line,
        });
        Ok(())
    }
}

/// Whether a line is the `/* ... MAIN ... */` banner.
fn is_main_comment(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    tokens.len() >= 5 && tokens[0] == "/*" && tokens[2] == "MAIN" && tokens[4] == "*/"
}

/// Names between the third and the last comma field of a write statement.
fn output_names_from_write(statement: &str) -> Vec<String> {
    let fields: Vec<&str> = statement.split(',').collect();
    if fields.len() < 4 {
        return Vec::new();
    }
    fields[2..fields.len() - 1]
        .iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}
