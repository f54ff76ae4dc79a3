//! Parse configuration.

/// Character that ends every statement in the equations file.
pub const STATEMENT_TERMINATOR: char = ';';

/// Matrix identifiers used when the caller does not override them.
pub const DEFAULT_MATRIX_NAMES: [&str; 4] = ["A", "B", "C", "D"];

/// Whether assembled statements keep their trailing terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminatorMode {
    /// Keep the `;` (code targets).
    Keep,
    /// Drop the `;` (human-readable targets).
    #[default]
    Strip,
}

/// Configuration for the extractors.
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Identifiers of the state, input, output and feed-forward matrices,
    /// in that order.
    pub matrix_names: Vec<String>,

    /// Terminator handling for assembled statements.
    pub terminator: TerminatorMode,

    /// Header lines skipped at the top of the `.in` file.
    pub in_preamble_lines: usize,

    /// Header lines skipped at the top of the `.c` file.
    pub c_preamble_lines: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            matrix_names: DEFAULT_MATRIX_NAMES.iter().map(|s| s.to_string()).collect(),
            terminator: TerminatorMode::Strip,
            in_preamble_lines: 6,
            c_preamble_lines: 20,
        }
    }
}

impl ParseConfig {
    /// Create a config for code targets (terminators kept).
    pub fn for_code() -> Self {
        Self {
            terminator: TerminatorMode::Keep,
            ..Default::default()
        }
    }

    /// Create a config for text targets (terminators stripped).
    pub fn for_text() -> Self {
        Self::default()
    }

    /// Replace the matrix identifiers.
    pub fn with_matrix_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matrix_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Return the matrix identifier `lhs` indexes into, if any.
    ///
    /// A left-hand side matches when it starts with `<name>[`.
    pub fn matrix_of(&self, lhs: &str) -> Option<&str> {
        self.matrix_names
            .iter()
            .find(|name| {
                lhs.strip_prefix(name.as_str())
                    .is_some_and(|rest| rest.starts_with('['))
            })
            .map(String::as_str)
    }
}
