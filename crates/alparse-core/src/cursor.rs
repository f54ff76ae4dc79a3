//! Forward-scanning line reader and statement assembly.
//!
//! Every extractor anchors on literal marker lines, so the cursor supports
//! two moves: jump to the line after a marker (always searching from the
//! top of the file), and read the next physical line. Logical statements
//! that wrap across lines are joined by [`LineCursor::read_statement`].

use std::fs;
use std::path::Path;

use crate::config::{STATEMENT_TERMINATOR, TerminatorMode};
use crate::error::{ExtractError, ExtractResult};

/// A cursor over the physical lines of one export file.
#[derive(Debug, Clone)]
pub struct LineCursor {
    lines: Vec<String>,
    /// Index of the next line to hand out.
    pos: usize,
}

impl LineCursor {
    /// Create a cursor over in-memory text.
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            pos: 0,
        }
    }

    /// Read a file fully and create a cursor over it.
    ///
    /// The file handle is released before this returns.
    pub fn from_path(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ExtractError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::new(&text))
    }

    /// Move back to the first line.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Position the cursor just after the first line equal to `marker`.
    ///
    /// The search always starts at the top of the file and compares the
    /// trimmed line exactly. When no line matches the cursor is left
    /// exhausted and `SectionNotFound` is returned.
    pub fn seek(&mut self, marker: &str) -> ExtractResult<()> {
        self.rewind();
        while let Some(line) = self.next_line() {
            if line.trim() == marker {
                return Ok(());
            }
        }
        Err(ExtractError::section_not_found(marker))
    }

    /// Return the next physical line, untrimmed.
    pub fn next_line(&mut self) -> Option<&str> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line.as_str())
    }

    /// Return the next physical line, trimmed and owned.
    pub fn next_trimmed(&mut self) -> Option<String> {
        self.next_line().map(|line| line.trim().to_string())
    }

    /// Skip `count` lines, failing if the file is shorter.
    pub fn skip(&mut self, count: usize) -> ExtractResult<()> {
        for _ in 0..count {
            if self.next_line().is_none() {
                return Err(ExtractError::malformed(
                    self.lines.len(),
                    format!("file ends inside its {count}-line header"),
                ));
            }
        }
        Ok(())
    }

    /// One-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.pos
    }

    /// Whether every line has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// Assemble one logical statement starting from `seed`.
    ///
    /// `seed` is the already-read current line. Following lines are trimmed
    /// and appended without a separator until the accumulated text ends with
    /// the statement terminator.
    pub fn read_statement(&mut self, seed: &str, mode: TerminatorMode) -> ExtractResult<String> {
        let start = self.line_number();
        let mut statement = seed.trim().to_string();

        while !statement.ends_with(STATEMENT_TERMINATOR) {
            match self.next_line() {
                Some(line) => statement.push_str(line.trim()),
                None => return Err(ExtractError::UnterminatedStatement { line: start }),
            }
        }

        if mode == TerminatorMode::Strip {
            statement.pop();
        }
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "header\n  /* Marker */  \nz[1] = a +\n  b;\n\nlast = 1;\n";

    #[test]
    fn test_seek_positions_after_marker() {
        let mut cursor = LineCursor::new(TEXT);
        cursor.seek("/* Marker */").unwrap();
        assert_eq!(cursor.line_number(), 2);
        assert_eq!(cursor.next_line(), Some("z[1] = a +"));
    }

    #[test]
    fn test_seek_rewinds_before_searching() {
        let mut cursor = LineCursor::new(TEXT);
        cursor.seek("last = 1;").unwrap();
        cursor.seek("/* Marker */").unwrap();
        assert_eq!(cursor.line_number(), 2);
    }

    #[test]
    fn test_seek_is_case_sensitive() {
        let mut cursor = LineCursor::new(TEXT);
        let err = cursor.seek("/* marker */").unwrap_err();
        assert!(matches!(err, ExtractError::SectionNotFound { ref marker } if marker == "/* marker */"));
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_read_statement_joins_wrapped_lines() {
        let mut cursor = LineCursor::new(TEXT);
        cursor.seek("/* Marker */").unwrap();
        let seed = cursor.next_trimmed().unwrap();

        let kept = cursor.clone().read_statement(&seed, TerminatorMode::Keep).unwrap();
        assert_eq!(kept, "z[1] = a +b;");

        let stripped = cursor.read_statement(&seed, TerminatorMode::Strip).unwrap();
        assert_eq!(stripped, "z[1] = a +b");
    }

    #[test]
    fn test_read_statement_single_line() {
        let mut cursor = LineCursor::new("x = 2;\n");
        let seed = cursor.next_trimmed().unwrap();
        assert_eq!(
            cursor.read_statement(&seed, TerminatorMode::Strip).unwrap(),
            "x = 2"
        );
    }

    #[test]
    fn test_unterminated_statement() {
        let mut cursor = LineCursor::new("a = 1 +\n2 +\n3\n");
        let seed = cursor.next_trimmed().unwrap();
        let err = cursor.read_statement(&seed, TerminatorMode::Keep).unwrap_err();
        assert!(matches!(err, ExtractError::UnterminatedStatement { line: 1 }));
    }

    #[test]
    fn test_skip_past_end_fails() {
        let mut cursor = LineCursor::new("one\ntwo\n");
        assert!(cursor.skip(2).is_ok());
        assert!(matches!(
            cursor.skip(1),
            Err(ExtractError::MalformedLine { .. })
        ));
    }
}
