//! LaTeX rendering of Autolev `.all` session listings.
//!
//! A listing interleaves numbered input lines (`(12) W_B_N> = ...`) with
//! results that start with `->` and may wrap onto following lines:
//!
//! ```text
//! (3) Q3' = U3
//! -> (4) Z = SIN(q1)*
//!    COS(q2)
//!
//! ```
//!
//! Each result is joined onto one line and rewritten for typesetting; input
//! lines and blank lines are copied through.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::emitter::write_artifact;
use crate::error::{EmitError, EmitResult};

const RESULT_PREFIX: &str = "->";

/// The squared-magnitude term some bicycle listings repeat in every result.
const MAGNITUDE_TERM: &str = "(c_4^2c_5^2+(s_4s_7-s_5c_4c_7)^2)^0.5";

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect("pattern is a valid regex"));
    };
}

pattern!(INPUT_LINE, r"^\(\d");
pattern!(SIN_OF_COORD, r"SIN\(\w(\d)\)");
pattern!(COS_OF_COORD, r"COS\(\w(\d)\)");
pattern!(UNIT_VECTOR, r"(\w)(\d)>");
pattern!(SPEED_RATE, r"u(\d)'");
pattern!(SUBSCRIPT, r"([a-zA-Z])(\d)");
pattern!(WHEEL_RADIUS, r"r([RF])");
pattern!(ANGULAR_VELOCITY, r"W_([a-z])_([a-z])>");
pattern!(DECIMAL_POWER, r"\^(\d)\.(\d)");

/// Converter from `.all` listings to LaTeX-ready text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexPublisher {
    substitute_magnitude: bool,
}

impl LatexPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the repeated magnitude term with `m`.
    pub fn with_magnitude_substitution(mut self) -> Self {
        self.substitute_magnitude = true;
        self
    }

    /// Rewrite one joined result line.
    ///
    /// `SIN(q1)` becomes `s_1`, unit vectors `e2>` become `\hat{e}_2`,
    /// speed rates `u4'` become `\dot{u}_4`, `W_a_n>` becomes
    /// `^N\omega^A` and multiplication signs are dropped.
    pub fn to_latex(&self, text: &str) -> String {
        let text = SIN_OF_COORD.replace_all(text, "s_${1}");
        let text = COS_OF_COORD.replace_all(&text, "c_${1}");
        let text = text.replace("SIN", "sin").replace("COS", "cos");
        let text = UNIT_VECTOR.replace_all(&text, r"\hat{${1}}_${2}");
        let text = SPEED_RATE.replace_all(&text, r"\dot{u}_${1}");
        let text = SUBSCRIPT.replace_all(&text, "${1}_${2}");
        let text = WHEEL_RADIUS.replace_all(&text, "r_${1}");
        let text = ANGULAR_VELOCITY.replace_all(&text, |caps: &Captures| {
            format!(
                r"^{}\omega^{}",
                caps[2].to_uppercase(),
                caps[1].to_uppercase()
            )
        });
        let mut text = text.replace('*', "");
        if self.substitute_magnitude {
            text = text.replace(MAGNITUDE_TERM, "m");
        }
        DECIMAL_POWER.replace_all(&text, "^{${1}.${2}}").into_owned()
    }

    /// Convert a whole listing.
    ///
    /// Lines that are neither input, blank, nor part of a result are
    /// dropped. A result still open at the end of the listing is flushed.
    pub fn convert(&self, listing: &str) -> String {
        let mut out = String::with_capacity(listing.len());
        let mut result: Option<String> = None;

        for line in listing.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || INPUT_LINE.is_match(trimmed) {
                if let Some(joined) = result.take() {
                    out.push_str(&self.to_latex(&joined));
                    out.push('\n');
                }
                out.push_str(line);
                out.push('\n');
            } else if line.starts_with(RESULT_PREFIX) {
                result = Some(trimmed.to_string());
            } else if let Some(joined) = result.as_mut() {
                joined.push_str(trimmed);
            }
        }

        if let Some(joined) = result {
            out.push_str(&self.to_latex(&joined));
            out.push('\n');
        }
        out
    }

    /// Convert the listing at `input` and write the result to `output`.
    pub fn convert_file(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> EmitResult<()> {
        let input = input.as_ref();
        let listing = fs::read_to_string(input).map_err(|e| EmitError::ReadError {
            path: input.to_path_buf(),
            message: e.to_string(),
        })?;
        let text = self.convert(&listing);
        write_artifact(output.as_ref(), &text)?;

        tracing::info!("Published {} → {}", input.display(), output.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trig_of_coordinates() {
        let latex = LatexPublisher::new().to_latex("-> (4) Z = SIN(q1)*COS(q2) + SIN(2*q3)");
        assert_eq!(latex, "-> (4) Z = s_1c_2 + sin(2q_3)");
    }

    #[test]
    fn test_unit_vector_hats() {
        let latex = LatexPublisher::new().to_latex("-> (7) V = rR*U1*e2>");
        assert_eq!(latex, r"-> (7) V = r_RU_1\hat{e}_2");
    }

    #[test]
    fn test_speed_rates_become_dots() {
        let latex = LatexPublisher::new().to_latex("-> (9) F = u4'*a2> - x^0.5");
        assert_eq!(latex, r"-> (9) F = \dot{u}_4\hat{a}_2 - x^{0.5}");
    }

    #[test]
    fn test_angular_velocity() {
        let latex = LatexPublisher::new().to_latex("-> (5) W_a_n> = u3*a3>");
        assert_eq!(latex, r"-> (5) ^N\omega^A = u_3\hat{a}_3");
    }

    #[test]
    fn test_magnitude_substitution() {
        let text = "-> (8) M = (COS(q4)^2*COS(q5)^2+(SIN(q4)*SIN(q7)-SIN(q5)*COS(q4)*COS(q7))^2)^0.5";
        assert_eq!(
            LatexPublisher::new().with_magnitude_substitution().to_latex(text),
            "-> (8) M = m"
        );
        assert!(LatexPublisher::new().to_latex(text).ends_with("^{0.5}"));
    }

    #[test]
    fn test_convert_joins_continuations() {
        let listing = "\
(3) Q3' = U3
-> (4) Z = SIN(q1)*
   COS(q2)

(5) X = 1
-> (6) X = 1
";
        let expected = "\
(3) Q3' = U3
-> (4) Z = s_1c_2

(5) X = 1
-> (6) X = 1
";
        assert_eq!(LatexPublisher::new().convert(listing), expected);
    }

    #[test]
    fn test_convert_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bike.all");
        let output = dir.path().join("bike.tex");
        std::fs::write(&input, "(1) A = 1\n-> (2) W_b_n> = u5*b1>\n\n").unwrap();

        LatexPublisher::new().convert_file(&input, &output).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "(1) A = 1\n-> (2) ^N\\omega^B = u_5\\hat{b}_1\n\n"
        );

        let err = LatexPublisher::new()
            .convert_file(dir.path().join("absent.all"), &output)
            .unwrap_err();
        assert!(matches!(err, EmitError::ReadError { .. }));
    }
}
