//! The export-file-pair → artifact pipeline.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use alparse_core::{ModelDocument, ParseConfig, extract_model};
use alparse_emit::{CodeEmitter, CodeLanguage, Emitter, JsonEmitter, ReportEmitter, Template};

use crate::error::{ConvertError, ConvertResult};

/// Artifact produced by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Target {
    /// `<className>.txt` report.
    #[default]
    Text,
    /// `<className>.rs` module implementing [`DynamicSystem`](crate::DynamicSystem).
    Rust,
    /// `<className>.py` module.
    Python,
    /// `<className>.json` model dump.
    Json,
}

impl Target {
    /// Whether assembled statements keep their terminator for this target.
    fn keeps_terminator(self) -> bool {
        matches!(self, Target::Rust)
    }
}

/// Options for one conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Export file path without extension; `.in` and `.c` are appended.
    pub base: PathBuf,
    /// Name of the generated model.
    pub class_name: String,
    /// Directory the artifact is written to; the working directory when unset.
    pub output_dir: Option<PathBuf>,
    pub target: Target,
    /// Linear-model matrix identifiers; `A`, `B`, `C`, `D` when unset.
    pub matrix_names: Option<Vec<String>>,
    /// Template for code targets; the built-in one when unset.
    pub template: Option<Template>,
}

impl ConvertOptions {
    pub fn new(base: impl Into<PathBuf>, class_name: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            class_name: class_name.into(),
            output_dir: None,
            target: Target::default(),
            matrix_names: None,
            template: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_matrix_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matrix_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Path of the parameter file.
    pub fn in_path(&self) -> PathBuf {
        with_suffix(&self.base, ".in")
    }

    /// Path of the equations file.
    pub fn c_path(&self) -> PathBuf {
        with_suffix(&self.base, ".c")
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(Path::new("."))
    }

    /// Extractor configuration for the selected target.
    pub fn parse_config(&self) -> ParseConfig {
        let config = if self.target.keeps_terminator() {
            ParseConfig::for_code()
        } else {
            ParseConfig::for_text()
        };
        match &self.matrix_names {
            Some(names) => config.with_matrix_names(names.iter().cloned()),
            None => config,
        }
    }

    /// Emitter for the selected target.
    pub fn emitter(&self) -> Box<dyn Emitter> {
        let code = |language| {
            let mut emitter = CodeEmitter::new(language);
            if let Some(template) = &self.template {
                emitter = emitter.with_template(template.clone());
            }
            if let Some(names) = &self.matrix_names {
                emitter = emitter.with_matrix_names(names.iter().cloned());
            }
            emitter
        };
        match self.target {
            Target::Text => Box::new(ReportEmitter::new()),
            Target::Rust => Box::new(code(CodeLanguage::Rust)),
            Target::Python => Box::new(code(CodeLanguage::Python)),
            Target::Json => Box::new(JsonEmitter::new()),
        }
    }
}

/// `base` with `suffix` appended, so `model.v2` becomes `model.v2.in`.
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut path = OsString::from(base.as_os_str());
    path.push(suffix);
    PathBuf::from(path)
}

/// Whether `name` is an ASCII identifier, usable as a file stem and as a
/// Rust or Python type name.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extract the model document described by `options`.
///
/// The class name is checked before either export file is read.
pub fn extract(options: &ConvertOptions) -> ConvertResult<ModelDocument> {
    if !is_identifier(&options.class_name) {
        return Err(ConvertError::InvalidClassName(options.class_name.clone()));
    }
    let document = extract_model(
        options.in_path(),
        options.c_path(),
        options.class_name.clone(),
        &options.parse_config(),
    )?;
    Ok(document)
}

/// Convert an export file pair into the selected artifact.
///
/// Nothing is written when extraction fails. Returns the written path.
pub fn convert(options: &ConvertOptions) -> ConvertResult<PathBuf> {
    let document = extract(options)?;
    let path = options.emitter().emit(&document, options.output_dir())?;

    tracing::info!(
        "Converted {} → {} ({} states, {} outputs)",
        options.base.display(),
        path.display(),
        document.states.len(),
        document.output_names.len()
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alparse_core::TerminatorMode;

    #[test]
    fn test_export_paths() {
        let options = ConvertOptions::new("models/pendulum.v2", "Pendulum");
        assert_eq!(options.in_path(), PathBuf::from("models/pendulum.v2.in"));
        assert_eq!(options.c_path(), PathBuf::from("models/pendulum.v2.c"));
        assert_eq!(options.output_dir(), Path::new("."));
    }

    #[test]
    fn test_parse_config_per_target() {
        let text = ConvertOptions::new("m", "M");
        assert_eq!(text.parse_config().terminator, TerminatorMode::Strip);

        let rust = ConvertOptions::new("m", "M")
            .with_target(Target::Rust)
            .with_matrix_names(["Am", "Bm", "Cm", "Dm"]);
        let config = rust.parse_config();
        assert_eq!(config.terminator, TerminatorMode::Keep);
        assert_eq!(config.matrix_names, ["Am", "Bm", "Cm", "Dm"]);
    }

    #[test]
    fn test_emitter_extension() {
        let ext = |target| ConvertOptions::new("m", "M").with_target(target).emitter().extension();
        assert_eq!(ext(Target::Text), "txt");
        assert_eq!(ext(Target::Rust), "rs");
        assert_eq!(ext(Target::Python), "py");
        assert_eq!(ext(Target::Json), "json");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("Pendulum"));
        assert!(is_identifier("_bike2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2bike"));
        assert!(!is_identifier("My Model"));
        assert!(!is_identifier("../x"));
    }

    #[test]
    fn test_invalid_class_name_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["My Model", "../x"] {
            let options = ConvertOptions::new(dir.path().join("absent"), name)
                .with_output_dir(dir.path());
            let err = convert(&options).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidClassName(ref n) if n == name));
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_input_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions::new(dir.path().join("absent"), "Absent")
            .with_output_dir(dir.path());
        let err = convert(&options).unwrap_err();
        assert!(err.is_input_error());
        assert!(!dir.path().join("Absent.txt").exists());
    }
}
