//! Source-code emitter.
//!
//! Fills a [`Template`] with the model document's fields. Equation blocks
//! are rewritten so auxiliary terms live on the instance (`self.z[idx]`),
//! constants read parameters from the instance's parameter map and linear
//! model entries land in the target's matrix variables.

use alparse_core::{DEFAULT_MATRIX_NAMES, Equation, ModelDocument};

use crate::emitter::Emitter;
use crate::error::EmitResult;
use crate::rewrite::{self, IndexStyle};
use crate::template::Template;

/// Indentation of statements inside generated method bodies.
const BODY_INDENT: &str = "        ";

/// Target language of the code emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeLanguage {
    Rust,
    Python,
}

impl CodeLanguage {
    pub fn extension(self) -> &'static str {
        match self {
            CodeLanguage::Rust => "rs",
            CodeLanguage::Python => "py",
        }
    }

    fn quote(self) -> char {
        match self {
            CodeLanguage::Rust => '"',
            CodeLanguage::Python => '\'',
        }
    }

    fn terminator(self) -> &'static str {
        match self {
            CodeLanguage::Rust => ";",
            CodeLanguage::Python => "",
        }
    }

    fn matrix_targets(self) -> [&'static str; 4] {
        match self {
            CodeLanguage::Rust => ["linear.a", "linear.b", "linear.c", "linear.d"],
            CodeLanguage::Python => ["self.A", "self.B", "self.C", "self.D"],
        }
    }

    fn index_style(self) -> IndexStyle {
        match self {
            CodeLanguage::Rust => IndexStyle::Nested,
            CodeLanguage::Python => IndexStyle::Tuple,
        }
    }

    /// Local binding of `name` to `value`.
    fn binding(self, name: &str, value: &str) -> String {
        match self {
            CodeLanguage::Rust => format!("let {name} = {value};"),
            CodeLanguage::Python => format!("{name} = {value}"),
        }
    }

    fn float(self, value: f64) -> String {
        format!("{value:?}")
    }

    fn string_list<'a>(self, items: impl IntoIterator<Item = &'a str>) -> String {
        let q = self.quote();
        let items: Vec<String> = items.into_iter().map(|s| format!("{q}{s}{q}")).collect();
        match self {
            CodeLanguage::Rust => items.join(", "),
            CodeLanguage::Python => format!("[{}]", items.join(", ")),
        }
    }

    fn float_list(self, values: &[f64]) -> String {
        let items: Vec<String> = values.iter().map(|v| self.float(*v)).collect();
        match self {
            CodeLanguage::Rust => items.join(", "),
            CodeLanguage::Python => format!("[{}]", items.join(", ")),
        }
    }

    /// Vector built from local names, as returned by generated methods.
    fn vector(self, names: &[String]) -> String {
        match self {
            CodeLanguage::Rust => format!("vec![{}]", names.join(", ")),
            CodeLanguage::Python => format!("array([{}])", names.join(", ")),
        }
    }

    /// Zero-initialised local array for indexed targets such as `Encode[0]`.
    fn array_declaration(self, name: &str, len: usize) -> String {
        match self {
            CodeLanguage::Rust => format!("let mut {name} = vec![0.0; {len}];"),
            CodeLanguage::Python => format!("{name} = zeros({len})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Constants,
    Plain,
    Linear,
}

/// Emitter for runnable dynamic-system modules.
#[derive(Debug, Clone)]
pub struct CodeEmitter {
    language: CodeLanguage,
    template: Template,
    matrix_names: Vec<String>,
}

impl CodeEmitter {
    /// Create an emitter using the built-in template for `language`.
    pub fn new(language: CodeLanguage) -> Self {
        Self {
            language,
            template: Template::builtin(language),
            matrix_names: DEFAULT_MATRIX_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the template.
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    /// Replace the linear-model matrix identifiers.
    pub fn with_matrix_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.matrix_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn language(&self) -> CodeLanguage {
        self.language
    }

    /// Placeholder values for `document`, keyed by placeholder name.
    pub fn placeholders(&self, document: &ModelDocument) -> Vec<(&'static str, String)> {
        let lang = self.language;
        let lookup = lookup_names(document);

        let derivatives: Vec<String> = document
            .states
            .iter()
            .map(|s| format!("{}p", s.name))
            .collect();
        let state_aux = state_aux(document);

        vec![
            ("name", document.name.clone()),
            ("intOpts", self.integration_options(document)),
            ("parameters", self.parameters(document)),
            ("stateNames", lang.string_list(document.state_names())),
            ("initialConditions", lang.float_list(&document.initial_conditions())),
            ("inputNames", lang.string_list(document.input_names())),
            (
                "outputNames",
                lang.string_list(document.output_names.iter().map(String::as_str)),
            ),
            ("numZees", document.aux_count.to_string()),
            ("constants", self.block(&document.constants, Block::Constants, &lookup)),
            ("extractParameters", self.extract_parameters(&lookup)),
            ("extractStates", self.extract_states(document)),
            ("extractInputs", self.extract_inputs(document)),
            ("eom", self.block(&document.motion, Block::Plain, &lookup)),
            ("storeDerivatives", lang.vector(&derivatives)),
            ("inputs", self.inputs(document)),
            ("stateAux", self.block(&state_aux, Block::Plain, &lookup)),
            ("dependent", self.block(&document.dependents, Block::Plain, &lookup)),
            ("outputs", self.block(&document.outputs, Block::Plain, &lookup)),
            ("storeOutputs", lang.vector(&document.output_names)),
            ("linear", self.block(&document.linear, Block::Linear, &lookup)),
        ]
    }

    fn integration_options(&self, document: &ModelDocument) -> String {
        let lang = self.language;
        let options = &document.integration;
        match lang {
            CodeLanguage::Rust => [
                ("initial_time", options.initial_time),
                ("final_time", options.final_time),
                ("step_size", options.step_size),
                ("absolute_error", options.absolute_error),
                ("relative_error", options.relative_error),
            ]
            .iter()
            .map(|(field, value)| format!("            {field}: {},", lang.float(*value)))
            .collect::<Vec<_>>()
            .join("\n"),
            CodeLanguage::Python => {
                let mut entries = options.entries();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                dictionary(lang, entries.iter().map(|(k, v)| (*k, *v)))
            }
        }
    }

    fn parameters(&self, document: &ModelDocument) -> String {
        let lang = self.language;
        let mut parameters: Vec<(&str, f64)> = document
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.value))
            .collect();
        parameters.sort_by(|a, b| a.0.cmp(b.0));

        match lang {
            CodeLanguage::Rust => parameters
                .iter()
                .map(|(name, value)| format!("        (\"{name}\".to_string(), {}),", lang.float(*value)))
                .collect::<Vec<_>>()
                .join("\n"),
            CodeLanguage::Python => dictionary(lang, parameters.into_iter()),
        }
    }

    fn extract_parameters(&self, names: &[&str]) -> String {
        let q = self.language.quote();
        indent_lines(
            names
                .iter()
                .map(|name| self.language.binding(name, &format!("self.parameters[{q}{name}{q}]"))),
        )
    }

    fn extract_states(&self, document: &ModelDocument) -> String {
        indent_lines(
            document
                .state_names()
                .iter()
                .enumerate()
                .map(|(i, name)| self.language.binding(name, &format!("x[{i}]"))),
        )
    }

    fn extract_inputs(&self, document: &ModelDocument) -> String {
        let lang = self.language;
        let head = lang.binding("u", "self.inputs(t)");
        let lines = document
            .input_names()
            .into_iter()
            .enumerate()
            .map(|(i, name)| lang.binding(name, &format!("u[{i}]")));
        indent_lines(std::iter::once(head).chain(lines))
    }

    fn inputs(&self, document: &ModelDocument) -> String {
        let lang = self.language;
        indent_lines(document.inputs.iter().enumerate().map(|(i, eq)| {
            format!(
                "u[{i}] = {}{}",
                self.expression(eq, Block::Plain, &[]),
                lang.terminator()
            )
        }))
    }

    /// Render an equation block, one statement per line.
    fn block(&self, equations: &[Equation], block: Block, lookup: &[&str]) -> String {
        let declarations = self
            .indexed_locals(equations)
            .into_iter()
            .map(|(name, len)| self.language.array_declaration(name, len));
        let statements = equations
            .iter()
            .flat_map(|eq| self.statement(eq, block, lookup));
        indent_lines(declarations.chain(statements))
    }

    /// Right-hand side with every rewrite the block needs.
    fn expression(&self, equation: &Equation, block: Block, lookup: &[&str]) -> String {
        let mut rhs = equation.expression().to_string();
        if self.language == CodeLanguage::Rust {
            rhs = rewrite::float_literals(&rhs);
        }
        rhs = rewrite::owner_scoped_aux(&rhs);
        if block == Block::Linear {
            rhs = self.rename_matrices(&rhs);
        }
        if block == Block::Constants {
            rhs = rewrite::parameter_lookup(&rhs, lookup, self.language.quote());
        }
        rhs
    }

    fn statement(&self, equation: &Equation, block: Block, lookup: &[&str]) -> Vec<String> {
        let lang = self.language;
        let rhs = self.expression(equation, block, lookup);
        let lhs = equation.lhs.as_str();
        let end = lang.terminator();

        if equation.is_auxiliary() {
            return vec![format!("{} = {rhs}{end}", rewrite::owner_scoped_aux(lhs))];
        }
        if block == Block::Linear && self.is_matrix_entry(lhs) {
            return vec![format!("{} = {rhs}{end}", self.rename_matrices(lhs))];
        }
        if rewrite::indexed_target(lhs).is_some() {
            return vec![format!("{lhs} = {rhs}{end}")];
        }

        match (block, lang) {
            (Block::Constants, CodeLanguage::Rust) => vec![
                lang.binding(lhs, &rhs),
                format!("self.parameters.insert(\"{lhs}\".to_string(), {lhs});"),
            ],
            (Block::Constants, CodeLanguage::Python) => {
                vec![format!("self.parameters['{lhs}'] = {rhs}")]
            }
            _ => vec![lang.binding(lhs, &rhs)],
        }
    }

    fn is_matrix_entry(&self, lhs: &str) -> bool {
        self.matrix_names.iter().any(|name| {
            lhs.strip_prefix(name.as_str())
                .is_some_and(|rest| rest.starts_with('['))
        })
    }

    fn rename_matrices(&self, text: &str) -> String {
        rewrite::linear_matrix_names(
            text,
            &self.matrix_names,
            &self.language.matrix_targets(),
            self.language.index_style(),
        )
    }

    /// One-dimensional indexed targets that need a local array, with the
    /// array length each needs.
    fn indexed_locals<'e>(&self, equations: &'e [Equation]) -> Vec<(&'e str, usize)> {
        let mut locals: Vec<(&str, usize)> = Vec::new();
        for eq in equations {
            if eq.is_auxiliary() || self.is_matrix_entry(&eq.lhs) {
                continue;
            }
            let Some((name, index)) = rewrite::indexed_target(&eq.lhs) else {
                continue;
            };
            match locals.iter().position(|(n, _)| *n == name) {
                Some(pos) => locals[pos].1 = locals[pos].1.max(index + 1),
                None => locals.push((name, index + 1)),
            }
        }
        locals
    }
}

impl Emitter for CodeEmitter {
    fn extension(&self) -> &'static str {
        self.language.extension()
    }

    fn render(&self, document: &ModelDocument) -> EmitResult<String> {
        self.template.render(&self.placeholders(document))
    }
}

/// Auxiliary equations of motion that read only states, parameters and
/// earlier such terms, in file order.
///
/// These are the terms `outputs` must recompute from the state alone; any
/// term reading time, an input or a non-auxiliary local is left to the
/// derivative function.
fn state_aux(document: &ModelDocument) -> Vec<Equation> {
    let mut varying: Vec<String> = document.input_names().into_iter().map(str::to_string).collect();
    varying.push("T".to_string());

    let mut terms = Vec::new();
    for eq in &document.motion {
        let reads_varying = rewrite::free_names(eq.expression())
            .iter()
            .any(|name| varying.contains(name));
        if eq.is_auxiliary() && !reads_varying {
            terms.push(eq.clone());
        } else {
            varying.push(eq.lhs.clone());
        }
    }
    terms
}

/// Parameter names plus the names the constants block defines itself.
fn lookup_names(document: &ModelDocument) -> Vec<&str> {
    let mut names = document.parameter_names();
    for eq in &document.constants {
        if !eq.is_auxiliary()
            && rewrite::indexed_target(&eq.lhs).is_none()
            && !names.contains(&eq.lhs.as_str())
        {
            names.push(eq.lhs.as_str());
        }
    }
    names
}

fn dictionary<'a>(lang: CodeLanguage, entries: impl Iterator<Item = (&'a str, f64)>) -> String {
    let q = lang.quote();
    let items: Vec<String> = entries
        .map(|(key, value)| format!("{q}{key}{q}: {}", lang.float(value)))
        .collect();
    format!("{{{}}}", items.join(", "))
}

fn indent_lines(lines: impl Iterator<Item = String>) -> String {
    lines
        .map(|line| format!("{BODY_INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
