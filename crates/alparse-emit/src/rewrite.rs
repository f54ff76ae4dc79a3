//! Text-to-text rewrites applied to extracted expressions.
//!
//! Expressions stay opaque strings; these functions only look at a coarse
//! token stream (identifiers, numbers, quoted strings, single punctuation
//! characters), so they never touch the inside of an identifier or a
//! string literal.

/// Owner every rewritten reference is scoped to.
const OWNER: &str = "self";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Ident,
    Number,
    Quoted,
    Punct,
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    kind: Kind,
    text: &'a str,
}

impl Token<'_> {
    fn is_punct(&self, c: &str) -> bool {
        self.kind == Kind::Punct && self.text == c
    }
}

fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let b = bytes[i];
        let kind = if b.is_ascii_alphabetic() || b == b'_' {
            i += 1;
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            Kind::Ident
        } else if b.is_ascii_digit() || (b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            i = scan_number(bytes, i);
            Kind::Number
        } else if b == b'"' || b == b'\'' {
            i += 1;
            while i < bytes.len() && bytes[i] != b {
                i += 1;
            }
            i = (i + 1).min(bytes.len());
            Kind::Quoted
        } else {
            i += text[i..].chars().next().map_or(1, char::len_utf8);
            Kind::Punct
        };
        tokens.push(Token {
            kind,
            text: &text[start..i],
        });
    }
    tokens
}

fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    i = digits(i);
    if bytes.get(i) == Some(&b'.') {
        i = digits(i + 1);
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        if bytes.get(j).is_some_and(u8::is_ascii_digit) {
            i = digits(j);
        }
    }
    i
}

/// Whether the token before `index` is a member-access dot.
fn after_dot(tokens: &[Token<'_>], index: usize) -> bool {
    index > 0 && tokens[index - 1].is_punct(".")
}

/// Rewrite every `z[idx]` reference to `self.z[idx]`.
///
/// References that are already scoped are left alone.
pub fn owner_scoped_aux(text: &str) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len() + 16);
    for (i, token) in tokens.iter().enumerate() {
        if token.kind == Kind::Ident
            && token.text == "z"
            && tokens.get(i + 1).is_some_and(|t| t.is_punct("["))
            && !after_dot(&tokens, i)
        {
            out.push_str(OWNER);
            out.push('.');
        }
        out.push_str(token.text);
    }
    out
}

/// Names an expression reads: free identifiers plus `z[idx]` references.
///
/// Called functions and owners of member accesses are not names.
pub fn free_names(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let mut names = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != Kind::Ident || after_dot(&tokens, i) {
            continue;
        }
        let next = tokens.get(i + 1);
        if next.is_some_and(|t| t.is_punct("(") || t.is_punct(".")) {
            continue;
        }
        if token.text == "z" && next.is_some_and(|t| t.is_punct("[")) {
            match (tokens.get(i + 2), tokens.get(i + 3)) {
                (Some(index), Some(close)) if close.is_punct("]") => {
                    names.push(format!("z[{}]", index.text));
                    continue;
                }
                _ => {}
            }
        }
        names.push(token.text.to_string());
    }
    names
}

/// Rewrite every free occurrence of a name in `names` to a lookup into the
/// owner's parameter map, quoting the key with `quote`.
pub fn parameter_lookup(text: &str, names: &[&str], quote: char) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len() * 2);
    for (i, token) in tokens.iter().enumerate() {
        if token.kind == Kind::Ident && names.contains(&token.text) && !after_dot(&tokens, i) {
            out.push_str(&format!("{OWNER}.parameters[{quote}{}{quote}]", token.text));
        } else {
            out.push_str(token.text);
        }
    }
    out
}

/// Make every integer literal outside an index bracket a float literal.
///
/// `10*pow(z[4],2)` becomes `10.0*pow(z[4],2.0)`.
pub fn float_literals(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len() + 8);
    for token in tokenize(text) {
        match token.kind {
            Kind::Punct if token.text == "[" => depth += 1,
            Kind::Punct if token.text == "]" => depth = depth.saturating_sub(1),
            _ => {}
        }
        out.push_str(token.text);
        if token.kind == Kind::Number
            && depth == 0
            && !token.text.contains(['.', 'e', 'E'])
        {
            out.push_str(".0");
        }
    }
    out
}

/// How a rewritten matrix entry is indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStyle {
    /// `a[i][j]`
    Nested,
    /// `self.A[i, j]`
    Tuple,
}

/// Map `<matrix>[i][j]` references to the target's matrix variables.
///
/// `matrix_names` and `targets` are paired positionally (state, input,
/// output, feed-forward).
pub fn linear_matrix_names(
    text: &str,
    matrix_names: &[String],
    targets: &[&str],
    style: IndexStyle,
) -> String {
    let tokens = tokenize(text);
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let target = (token.kind == Kind::Ident && !after_dot(&tokens, i))
            .then(|| matrix_names.iter().position(|m| m == token.text))
            .flatten()
            .and_then(|pos| targets.get(pos));

        if let Some(target) = target
            && let Some((row, col)) = double_index(&tokens[i + 1..])
        {
            match style {
                IndexStyle::Nested => out.push_str(&format!("{target}[{row}][{col}]")),
                IndexStyle::Tuple => out.push_str(&format!("{target}[{row}, {col}]")),
            }
            i += 7;
            continue;
        }
        out.push_str(token.text);
        i += 1;
    }
    out
}

/// Match `[i][j]` at the start of `tokens`.
fn double_index<'a>(tokens: &[Token<'a>]) -> Option<(&'a str, &'a str)> {
    match tokens {
        [open1, row, close1, open2, col, close2, ..]
            if open1.is_punct("[")
                && row.kind == Kind::Number
                && close1.is_punct("]")
                && open2.is_punct("[")
                && col.kind == Kind::Number
                && close2.is_punct("]") =>
        {
            Some((row.text, col.text))
        }
        _ => None,
    }
}

/// The base name and index of a one-dimensional indexed target such as
/// `Encode[2]`.
pub fn indexed_target(lhs: &str) -> Option<(&str, usize)> {
    let (base, rest) = lhs.split_once('[')?;
    let index = rest.strip_suffix(']')?.trim().parse().ok()?;
    let valid = !base.is_empty()
        && base.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    valid.then_some((base, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_owner_scoped_aux() {
        assert_eq!(
            owner_scoped_aux("z[3]*z[10] + 0.25*m*pow(z[4],2)"),
            "self.z[3]*self.z[10] + 0.25*m*pow(self.z[4],2)"
        );
        assert_eq!(owner_scoped_aux("self.z[1] = viz[2]"), "self.z[1] = viz[2]");
        assert_eq!(owner_scoped_aux("z = 3"), "z = 3");
    }

    #[test]
    fn test_free_names() {
        assert_eq!(
            free_names("torque*z[3] - 0.5*z[4]*(force+pow(omega,2)) + self.m"),
            ["torque", "z[3]", "z[4]", "force", "omega"]
        );
        assert!(free_names("cos(0.5)").is_empty());
    }

    #[test]
    fn test_parameter_lookup_respects_word_boundaries() {
        let text = "g*l*m + lg + self.m + sin(l)";
        assert_eq!(
            parameter_lookup(text, &["g", "l", "m"], '\''),
            "self.parameters['g']*self.parameters['l']*self.parameters['m'] + lg + self.m + sin(self.parameters['l'])"
        );
    }

    #[test]
    fn test_parameter_lookup_skips_strings() {
        assert_eq!(parameter_lookup("\"g\" + g", &["g"], '"'), "\"g\" + self.parameters[\"g\"]");
    }

    #[test]
    fn test_float_literals() {
        assert_eq!(
            float_literals("10*sin(0.5235987755982988+6.283185307179586*T)"),
            "10.0*sin(0.5235987755982988+6.283185307179586*T)"
        );
        assert_eq!(float_literals("pow(z[4],2) - x2"), "pow(z[4],2.0) - x2");
        assert_eq!(float_literals("1.0E-08 + 3e5"), "1.0E-08 + 3e5");
        assert_eq!(float_literals("A[0][1] = 0"), "A[0][1] = 0.0");
    }

    #[test]
    fn test_linear_matrix_names() {
        let text = "A[0][1] = B[1][0] + Alpha[0][0]";
        assert_eq!(
            linear_matrix_names(text, &names(), &["a", "b", "c", "d"], IndexStyle::Nested),
            "a[0][1] = b[1][0] + Alpha[0][0]"
        );
        assert_eq!(
            linear_matrix_names(
                "C[2][3] = z[5]",
                &names(),
                &["self.A", "self.B", "self.C", "self.D"],
                IndexStyle::Tuple
            ),
            "self.C[2, 3] = z[5]"
        );
    }

    #[test]
    fn test_linear_matrix_names_needs_two_indices() {
        assert_eq!(
            linear_matrix_names("A[i][0] + A[1]", &names(), &["a", "b", "c", "d"], IndexStyle::Nested),
            "A[i][0] + A[1]"
        );
    }

    #[test]
    fn test_indexed_target() {
        assert_eq!(indexed_target("Encode[2]"), Some(("Encode", 2)));
        assert_eq!(indexed_target("A[0][1]"), None);
        assert_eq!(indexed_target("theta"), None);
    }
}
