//! Source lowering for the kata dialect.
//!
//! Exercise sources are written in a small typed, component-oriented dialect
//! of Rhai with embedded markup. The transformer lowers that dialect to
//! plain Rhai in a single pass:
//!
//! - static type annotations (`let x: int`, `fn f(a: string) -> view`) are
//!   stripped;
//! - markup expressions (`<div class="x">…</div>`) become calls against the
//!   injected `ui` runtime (`el("div", #{…}, […])`, `text("…")`);
//! - `import … from "ui"` statements become `require("ui")` calls resolved
//!   by the sandbox loader's allow-list at run time;
//! - `export default …` populates the loader's `exports["default"]` slot
//!   (and `module.exports` is lowered to the `__module` fallback slot);
//! - `console.log/warn/error` calls are bound to the loader's per-run
//!   capture functions.
//!
//! There is no partial recovery: the first invalid construct aborts the
//! transform, and the resulting diagnostic carries the lowering or Rhai
//! parser message verbatim.

use crate::preview::diagnostic::Diagnostic;
use rhai::{Engine, AST};
use thiserror::Error;

/// A transformed compile unit, ready for the sandbox loader.
///
/// Ephemeral: produced per pipeline run, consumed immediately by execution,
/// never cached across runs.
#[derive(Debug, Clone)]
pub struct CompiledModule {
    /// The original dialect source
    pub source: String,
    /// The lowered plain-Rhai text
    pub lowered: String,
    /// The compiled syntax tree
    pub ast: AST,
}

/// Errors raised while lowering dialect source to plain Rhai
#[derive(Error, Debug)]
pub enum LowerError {
    #[error("line {line}: {message}")]
    Markup { line: usize, message: String },

    #[error("line {line}: unsupported construct: {message}")]
    Unsupported { line: usize, message: String },

    #[error("unexpected end of input while {0}")]
    Eof(String),
}

/// Dialect-to-Rhai transformer
pub struct Transformer {
    parser: Engine,
}

impl Transformer {
    pub fn new() -> Self {
        let mut parser = Engine::new();
        // Parser recursion guard; execution itself is unlimited.
        parser.set_max_expr_depths(128, 64);
        Self { parser }
    }

    /// Lower and compile a source text.
    ///
    /// On failure the diagnostic message is the lowering or parser message
    /// verbatim, with no attempt at recovery or correction.
    pub fn transform(&self, source: &str) -> Result<CompiledModule, Diagnostic> {
        let lowered = lower(source).map_err(|e| Diagnostic::compile(e.to_string()))?;
        let ast = self
            .parser
            .compile(&lowered)
            .map_err(|e| Diagnostic::compile(e.to_string()))?;
        Ok(CompiledModule {
            source: source.to_string(),
            lowered,
            ast,
        })
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower dialect source to plain Rhai text
pub fn lower(source: &str) -> Result<String, LowerError> {
    Lowerer::new(source, 1).lower()
}

/// What the previous significant token could be on the left of an operator.
/// `<` after an operand is a comparison; anywhere else it opens markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Prev {
    Operand,
    Other,
}

struct Lowerer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    out: String,
    prev: Prev,
    /// Brace depth of directly visible `{`/`}` (strings, comments and
    /// markup interpolations are consumed out-of-band).
    depth: i64,
    /// Export statements to append once the fn body at this depth closes
    pending_exports: Vec<(i64, String)>,
}

const KEYWORDS: &[&str] = &[
    "return", "if", "else", "while", "for", "loop", "do", "in", "break", "continue", "throw",
    "try", "catch", "switch",
];

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Lowerer {
    fn new(source: &str, start_line: usize) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: start_line,
            out: String::with_capacity(source.len() + 64),
            prev: Prev::Other,
            depth: 0,
            pending_exports: Vec::new(),
        }
    }

    fn lower(mut self) -> Result<String, LowerError> {
        while self.pos < self.chars.len() {
            self.step()?;
        }
        // Unbalanced braces leave pending export statements behind; flush
        // them so the Rhai parser reports the real problem.
        let pending: Vec<_> = self.pending_exports.drain(..).collect();
        for (_, stmt) in pending {
            self.out.push('\n');
            self.out.push_str(&stmt);
        }
        Ok(self.out)
    }

    // ---- cursor primitives ----

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn read_ident(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) {
                word.push(c);
                self.bump();
            } else {
                break;
            }
        }
        word
    }

    /// Markup tag/attribute names also allow dashes (`data-id`)
    fn read_markup_name(&mut self) -> Option<String> {
        let first = self.peek()?;
        if !is_ident_start(first) {
            return None;
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if is_ident_char(c) || c == '-' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Some(name)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Collect (without emitting) a run of whitespace, preserving it for
    /// callers that decide afterwards whether to keep it.
    fn buffer_ws(&mut self) -> String {
        let mut buf = String::new();
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            buf.push(self.bump().unwrap_or(' '));
        }
        buf
    }

    fn expect_char(&mut self, expected: char) -> Result<(), LowerError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(LowerError::Markup {
                line: self.line,
                message: format!("expected `{expected}`, found `{c}`"),
            }),
            None => Err(LowerError::Eof(format!("expecting `{expected}`"))),
        }
    }

    /// Consume a string literal (including quotes), handling escapes
    fn take_string(&mut self, quote: char) -> Result<String, LowerError> {
        let mut lit = String::new();
        lit.push(self.bump().unwrap_or(quote));
        while let Some(c) = self.bump() {
            lit.push(c);
            if c == '\\' {
                if let Some(escaped) = self.bump() {
                    lit.push(escaped);
                }
                continue;
            }
            if c == quote {
                return Ok(lit);
            }
        }
        Err(LowerError::Eof("reading string literal".to_string()))
    }

    /// Consume `{ … }` and return the inner text, balancing nested braces
    /// and skipping strings and comments.
    fn take_balanced_braces(&mut self) -> Result<String, LowerError> {
        self.expect_char('{')?;
        let mut inner = String::new();
        let mut depth = 1usize;
        while let Some(c) = self.peek() {
            match c {
                '"' | '`' | '\'' => inner.push_str(&self.take_string(c)?),
                '/' if self.peek_at(1) == Some('/') => inner.push_str(&self.take_line_comment()),
                '/' if self.peek_at(1) == Some('*') => inner.push_str(&self.take_block_comment()?),
                '{' => {
                    depth += 1;
                    inner.push(c);
                    self.bump();
                }
                '}' => {
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        return Ok(inner);
                    }
                    inner.push(c);
                }
                _ => {
                    inner.push(c);
                    self.bump();
                }
            }
        }
        Err(LowerError::Eof("reading `{ … }` expression".to_string()))
    }

    fn take_line_comment(&mut self) -> String {
        let mut comment = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            comment.push(c);
            self.bump();
        }
        comment
    }

    fn take_block_comment(&mut self) -> Result<String, LowerError> {
        let mut comment = String::new();
        comment.push(self.bump().unwrap_or('/'));
        comment.push(self.bump().unwrap_or('*'));
        while let Some(c) = self.bump() {
            comment.push(c);
            if c == '*' && self.peek() == Some('/') {
                comment.push(self.bump().unwrap_or('/'));
                return Ok(comment);
            }
        }
        Err(LowerError::Eof("reading block comment".to_string()))
    }

    /// Consume a type annotation: an identifier with optional `<…>` arguments
    fn consume_type(&mut self) -> Result<(), LowerError> {
        self.skip_ws();
        let name = self.read_ident();
        if name.is_empty() {
            return Err(LowerError::Unsupported {
                line: self.line,
                message: "expected a type name after `:`".to_string(),
            });
        }
        if self.peek() == Some('<') {
            let mut depth = 0usize;
            while let Some(c) = self.peek() {
                match c {
                    '<' => depth += 1,
                    '>' => {
                        depth -= 1;
                        if depth == 0 {
                            self.bump();
                            return Ok(());
                        }
                    }
                    _ => {}
                }
                self.bump();
            }
            return Err(LowerError::Eof("reading type arguments".to_string()));
        }
        Ok(())
    }

    // ---- main dispatch ----

    fn step(&mut self) -> Result<(), LowerError> {
        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(()),
        };

        match c {
            '"' | '`' | '\'' => {
                let lit = self.take_string(c)?;
                self.out.push_str(&lit);
                self.prev = Prev::Operand;
            }
            '/' if self.peek_at(1) == Some('/') => {
                let comment = self.take_line_comment();
                self.out.push_str(&comment);
            }
            '/' if self.peek_at(1) == Some('*') => {
                let comment = self.take_block_comment()?;
                self.out.push_str(&comment);
            }
            _ if is_ident_start(c) => self.lower_word()?,
            _ if c.is_ascii_digit() => {
                while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '.')
                {
                    let c = self.bump().unwrap_or('0');
                    self.out.push(c);
                }
                self.prev = Prev::Operand;
            }
            '<' if self.prev == Prev::Other
                && matches!(self.peek_at(1), Some(c) if is_ident_start(c)) =>
            {
                let expr = self.parse_element()?;
                self.out.push_str(&expr);
                self.prev = Prev::Operand;
            }
            '{' => {
                self.depth += 1;
                self.out.push(c);
                self.bump();
                self.prev = Prev::Other;
            }
            '}' => {
                self.depth -= 1;
                self.out.push(c);
                self.bump();
                while matches!(self.pending_exports.last(), Some((d, _)) if *d == self.depth) {
                    if let Some((_, stmt)) = self.pending_exports.pop() {
                        self.out.push('\n');
                        self.out.push_str(&stmt);
                    }
                }
                self.prev = Prev::Other;
            }
            ')' | ']' => {
                self.out.push(c);
                self.bump();
                self.prev = Prev::Operand;
            }
            _ if c.is_whitespace() => {
                self.out.push(c);
                self.bump();
            }
            _ => {
                self.out.push(c);
                self.bump();
                self.prev = Prev::Other;
            }
        }
        Ok(())
    }

    fn lower_word(&mut self) -> Result<(), LowerError> {
        let word = self.read_ident();
        match word.as_str() {
            "import" => self.lower_import(),
            "export" => self.lower_export(),
            "console" => self.lower_console(),
            "module" => self.lower_module_slot(),
            "let" | "const" => self.lower_binding(&word),
            "fn" => self.lower_fn(),
            _ => {
                self.out.push_str(&word);
                self.prev = if KEYWORDS.contains(&word.as_str()) {
                    Prev::Other
                } else {
                    Prev::Operand
                };
                Ok(())
            }
        }
    }

    /// `import { a, b } from "ui";` / `import "ui";` → `require("ui");`
    fn lower_import(&mut self) -> Result<(), LowerError> {
        self.skip_ws();
        if self.peek() == Some('{') {
            // Named imports resolve to the directly bound runtime
            // functions; only the module name matters here.
            self.take_balanced_braces()?;
            self.skip_ws();
            let from = self.read_ident();
            if from != "from" {
                return Err(LowerError::Unsupported {
                    line: self.line,
                    message: "expected `from` after import list".to_string(),
                });
            }
            self.skip_ws();
        }
        if self.peek() != Some('"') {
            return Err(LowerError::Unsupported {
                line: self.line,
                message: "only `import { … } from \"…\"` and `import \"…\"` are supported"
                    .to_string(),
            });
        }
        let quoted = self.take_string('"')?;
        let name = quoted.trim_matches('"');
        self.skip_ws();
        if self.peek() == Some(';') {
            self.bump();
        }
        self.out.push_str(&format!("require(\"{name}\");"));
        self.prev = Prev::Other;
        Ok(())
    }

    /// `export default fn name(…) {…}` / `export default <expr>;`
    fn lower_export(&mut self) -> Result<(), LowerError> {
        self.skip_ws();
        let word = self.read_ident();
        if word != "default" {
            return Err(LowerError::Unsupported {
                line: self.line,
                message: "only `export default` is supported".to_string(),
            });
        }
        self.skip_ws();

        // Function form: keep the item, then point the export slot at it.
        let checkpoint = (self.pos, self.line);
        if self.read_ident() == "fn" {
            self.skip_ws();
            let mut name = self.read_ident();
            if name.is_empty() {
                name = "__default".to_string();
            }
            self.out.push_str("fn ");
            self.out.push_str(&name);
            self.skip_ws();
            self.lower_params()?;
            self.strip_return_annotation()?;
            self.pending_exports
                .push((self.depth, format!("exports[\"default\"] = Fn(\"{name}\");")));
            self.prev = Prev::Other;
            return Ok(());
        }
        (self.pos, self.line) = checkpoint;

        // Expression form: the rest of the statement lowers naturally.
        self.out.push_str("exports[\"default\"] = ");
        self.prev = Prev::Other;
        Ok(())
    }

    /// `console.log(…)` → `__console_log(…)` (same for warn/error)
    fn lower_console(&mut self) -> Result<(), LowerError> {
        if self.peek() != Some('.') {
            self.out.push_str("console");
            self.prev = Prev::Operand;
            return Ok(());
        }
        self.bump();
        let method = self.read_ident();
        match method.as_str() {
            "log" | "warn" | "error" => {
                self.out.push_str("__console_");
                self.out.push_str(&method);
                self.prev = Prev::Operand;
                Ok(())
            }
            other => Err(LowerError::Unsupported {
                line: self.line,
                message: format!("console.{other} (use log, warn, or error)"),
            }),
        }
    }

    /// `module.exports` → the loader's `__module.exports` fallback slot
    fn lower_module_slot(&mut self) -> Result<(), LowerError> {
        if self.peek() == Some('.') {
            self.bump();
            let member = self.read_ident();
            if member == "exports" {
                self.out.push_str("__module.exports");
                self.prev = Prev::Operand;
                return Ok(());
            }
        }
        Err(LowerError::Unsupported {
            line: self.line,
            message: "`module` may only be used as `module.exports`".to_string(),
        })
    }

    /// `let x: int = …` → `let x = …`
    fn lower_binding(&mut self, keyword: &str) -> Result<(), LowerError> {
        self.out.push_str(keyword);
        let ws = self.buffer_ws();
        self.out.push_str(&ws);
        if matches!(self.peek(), Some(c) if is_ident_start(c)) {
            let name = self.read_ident();
            self.out.push_str(&name);
            let ws = self.buffer_ws();
            if self.peek() == Some(':') {
                self.bump();
                self.consume_type()?;
            } else {
                self.out.push_str(&ws);
            }
        }
        self.prev = Prev::Other;
        Ok(())
    }

    /// `fn f(a: int, b: string) -> view` → `fn f(a, b)`
    fn lower_fn(&mut self) -> Result<(), LowerError> {
        self.out.push_str("fn");
        let ws = self.buffer_ws();
        self.out.push_str(&ws);
        if matches!(self.peek(), Some(c) if is_ident_start(c)) {
            let name = self.read_ident();
            self.out.push_str(&name);
        }
        let ws = self.buffer_ws();
        self.out.push_str(&ws);
        if self.peek() == Some('(') {
            self.lower_params()?;
            self.strip_return_annotation()?;
        }
        self.prev = Prev::Other;
        Ok(())
    }

    fn lower_params(&mut self) -> Result<(), LowerError> {
        self.expect_char('(')?;
        self.out.push('(');
        loop {
            match self.peek() {
                None => return Err(LowerError::Eof("reading function parameters".to_string())),
                Some(')') => {
                    self.bump();
                    self.out.push(')');
                    return Ok(());
                }
                Some(':') => {
                    self.bump();
                    self.consume_type()?;
                }
                Some(c) => {
                    self.bump();
                    self.out.push(c);
                }
            }
        }
    }

    /// Strip an optional `-> type` following a parameter list
    fn strip_return_annotation(&mut self) -> Result<(), LowerError> {
        let ws = self.buffer_ws();
        if self.peek() == Some('-') && self.peek_at(1) == Some('>') {
            self.bump();
            self.bump();
            self.skip_ws();
            let name = self.read_ident();
            if name.is_empty() {
                return Err(LowerError::Unsupported {
                    line: self.line,
                    message: "expected a type name after `->`".to_string(),
                });
            }
        } else {
            self.out.push_str(&ws);
        }
        Ok(())
    }

    // ---- markup ----

    /// Parse one `<tag …>…</tag>` element and return its lowered expression
    fn parse_element(&mut self) -> Result<String, LowerError> {
        let open_line = self.line;
        self.expect_char('<')?;
        let tag = self.read_markup_name().ok_or(LowerError::Markup {
            line: open_line,
            message: "expected a tag name after `<`".to_string(),
        })?;

        let mut props: Vec<(String, String)> = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(LowerError::Eof(format!("parsing <{tag}>"))),
                Some('/') => {
                    self.bump();
                    self.expect_char('>')?;
                    return Ok(build_element(&tag, &props, &[]));
                }
                Some('>') => {
                    self.bump();
                    break;
                }
                Some(c) if is_ident_start(c) => {
                    let name = self.read_markup_name().unwrap_or_default();
                    self.skip_ws();
                    let value = if self.peek() == Some('=') {
                        self.bump();
                        self.skip_ws();
                        match self.peek() {
                            Some('"') => self.take_string('"')?,
                            Some('{') => {
                                let line = self.line;
                                let inner = self.take_balanced_braces()?;
                                lower_fragment(&inner, line)?.trim().to_string()
                            }
                            _ => {
                                return Err(LowerError::Markup {
                                    line: self.line,
                                    message: format!(
                                        "expected a string or `{{…}}` value for attribute `{name}`"
                                    ),
                                })
                            }
                        }
                    } else {
                        "true".to_string()
                    };
                    props.push((name, value));
                }
                Some(c) => {
                    return Err(LowerError::Markup {
                        line: self.line,
                        message: format!("unexpected character `{c}` in <{tag}>"),
                    })
                }
            }
        }

        let mut children: Vec<String> = Vec::new();
        let mut text = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(LowerError::Markup {
                        line: open_line,
                        message: format!("missing closing tag </{tag}>"),
                    })
                }
                Some('<') if self.peek_at(1) == Some('/') => {
                    flush_text(&mut text, &mut children);
                    self.bump();
                    self.bump();
                    let closing = self.read_markup_name().ok_or(LowerError::Markup {
                        line: self.line,
                        message: "expected a tag name in closing tag".to_string(),
                    })?;
                    self.skip_ws();
                    self.expect_char('>')?;
                    if closing != tag {
                        return Err(LowerError::Markup {
                            line: self.line,
                            message: format!(
                                "expected closing tag </{tag}>, found </{closing}>"
                            ),
                        });
                    }
                    return Ok(build_element(&tag, &props, &children));
                }
                Some('<') => {
                    flush_text(&mut text, &mut children);
                    children.push(self.parse_element()?);
                }
                Some('{') => {
                    flush_text(&mut text, &mut children);
                    let line = self.line;
                    let inner = self.take_balanced_braces()?;
                    let lowered = lower_fragment(&inner, line)?;
                    if !lowered.trim().is_empty() {
                        children.push(lowered.trim().to_string());
                    }
                }
                Some(c) => {
                    self.bump();
                    text.push(c);
                }
            }
        }
    }
}

/// Lower an embedded expression (interpolation or attribute value) with a
/// fresh lowerer so nested markup keeps working.
fn lower_fragment(inner: &str, start_line: usize) -> Result<String, LowerError> {
    Lowerer::new(inner, start_line).lower()
}

fn flush_text(text: &mut String, children: &mut Vec<String>) {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if !collapsed.is_empty() {
        children.push(format!("text(\"{}\")", escape_text(&collapsed)));
    }
    text.clear();
}

fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn build_element(tag: &str, props: &[(String, String)], children: &[String]) -> String {
    let props_src = if props.is_empty() {
        "#{}".to_string()
    } else {
        let entries: Vec<String> = props
            .iter()
            .map(|(k, v)| format!("\"{k}\": {v}"))
            .collect();
        format!("#{{{}}}", entries.join(", "))
    };
    format!("el(\"{tag}\", {props_src}, [{}])", children.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_annotations_stripped() {
        let lowered = lower("let count: int = 0;").unwrap();
        assert_eq!(lowered, "let count = 0;");

        let lowered = lower("fn add(a: int, b: int) -> int { a + b }").unwrap();
        assert_eq!(lowered, "fn add(a, b) { a + b }");

        let lowered = lower("let items: array<string> = [];").unwrap();
        assert_eq!(lowered, "let items = [];");
    }

    #[test]
    fn test_untyped_source_passes_through() {
        let source = "let x = 1;\nfn f(a) { a * 2 }\nf(x)";
        assert_eq!(lower(source).unwrap(), source);
    }

    #[test]
    fn test_markup_lowering() {
        let lowered = lower(r#"<div class="card"><h1>Hello</h1></div>"#).unwrap();
        assert_eq!(
            lowered,
            r#"el("div", #{"class": "card"}, [el("h1", #{}, [text("Hello")])])"#
        );
    }

    #[test]
    fn test_markup_self_closing_and_boolean_attr() {
        let lowered = lower(r#"<input disabled placeholder="name"/>"#).unwrap();
        assert_eq!(
            lowered,
            r#"el("input", #{"disabled": true, "placeholder": "name"}, [])"#
        );
    }

    #[test]
    fn test_markup_interpolation() {
        let lowered = lower(r#"<p>{"count: " + count}</p>"#).unwrap();
        assert_eq!(lowered, r#"el("p", #{}, ["count: " + count])"#);
    }

    #[test]
    fn test_markup_attr_expression() {
        let lowered = lower(r#"<li class={if done { "done" } else { "open" }}>x</li>"#).unwrap();
        assert_eq!(
            lowered,
            r#"el("li", #{"class": if done { "done" } else { "open" }}, [text("x")])"#
        );
    }

    #[test]
    fn test_markup_nested_in_interpolation() {
        let lowered = lower(r#"<ul>{ <li>one</li> }</ul>"#).unwrap();
        assert_eq!(
            lowered,
            r#"el("ul", #{}, [el("li", #{}, [text("one")])])"#
        );
    }

    #[test]
    fn test_markup_text_whitespace_collapsed() {
        let lowered = lower("<p>\n    hello   brave\n    world\n</p>").unwrap();
        assert_eq!(lowered, r#"el("p", #{}, [text("hello brave world")])"#);
    }

    #[test]
    fn test_mismatched_closing_tag() {
        let err = lower("<div><span></div>").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected closing tag </span>"), "{message}");
        assert!(message.contains("found </div>"), "{message}");
    }

    #[test]
    fn test_unclosed_tag() {
        let err = lower("<div><p>hi</p>").unwrap_err();
        assert!(err.to_string().contains("missing closing tag </div>"));
    }

    #[test]
    fn test_less_than_is_not_markup() {
        let source = "if a < b { a } else { b }";
        assert_eq!(lower(source).unwrap(), source);
    }

    #[test]
    fn test_import_rewritten() {
        let lowered = lower("import { el, text } from \"ui\";").unwrap();
        assert_eq!(lowered, "require(\"ui\");");

        let lowered = lower("import \"ui\";").unwrap();
        assert_eq!(lowered, "require(\"ui\");");
    }

    #[test]
    fn test_malformed_import() {
        let err = lower("import el from \"ui\";").unwrap_err();
        assert!(matches!(err, LowerError::Unsupported { .. }));
    }

    #[test]
    fn test_export_default_fn() {
        let lowered = lower("export default fn hello() { 42 }").unwrap();
        assert_eq!(
            lowered,
            "fn hello() { 42 }\nexports[\"default\"] = Fn(\"hello\");"
        );
    }

    #[test]
    fn test_export_default_anonymous_fn() {
        let lowered = lower("export default fn() { 42 }").unwrap();
        assert!(lowered.contains("fn __default() { 42 }"));
        assert!(lowered.contains("exports[\"default\"] = Fn(\"__default\");"));
    }

    #[test]
    fn test_export_default_expression() {
        let lowered = lower("export default 42;").unwrap();
        assert_eq!(lowered, "exports[\"default\"] = 42;");
    }

    #[test]
    fn test_export_default_markup() {
        let lowered = lower("export default <div/>;").unwrap();
        assert_eq!(lowered, "exports[\"default\"] = el(\"div\", #{}, []);");
    }

    #[test]
    fn test_export_named_unsupported() {
        let err = lower("export fn helper() { 1 }").unwrap_err();
        assert!(err.to_string().contains("only `export default`"));
    }

    #[test]
    fn test_console_rewritten() {
        let lowered = lower("console.log(\"hi\");\nconsole.warn(1);\nconsole.error(2, 3);")
            .unwrap();
        assert_eq!(
            lowered,
            "__console_log(\"hi\");\n__console_warn(1);\n__console_error(2, 3);"
        );
    }

    #[test]
    fn test_console_unknown_method() {
        let err = lower("console.table(x);").unwrap_err();
        assert!(err.to_string().contains("console.table"));
    }

    #[test]
    fn test_module_exports_rewritten() {
        let lowered = lower("module.exports = 1;").unwrap();
        assert_eq!(lowered, "__module.exports = 1;");
    }

    #[test]
    fn test_strings_and_comments_untouched() {
        let source = "// keep: let x: int <div>\nlet s = \"a < b: {ok}\";";
        let lowered = lower(source).unwrap();
        assert_eq!(lowered, source);
    }

    #[test]
    fn test_transformer_compiles_lowered_output() {
        let transformer = Transformer::new();
        let module = transformer
            .transform("export default fn c() { <h1>Hi</h1> }")
            .unwrap();
        assert!(module.lowered.contains("el(\"h1\""));
    }

    #[test]
    fn test_transformer_surfaces_parser_message() {
        let transformer = Transformer::new();
        let diag = transformer.transform("let x = ;").unwrap_err();
        assert_eq!(diag.kind, crate::preview::DiagnosticKind::Compile);
        assert!(!diag.message.is_empty());
    }

    #[test]
    fn test_markup_in_function_body() {
        let source = "fn view(title: string) -> view {\n    <h2>{title}</h2>\n}";
        let lowered = lower(source).unwrap();
        assert_eq!(lowered, "fn view(title) {\n    el(\"h2\", #{}, [title])\n}");
    }
}
