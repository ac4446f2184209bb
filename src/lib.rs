//! # Introduction
//!
//! `lox_syntax` is the lexical and syntactic front end of the Lox scripting
//! language. It scans source text into tokens, parses a single expression
//! into a tree, and prints trees in a parenthesized prefix form.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Printer
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an [`Expr`].
//! 2. [`diagnostics`] — turns lexical and syntax errors into
//!    `[line <n>] Error<where>: <message>` lines.
//! 3. [`printer`] — renders a tree, e.g. `(* (- 123) (group 45.67))`.
//!
//! Errors never abort a run early: the scanner keeps going after a bad
//! character and the parser reports the first syntax error it meets. Every
//! error found is handed back to the caller, which decides what to do.

pub mod diagnostics;
pub mod parser;
pub mod printer;

use std::io::{self, Write};

pub use diagnostics::{Diagnostic, Location, Reporter};
pub use parser::ast::{Expr, ExprVisitor};
pub use parser::lexer::{LexError, LexErrorKind, Lexer, ScanResult};
pub use parser::parse::{ParseError, Parser, ParserConfig};
pub use parser::token::{Token, TokenKind, Value};
pub use printer::AstPrinter;

/// Scan `source` into tokens and lexical errors.
pub fn scan_source(source: &str) -> ScanResult {
    Lexer::new(source).tokenize()
}

/// Scan and parse `source` with the default parser settings.
pub fn parse_source(source: &str) -> Result<Expr, Vec<Diagnostic>> {
    parse_source_with(source, ParserConfig::default())
}

/// Scan and parse `source`. The tree is returned only when neither stage
/// reported an error; otherwise the lexical diagnostics are returned followed
/// by the syntax error, if any.
pub fn parse_source_with(
    source: &str,
    config: ParserConfig,
) -> Result<Expr, Vec<Diagnostic>> {
    let ScanResult { tokens, errors } = scan_source(source);
    let mut diagnostics: Vec<Diagnostic> =
        errors.iter().map(Diagnostic::from).collect();

    let mut parser = Parser::with_config(tokens, config);
    match parser.parse() {
        Ok(expr) if diagnostics.is_empty() => Ok(expr),
        Ok(_) => Err(diagnostics),
        Err(err) => {
            diagnostics.push(Diagnostic::from(&err));
            Err(diagnostics)
        }
    }
}

/// Parse `source`, writing any diagnostics through `reporter`.
///
/// Returns `Ok(None)` when something was reported; the reporter's flag stays
/// set until the caller resets it.
pub fn run_source<W: Write>(
    source: &str,
    config: ParserConfig,
    reporter: &mut Reporter<W>,
) -> io::Result<Option<Expr>> {
    match parse_source_with(source, config) {
        Ok(expr) => Ok(Some(expr)),
        Err(diagnostics) => {
            reporter.report_all(&diagnostics)?;
            Ok(None)
        }
    }
}
