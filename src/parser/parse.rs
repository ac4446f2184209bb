//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, cursor helpers, panic-mode recovery and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses recursive descent with one method per precedence level:
//! - This module: Parser struct, helper methods, and coordination
//! - `expressions`: the grammar rules from `expression` down to `primary`
//!
//! The cursor (`position`) is owned by the Parser and shared by all rule
//! methods, so a Parser must not be driven from more than one place at once.

use crate::parser::ast::Expr;
use crate::parser::token::{Token, TokenKind};
use log::{debug, info};
use std::fmt;

/// Default bound on nested groupings and prefix operators.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The token the parser was looking at when it gave up.
    pub token: Token,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.token.is_eof() {
            write!(
                f,
                "Parse error at line {}, at end: {}",
                self.token.line, self.message
            )
        } else {
            write!(
                f,
                "Parse error at line {}, at '{}': {}",
                self.token.line, self.token.lexeme, self.message
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// Tunables for a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How deeply groupings and prefix operators may nest before the parser
    /// refuses the input.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Recursive descent parser for Lox expressions
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) config: ParserConfig,
    pub(crate) depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Build a parser. A stream missing its trailing `EOF` gets one appended
    /// so the cursor always has a token to look at.
    pub fn with_config(mut tokens: Vec<Token>, config: ParserConfig) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::eof(line));
        }

        info!("parser created with {} tokens", tokens.len());
        Self {
            tokens,
            position: 0,
            config,
            depth: 0,
        }
    }

    /// Parse a single expression.
    ///
    /// On failure the cursor is resynchronized past the bad input before the
    /// error is returned, so a caller parsing several expressions from one
    /// stream can carry on.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        debug!("parsing expression at token {}", self.position);
        match self.parse_expression() {
            Ok(expr) => Ok(expr),
            Err(err) => {
                debug!("parse failed: {}", err);
                self.synchronize();
                Err(err)
            }
        }
    }

    /// Panic-mode recovery: discard tokens until just past a `;` or just
    /// before a keyword that starts a statement.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                break;
            }
            if self.peek().kind.starts_statement() {
                break;
            }
            self.advance();
        }

        debug!("synchronized at token {}", self.position);
    }

    /// Position of the cursor in the token stream.
    pub fn position(&self) -> usize {
        self.position
    }

    // ===== Helper methods =====

    /// Consume the current token if it is any of `kinds`.
    pub(crate) fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    /// The most recently consumed token. Before anything has been consumed
    /// this is the first token.
    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at_current(message))
        }
    }

    pub(crate) fn error_at_current(&self, message: &str) -> ParseError {
        ParseError {
            token: self.peek().clone(),
            message: message.to_string(),
        }
    }

    /// Run `rule` one nesting level deeper, failing once the configured depth
    /// is exceeded.
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(self.error_at_current(&format!(
                "Expression nesting exceeds {} levels.",
                self.config.max_depth
            )));
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }
}
