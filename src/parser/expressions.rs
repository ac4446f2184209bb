//! Expression parsing implementation
//!
//! One method per grammar rule, from loosest to tightest binding:
//!
//! ```text
//! expression → equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
//! term       → factor ( ( "+" | "-" ) factor )*
//! factor     → unary  ( ( "/" | "*" ) unary )*
//! unary      → ( "!" | "-" ) unary | primary
//! primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
//! ```
//!
//! Binary levels loop and fold to the left, which makes them left-associative
//! without left recursion. `unary` calls itself, so prefix operators nest to
//! the right. `primary` is the only rule that can fail on its own.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::Expr;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::token::{TokenKind, Value};

const EQUALITY_OPS: [TokenKind; 2] =
    [TokenKind::BangEqual, TokenKind::EqualEqual];
const COMPARISON_OPS: [TokenKind; 4] = [
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];
const TERM_OPS: [TokenKind; 2] = [TokenKind::Plus, TokenKind::Minus];
const FACTOR_OPS: [TokenKind; 2] = [TokenKind::Slash, TokenKind::Star];
const UNARY_OPS: [TokenKind; 2] = [TokenKind::Bang, TokenKind::Minus];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&EQUALITY_OPS, Self::parse_comparison)
    }

    /// Parse comparison (> >= < <=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&COMPARISON_OPS, Self::parse_term)
    }

    /// Parse term (+ -)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&TERM_OPS, Self::parse_factor)
    }

    /// Parse factor (/ *)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&FACTOR_OPS, Self::parse_unary)
    }

    /// Shared shape of every binary level: one operand, then any number of
    /// `op operand` pairs folded into the left operand.
    fn parse_left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while self.match_any(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse unary (! -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&UNARY_OPS) {
            let operator = self.previous().clone();
            let operand = self.nested(Self::parse_unary)?;
            return Ok(Expr::unary(operator, operand));
        }

        self.parse_primary()
    }

    /// Parse primary: literals, keywords with a fixed value, and groupings
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::False]) {
            return Ok(Expr::literal(Value::Bool(false)));
        }
        if self.match_any(&[TokenKind::True]) {
            return Ok(Expr::literal(Value::Bool(true)));
        }
        if self.match_any(&[TokenKind::Nil]) {
            return Ok(Expr::literal(Value::Nil));
        }

        if self.match_any(&[TokenKind::Number, TokenKind::String]) {
            let value = self.previous().literal.clone().unwrap_or(Value::Nil);
            return Ok(Expr::literal(value));
        }

        if self.match_any(&[TokenKind::LeftParen]) {
            let inner = self.nested(Self::parse_expression)?;
            self.expect_token(
                TokenKind::RightParen,
                "Expect ')' after expression.",
            )?;
            return Ok(Expr::grouping(inner));
        }

        Err(self.error_at_current("Expect expression."))
    }
}
