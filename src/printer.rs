//! Parenthesized prefix rendering of expression trees
//!
//! `-123 * (45.67)` prints as `(* (- 123) (group 45.67))`. The printer holds
//! no state, so printing the same tree twice gives the same string.

use crate::parser::ast::{Expr, ExprVisitor};
use crate::parser::token::{Token, Value};

/// Tree printer used for debugging and as a test oracle.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        Self
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::new();
        out.push('(');
        out.push_str(name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }
}

impl ExprVisitor for AstPrinter {
    type Output = String;

    fn visit_literal(&mut self, value: &Value) -> String {
        value.to_string()
    }

    fn visit_grouping(&mut self, inner: &Expr) -> String {
        self.parenthesize("group", &[inner])
    }

    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> String {
        self.parenthesize(&operator.lexeme, &[operand])
    }

    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> String {
        self.parenthesize(&operator.lexeme, &[left, right])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenKind;

    #[test]
    fn test_hand_built_tree() {
        let expr = Expr::binary(
            Expr::unary(
                Token::new(TokenKind::Minus, "-", None, 1),
                Expr::literal(Value::Number(123.0)),
            ),
            Token::new(TokenKind::Star, "*", None, 1),
            Expr::grouping(Expr::literal(Value::Number(45.67))),
        );

        assert_eq!(AstPrinter::new().print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_nil_literal() {
        assert_eq!(AstPrinter::new().print(&Expr::literal(Value::Nil)), "nil");
    }
}
