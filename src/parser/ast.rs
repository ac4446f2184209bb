// AST (Abstract Syntax Tree) definitions for Lox expressions

use super::token::{Token, Value};

/// An expression tree. Each composite node owns its children, so a tree can
/// never share or cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: Value,
    },
    Grouping {
        inner: Box<Expr>,
    },
    /// `operator` is always `!` or `-`.
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn literal(value: Value) -> Self {
        Expr::Literal { value }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping {
            inner: Box::new(inner),
        }
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Dispatch to the visitor method matching this node's variant.
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal { value } => visitor.visit_literal(value),
            Expr::Grouping { inner } => visitor.visit_grouping(inner),
            Expr::Unary { operator, operand } => {
                visitor.visit_unary(operator, operand)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => visitor.visit_binary(left, operator, right),
        }
    }
}

/// An operation over every expression variant.
///
/// Adding a variant to [`Expr`] breaks every implementor until it handles the
/// new case, so consumers like the tree printer can never silently skip one.
pub trait ExprVisitor {
    type Output;

    fn visit_literal(&mut self, value: &Value) -> Self::Output;
    fn visit_grouping(&mut self, inner: &Expr) -> Self::Output;
    fn visit_unary(&mut self, operator: &Token, operand: &Expr) -> Self::Output;
    fn visit_binary(
        &mut self,
        left: &Expr,
        operator: &Token,
        right: &Expr,
    ) -> Self::Output;
}
