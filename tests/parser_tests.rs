// Parsing and printing through the public pipeline

use lox_syntax::{parse_source, AstPrinter, Expr, TokenKind, Value};
use rstest::rstest;

fn print(source: &str) -> String {
    let expr = parse_source(source).expect("Parsing failed");
    AstPrinter::new().print(&expr)
}

#[rstest]
#[case("-123 * (45.67)", "(* (- 123) (group 45.67))")]
#[case("1 + 2 * 3", "(+ 1 (* 2 3))")]
#[case("(1 + 2) * 3", "(* (group (+ 1 2)) 3)")]
#[case("1 - 2 - 3", "(- (- 1 2) 3)")]
#[case("8 / 4 / 2", "(/ (/ 8 4) 2)")]
#[case("!!true", "(! (! true))")]
#[case("--1", "(- (- 1))")]
#[case("1 < 2 == 3 >= 4", "(== (< 1 2) (>= 3 4))")]
#[case("1 != 2 == false", "(== (!= 1 2) false)")]
#[case("-1 + -2", "(+ (- 1) (- 2))")]
#[case("\"a\" + \"b\"", "(+ a b)")]
#[case("nil", "nil")]
#[case("0.5 <= 10", "(<= 0.5 10)")]
fn test_precedence_and_printing(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(print(source), expected);
}

#[test]
fn test_product_is_nested_under_sum() {
    let expr = parse_source("1 + 2 * 3").unwrap();
    let Expr::Binary {
        left,
        operator,
        right,
    } = expr
    else {
        panic!("Expected binary expression");
    };

    assert_eq!(*left, Expr::literal(Value::Number(1.0)));
    assert_eq!(operator.kind, TokenKind::Plus);
    match *right {
        Expr::Binary {
            left, operator, right,
        } => {
            assert_eq!(*left, Expr::literal(Value::Number(2.0)));
            assert_eq!(operator.kind, TokenKind::Star);
            assert_eq!(*right, Expr::literal(Value::Number(3.0)));
        }
        other => panic!("Expected product on the right, got {:?}", other),
    }
}

#[test]
fn test_unary_operators_are_bang_or_minus() {
    let expr = parse_source("!-!-1").unwrap();
    let mut node = &expr;
    let mut seen = Vec::new();
    while let Expr::Unary { operator, operand } = node {
        seen.push(operator.kind);
        node = &**operand;
    }

    assert_eq!(
        seen,
        vec![
            TokenKind::Bang,
            TokenKind::Minus,
            TokenKind::Bang,
            TokenKind::Minus
        ]
    );
    assert_eq!(*node, Expr::literal(Value::Number(1.0)));
}

#[test]
fn test_printing_is_idempotent() {
    let expr = parse_source("(1 + 2) * -3 == !false").unwrap();
    let mut printer = AstPrinter::new();
    let first = printer.print(&expr);
    let second = printer.print(&expr);
    assert_eq!(first, second);
    assert_eq!(first, "(== (* (group (+ 1 2)) (- 3)) (! false))");
}

#[test]
fn test_multiline_source() {
    assert_eq!(print("1 +\n// note\n2"), "(+ 1 2)");
}
