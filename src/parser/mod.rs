//! Lox expression front end
//!
//! This module transforms source text into an expression tree:
//! - [`token`]: the token model shared by both stages
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`] and `expressions`: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions and the visitor contract
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
pub mod token;
