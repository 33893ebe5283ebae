//! C source code parser
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), with the grammar rules split across
//!   `declarations`, `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! - Top level: `int x;` / `char c;` declarations without initializers
//! - Statements: `if <literal-or-identifier> { ... }`, reachable only through
//!   [`parse::Parser::parse_statements`]
//! - Expressions: a single integer literal or identifier
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead and
//! cursor backtracking. No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
