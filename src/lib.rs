//! # Introduction
//!
//! cfront is a teaching-grade front-end for a tiny subset of C. It turns
//! source text into tokens, parses declarations (and a minimal `if`
//! statement form) into an AST, and regenerates source text from that AST.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → CodeGenerator → Text
//! ```
//!
//! 1. [`parser::lexer`] — classifies the source into keyword, identifier,
//!    literal, symbol and operator tokens.
//! 2. [`parser::parse`] — recursive descent over the token stream, producing a
//!    [`parser::ast::Program`].
//! 3. [`codegen`] — walks the tree and emits text.
//! 4. [`pipeline`] — wires the three stages together behind [`pipeline::Options`].
//!
//! ## Supported C subset
//!
//! Declarations `int x;` and `char c;` at top level, and
//! `if <literal-or-identifier> { ... }` statements through
//! [`parser::parse::Parser::parse_statements`]. Functions, loops, operators and
//! initializers are not parsed.

pub mod codegen;
pub mod error;
pub mod parser;
pub mod pipeline;

pub use error::{Error, Result};
pub use pipeline::{compile, Compilation, Options};
