// AST (Abstract Syntax Tree) definitions for the C front-end

use super::lexer::{Token, TokenValue};
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub declarations: Vec<Declaration>, // Source order
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}

/// `int x;` / `char c;`
///
/// Initializers are not captured; a declaration is always exactly a type
/// keyword and a name.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub type_specifier: Token,
    pub identifier: Token,
}

/// `if <expr> { <statements> }`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub if_token: Token,
    pub condition: Expression,
    pub body: Vec<Statement>,
}

/// Statements
///
/// Only [`Statement::If`] is produced by the grammar. New statement kinds are
/// added here together with a matching case in the code generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    If(IfStatement),
    /// An expression in statement position. Not yet produced by the parser
    /// and not yet handled by the code generator.
    Expression(Expression),
}

impl Statement {
    /// Short name of the statement kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::If(_) => "IF_STATEMENT",
            Statement::Expression(_) => "EXPRESSION_STATEMENT",
        }
    }
}

/// Expressions: a bare literal or a bare identifier
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Token),
    Identifier(Token),
}

impl Expression {
    /// The token wrapped by this expression
    pub fn token(&self) -> &Token {
        match self {
            Expression::Literal(token) | Expression::Identifier(token) => token,
        }
    }

    pub fn value(&self) -> &TokenValue {
        &self.token().value
    }
}
