//! Code regeneration
//!
//! Walks a parsed [`Program`] and emits a textual reconstruction of it. Output
//! lines end in `\n`.
//!
//! Statement emission covers every kind the parser produces. A statement kind
//! without an emitter case is an internal invariant violation and panics:
//! grammar and generator coverage gaps must surface immediately.
//!
//! Nested statements are walked with an explicit work stack, so emission depth
//! is not bounded by the thread's stack size.

use crate::parser::ast::{Declaration, IfStatement, Program, Statement};

/// Pending work while emitting nested statements
enum Step<'a> {
    Statement(&'a Statement),
    If(&'a IfStatement),
    Close,
}

/// Accumulates generated text
#[derive(Debug, Default)]
pub struct CodeGenerator {
    code: String,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit every declaration of `program`, in order.
    pub fn generate(mut self, program: &Program) -> String {
        for declaration in &program.declarations {
            self.emit_declaration(declaration);
        }
        log::info!(
            "generated {} bytes for {} declarations",
            self.code.len(),
            program.declarations.len()
        );
        self.code
    }

    /// Emit a single `if` statement and its nested body.
    pub fn generate_if_statement(mut self, statement: &IfStatement) -> String {
        self.emit(vec![Step::If(statement)]);
        self.code
    }

    /// Emit a list of statements.
    ///
    /// # Panics
    ///
    /// Panics on a statement kind the generator has no case for.
    pub fn generate_statements(mut self, statements: &[Statement]) -> String {
        self.emit(statements.iter().rev().map(Step::Statement).collect());
        self.code
    }

    fn emit_declaration(&mut self, declaration: &Declaration) {
        self.code.push_str(&format!(
            "{} {};\n",
            declaration.type_specifier.value, declaration.identifier.value
        ));
    }

    /// Drain `stack`, last entry first.
    fn emit(&mut self, mut stack: Vec<Step<'_>>) {
        while let Some(step) = stack.pop() {
            match step {
                Step::Statement(Statement::If(stmt)) | Step::If(stmt) => {
                    self.code
                        .push_str(&format!("if ({}) {{\n", stmt.condition.value()));
                    stack.push(Step::Close);
                    stack.extend(stmt.body.iter().rev().map(Step::Statement));
                }
                Step::Statement(other) => {
                    panic!("unknown statement type: {}", other.kind_name())
                }
                Step::Close => self.code.push_str("}\n"),
            }
        }
    }
}

/// Generate source text for `program`.
pub fn generate(program: &Program) -> String {
    CodeGenerator::new().generate(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{Expression, SourceLocation};
    use crate::parser::lexer::{Token, TokenKind, TokenValue};

    fn token(kind: TokenKind, value: TokenValue) -> Token {
        Token::new(kind, value, SourceLocation::new(1, 1))
    }

    fn text(kind: TokenKind, s: &str) -> Token {
        token(kind, TokenValue::Text(s.to_string()))
    }

    fn if_statement(condition: Expression, body: Vec<Statement>) -> IfStatement {
        IfStatement {
            if_token: text(TokenKind::Keyword, "if"),
            condition,
            body,
        }
    }

    #[test]
    fn test_generate_declarations() {
        let program = Program {
            declarations: vec![
                Declaration {
                    type_specifier: text(TokenKind::Keyword, "int"),
                    identifier: text(TokenKind::Identifier, "x"),
                },
                Declaration {
                    type_specifier: text(TokenKind::Keyword, "char"),
                    identifier: text(TokenKind::Identifier, "c"),
                },
            ],
        };

        assert_eq!(generate(&program), "int x;\nchar c;\n");
    }

    #[test]
    fn test_generate_empty_program() {
        assert_eq!(generate(&Program::new()), "");
    }

    #[test]
    fn test_generate_nested_if() {
        let inner = if_statement(
            Expression::Identifier(text(TokenKind::Identifier, "flag")),
            vec![],
        );
        let outer = if_statement(
            Expression::Literal(token(TokenKind::Literal, TokenValue::Int(1))),
            vec![Statement::If(inner)],
        );

        assert_eq!(
            CodeGenerator::new().generate_if_statement(&outer),
            "if (1) {\nif (flag) {\n}\n}\n"
        );
    }

    #[test]
    fn test_generate_sibling_order() {
        let first = if_statement(
            Expression::Identifier(text(TokenKind::Identifier, "a")),
            vec![Statement::If(if_statement(
                Expression::Identifier(text(TokenKind::Identifier, "b")),
                vec![],
            ))],
        );
        let second = if_statement(
            Expression::Identifier(text(TokenKind::Identifier, "c")),
            vec![],
        );

        assert_eq!(
            CodeGenerator::new().generate_statements(&[Statement::If(first), Statement::If(second)]),
            "if (a) {\nif (b) {\n}\n}\nif (c) {\n}\n"
        );
    }

    #[test]
    fn test_generate_deeply_nested_if() {
        let depth = 2_000;
        let mut stmt = if_statement(
            Expression::Literal(token(TokenKind::Literal, TokenValue::Int(0))),
            vec![],
        );
        for _ in 1..depth {
            stmt = if_statement(
                Expression::Literal(token(TokenKind::Literal, TokenValue::Int(0))),
                vec![Statement::If(stmt)],
            );
        }

        let code = CodeGenerator::new().generate_if_statement(&stmt);
        assert_eq!(code.matches("if (0) {\n").count(), depth);
        assert!(code.ends_with(&"}\n".repeat(depth)));
    }

    #[test]
    #[should_panic(expected = "unknown statement type: EXPRESSION_STATEMENT")]
    fn test_unknown_statement_kind_panics() {
        let stray = Statement::Expression(Expression::Identifier(text(
            TokenKind::Identifier,
            "x",
        )));
        CodeGenerator::new().generate_statements(&[stray]);
    }

    #[test]
    #[should_panic(expected = "unknown statement type")]
    fn test_unknown_statement_inside_if_body_panics() {
        let outer = if_statement(
            Expression::Literal(token(TokenKind::Literal, TokenValue::Int(0))),
            vec![Statement::Expression(Expression::Literal(token(
                TokenKind::Literal,
                TokenValue::Int(2),
            )))],
        );
        CodeGenerator::new().generate_if_statement(&outer);
    }
}
