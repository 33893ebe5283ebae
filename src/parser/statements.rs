//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statements ::= statement*
//! statement  ::= "if" expression "{" statements "}"
//! ```
//!
//! The condition is a bare expression with no surrounding parentheses.
//! Statements are not reachable from [`Parser::parse_program`]; use
//! [`Parser::parse_statements`].

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Expected, ParseError, ParseMode, Parser, RuleMatch};

impl Parser {
    /// Parse statements until one fails to match.
    ///
    /// A malformed statement is an error in strict mode and ends the list in
    /// lenient mode.
    pub(crate) fn statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.statement() {
                RuleMatch::Matched(statement) => statements.push(statement),
                RuleMatch::NoMatch => break,
                RuleMatch::Malformed(err) => {
                    if self.mode == ParseMode::Strict {
                        return Err(err);
                    }
                    log::debug!("stopping at malformed statement: {}", err);
                    break;
                }
            }
        }

        Ok(statements)
    }

    /// Parse an `if` statement
    pub(crate) fn statement(&mut self) -> RuleMatch<Statement> {
        log::trace!("statement at token {}", self.position);
        self.attempt(|p| {
            let Some(if_token) = p.match_keyword(&["if"]) else {
                return Ok(None);
            };
            if p.depth >= p.max_depth {
                return Err(ParseError {
                    expected: vec![Expected::Nesting(p.max_depth)],
                    location: if_token.location,
                    found: Some(if_token),
                });
            }

            let condition = match p.expression() {
                RuleMatch::Matched(expr) => expr,
                RuleMatch::NoMatch => {
                    return Err(p.unexpected(vec![
                        Expected::Kind(TokenKind::Literal),
                        Expected::Kind(TokenKind::Identifier),
                    ]))
                }
                RuleMatch::Malformed(err) => return Err(err),
            };

            p.expect_symbol("{")?;

            p.depth += 1;
            let body = p.statements();
            p.depth -= 1;
            let body = body?;

            p.expect_symbol("}")?;

            Ok(Some(Statement::If(IfStatement {
                if_token,
                condition,
                body,
            })))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::{tokenize, TokenValue};
    use crate::parser::parse::DEFAULT_MAX_DEPTH;

    fn parser(source: &str, mode: ParseMode) -> Parser {
        Parser::with_mode(tokenize(source).unwrap(), mode)
    }

    fn as_if(statement: &Statement) -> &IfStatement {
        match statement {
            Statement::If(stmt) => stmt,
            other => panic!("Expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_statement() {
        let mut parser = parser("if 1 { }", ParseMode::Strict);
        let statements = parser.parse_statements().unwrap();

        assert_eq!(statements.len(), 1);
        let stmt = as_if(&statements[0]);
        assert!(stmt.if_token.is_keyword("if"));
        assert!(matches!(stmt.condition, Expression::Literal(_)));
        assert_eq!(stmt.condition.value(), &TokenValue::Int(1));
        assert!(stmt.body.is_empty());
    }

    #[test]
    fn test_nested_if_statements() {
        let mut parser = parser("if x { if 2 { } if y { } } if z { }", ParseMode::Strict);
        let statements = parser.parse_statements().unwrap();

        assert_eq!(statements.len(), 2);
        let outer = as_if(&statements[0]);
        assert!(matches!(outer.condition, Expression::Identifier(_)));
        assert_eq!(outer.body.len(), 2);
        assert_eq!(as_if(&outer.body[1]).condition.value().to_string(), "y");
    }

    #[test]
    fn test_parenthesized_condition_lenient() {
        let mut parser = parser("if (x) { }", ParseMode::Lenient);
        let statements = parser.parse_statements().unwrap();

        assert!(statements.is_empty());
        assert_eq!(parser.remaining().len(), 6);
    }

    #[test]
    fn test_parenthesized_condition_strict() {
        let mut parser = parser("if (x) { }", ParseMode::Strict);
        let err = parser.parse_statements().unwrap_err();

        assert_eq!(
            err.expected,
            vec![
                Expected::Kind(TokenKind::Literal),
                Expected::Kind(TokenKind::Identifier),
            ]
        );
        assert!(err.found.as_ref().is_some_and(|t| t.is_symbol("(")));
    }

    #[test]
    fn test_unclosed_body_strict() {
        let mut parser = parser("if x {", ParseMode::Strict);
        let err = parser.parse_statements().unwrap_err();
        assert_eq!(err.expected, vec![Expected::Symbol("}")]);
        assert_eq!(err.found, None);
    }

    #[test]
    fn test_malformed_nested_statement() {
        let mut lenient = parser("if x { if { } }", ParseMode::Lenient);
        assert!(lenient.parse_statements().unwrap().is_empty());
        assert_eq!(lenient.remaining().len(), 7);

        let mut strict = parser("if x { if { } }", ParseMode::Strict);
        let err = strict.parse_statements().unwrap_err();
        assert!(err.found.as_ref().is_some_and(|t| t.is_symbol("{")));
        assert_eq!(err.location.column, 11);
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}{}", "if x { ".repeat(4), "} ".repeat(4));

        let mut within = Parser::with_mode(tokenize(&source).unwrap(), ParseMode::Strict)
            .with_max_depth(4);
        assert_eq!(within.parse_statements().unwrap().len(), 1);

        let mut beyond = Parser::with_mode(tokenize(&source).unwrap(), ParseMode::Strict)
            .with_max_depth(3);
        let err = beyond.parse_statements().unwrap_err();
        assert_eq!(err.expected, vec![Expected::Nesting(3)]);
        assert!(err.found.as_ref().is_some_and(|t| t.is_keyword("if")));
        assert_eq!(err.location.column, 22);
    }

    #[test]
    fn test_deep_nesting_does_not_overflow() {
        let source = "if x { ".repeat(10_000);

        let mut strict = parser(&source, ParseMode::Strict);
        let err = strict.parse_statements().unwrap_err();
        assert_eq!(err.expected, vec![Expected::Nesting(DEFAULT_MAX_DEPTH)]);

        let mut lenient = parser(&source, ParseMode::Lenient);
        assert!(lenient.parse_statements().unwrap().is_empty());
        assert_eq!(lenient.remaining().len(), 30_000);
    }

    #[test]
    fn test_declarations_are_not_statements() {
        let mut parser = parser("int x;", ParseMode::Strict);
        let err = parser.parse_statements().unwrap_err();
        assert_eq!(err.expected, vec![Expected::Keyword("if")]);
    }
}
