//! Expression parsing
//!
//! Only bare operands are supported:
//!
//! ```text
//! expression ::= LITERAL | IDENTIFIER
//! ```
//!
//! There are no operators, calls or parenthesized expressions.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, RuleMatch};

impl Parser {
    /// Parse a literal or identifier expression
    pub(crate) fn expression(&mut self) -> RuleMatch<Expression> {
        if let Some(token) = self.match_kind(TokenKind::Literal) {
            return RuleMatch::Matched(Expression::Literal(token));
        }
        if let Some(token) = self.match_kind(TokenKind::Identifier) {
            return RuleMatch::Matched(Expression::Identifier(token));
        }
        RuleMatch::NoMatch
    }
}
