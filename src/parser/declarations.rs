//! Declaration parsing implementation
//!
//! # Grammar
//!
//! ```text
//! program     ::= declaration*
//! declaration ::= ("int" | "char") IDENTIFIER ";"
//! ```
//!
//! Initializers are not part of the grammar: `int x = 10;` does not match,
//! and in lenient mode the program stops before it.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{Parser, RuleMatch};

/// Keywords that may start a declaration
const TYPE_SPECIFIERS: [&str; 2] = ["int", "char"];

impl Parser {
    /// Parse a single declaration: `int x;`
    pub(crate) fn declaration(&mut self) -> RuleMatch<Declaration> {
        log::trace!("declaration at token {}", self.position);
        self.attempt(|p| {
            let Some(type_specifier) = p.match_keyword(&TYPE_SPECIFIERS) else {
                return Ok(None);
            };
            let identifier = p.expect_kind(TokenKind::Identifier)?;
            p.expect_symbol(";")?;

            Ok(Some(Declaration {
                type_specifier,
                identifier,
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::Declaration;
    use crate::parser::lexer::{tokenize, TokenKind};
    use crate::parser::parse::{Expected, Parser, RuleMatch};

    fn declaration(source: &str) -> (RuleMatch<Declaration>, Parser) {
        let mut parser = Parser::new(tokenize(source).unwrap());
        (parser.declaration(), parser)
    }

    #[test]
    fn test_int_declaration() {
        let (result, parser) = declaration("int x;");
        match result {
            RuleMatch::Matched(decl) => {
                assert!(decl.type_specifier.is_keyword("int"));
                assert_eq!(decl.identifier.text(), Some("x"));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
        assert!(parser.remaining().is_empty());
    }

    #[test]
    fn test_void_is_not_a_type_specifier() {
        let (result, parser) = declaration("void f;");
        assert_eq!(result, RuleMatch::NoMatch);
        assert_eq!(parser.remaining().len(), 3);
    }

    #[test]
    fn test_missing_identifier_is_malformed() {
        let (result, parser) = declaration("int 5;");
        match result {
            RuleMatch::Malformed(err) => {
                assert_eq!(err.expected, vec![Expected::Kind(TokenKind::Identifier)]);
            }
            other => panic!("Expected malformed declaration, got {:?}", other),
        }
        assert_eq!(parser.remaining().len(), 3);
    }

    #[test]
    fn test_initializer_is_malformed_and_not_consumed() {
        let (result, parser) = declaration("int x = 10;");
        assert!(matches!(result, RuleMatch::Malformed(_)));
        assert!(parser.remaining()[0].is_keyword("int"));
    }
}
