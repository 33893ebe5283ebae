//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: Parsing top-level declarations
//! - `statements`: Parsing `if` statements and statement lists
//! - `expressions`: Parsing bare literal/identifier expressions
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The parser owns its token vector and walks it with a cursor. Every grammar
//! rule runs through [`Parser::attempt`], which restores the cursor unless the
//! rule matched completely, so a failed rule never consumes tokens.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;
use thiserror::Error;

/// What a parse error expected to see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expected {
    Kind(TokenKind),
    Keyword(&'static str),
    Symbol(&'static str),
    /// Statement nesting exceeded the parser's limit
    Nesting(usize),
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Keyword(word) => write!(f, "'{}'", word),
            Expected::Symbol(symbol) => write!(f, "'{}'", symbol),
            Expected::Nesting(limit) => write!(f, "at most {} nested statements", limit),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "Parse error at {location}: expected {}, found {}",
    describe_expected(.expected),
    describe_found(.found)
)]
pub struct ParseError {
    pub expected: Vec<Expected>,
    /// `None` at end of input
    pub found: Option<Token>,
    pub location: SourceLocation,
}

fn describe_expected(expected: &[Expected]) -> String {
    let names: Vec<String> = expected.iter().map(|e| e.to_string()).collect();
    names.join(" or ")
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(token) => token.to_string(),
        None => "end of input".to_string(),
    }
}

/// How grammar mismatches are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Stop at the first token no rule accepts and keep what was parsed.
    /// Unparsed tokens stay available through [`Parser::remaining`].
    #[default]
    Lenient,
    /// Fail with a [`ParseError`] on the first malformed rule or leftover token.
    Strict,
}

/// Outcome of a single grammar rule
#[derive(Debug, Clone, PartialEq)]
pub enum RuleMatch<T> {
    Matched(T),
    /// The first token does not start this rule
    NoMatch,
    /// The rule started but a later token was wrong
    Malformed(ParseError),
}

/// Default limit on nested statements
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Recursive descent parser for the C subset
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) mode: ParseMode,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

impl Parser {
    /// Take ownership of a token stream. The stream cannot be shared with
    /// another parser.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_mode(tokens, ParseMode::default())
    }

    pub fn with_mode(tokens: Vec<Token>, mode: ParseMode) -> Self {
        Self {
            tokens,
            position: 0,
            mode,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deeply statements may nest. Deeper input is malformed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the entire program (top-level declarations).
    ///
    /// Consumes tokens from the cursor onward; calling it again once the
    /// stream is drained yields an empty [`Program`].
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            match self.declaration() {
                RuleMatch::Matched(decl) => program.declarations.push(decl),
                RuleMatch::NoMatch => {
                    if self.mode == ParseMode::Strict {
                        return Err(self.unexpected(vec![
                            Expected::Keyword("int"),
                            Expected::Keyword("char"),
                        ]));
                    }
                    break;
                }
                RuleMatch::Malformed(err) => {
                    if self.mode == ParseMode::Strict {
                        return Err(err);
                    }
                    log::debug!("stopping at malformed declaration: {}", err);
                    break;
                }
            }
        }

        log::info!(
            "parsed {} declarations, {} tokens left",
            program.declarations.len(),
            self.remaining().len()
        );
        Ok(program)
    }

    /// Parse a sequence of statements from the cursor onward.
    ///
    /// In strict mode every remaining token must belong to a statement.
    pub fn parse_statements(&mut self) -> Result<Vec<Statement>, ParseError> {
        let statements = self.statements()?;

        if self.mode == ParseMode::Strict && !self.is_at_end() {
            return Err(self.unexpected(vec![Expected::Keyword("if")]));
        }

        Ok(statements)
    }

    /// Tokens not yet consumed by a successful rule
    pub fn remaining(&self) -> &[Token] {
        &self.tokens[self.position..]
    }

    // ===== Helper methods =====

    /// Run a rule, restoring the cursor unless it returns `Ok(Some(_))`.
    pub(crate) fn attempt<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<Option<T>, ParseError>,
    ) -> RuleMatch<T> {
        let start = self.position;
        match rule(self) {
            Ok(Some(node)) => RuleMatch::Matched(node),
            Ok(None) => {
                self.position = start;
                RuleMatch::NoMatch
            }
            Err(err) => {
                self.position = start;
                RuleMatch::Malformed(err)
            }
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned()?;
        self.position += 1;
        Some(token)
    }

    /// Consume the current token if it is one of `words`.
    pub(crate) fn match_keyword(&mut self, words: &[&str]) -> Option<Token> {
        let is_match = self
            .peek()
            .is_some_and(|t| words.iter().any(|word| t.is_keyword(word)));
        if is_match {
            self.advance()
        } else {
            None
        }
    }

    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek().is_some_and(|t| t.kind == kind) {
            self.advance()
        } else {
            None
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.match_kind(kind)
            .ok_or_else(|| self.unexpected(vec![Expected::Kind(kind)]))
    }

    pub(crate) fn expect_symbol(&mut self, symbol: &'static str) -> Result<Token, ParseError> {
        if self.peek().is_some_and(|t| t.is_symbol(symbol)) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.unexpected(vec![Expected::Symbol(symbol)]))
    }

    /// Error describing the token at the cursor
    pub(crate) fn unexpected(&self, expected: Vec<Expected>) -> ParseError {
        let found = self.peek().cloned();
        let location = match &found {
            Some(token) => token.location,
            None => self
                .tokens
                .last()
                .map(|t| t.location)
                .unwrap_or_default(),
        };
        ParseError {
            expected,
            found,
            location,
        }
    }
}
