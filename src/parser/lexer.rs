//! Lexer (tokenizer) for C source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Two scan orders are supported:
//!
//! - [`ScanOrder::Positional`]: a single left-to-right maximal-munch pass.
//!   At each position the categories are tried in priority order
//!   (keyword > identifier > literal > symbol > operator) and whitespace is
//!   skipped. Tokens come out in source order, each exactly once.
//! - [`ScanOrder::CategoryMajor`]: every category pattern is run over the whole
//!   text before the next one is tried, so the output is grouped by category
//!   (all keywords, then all identifiers, ...). Keyword spellings also match the
//!   identifier pattern and therefore appear twice, and digit runs inside names
//!   such as `x1` also surface as literals. Kept for compatibility with the
//!   legacy token dumps.
//!
//! Characters that belong to no category are dropped by default; see
//! [`UnknownCharPolicy`].

use super::ast::SourceLocation;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::fmt;
use thiserror::Error;

/// The closed keyword set
pub const KEYWORDS: [&str; 13] = [
    "int", "char", "void", "if", "else", "while", "for", "switch", "case", "default", "break",
    "continue", "return",
];

/// Single-character punctuation symbols
pub const SYMBOL_CHARS: &str = "(){}[];,.";

/// Single-character operators
pub const OPERATOR_CHARS: &str = "+-*/%=<>!&|^~";

static KEYWORD_SET: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| KEYWORDS.iter().copied().collect());

/// Category patterns for the category-major scan, in scan order.
static CATEGORY_PATTERNS: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    let keyword = format!(r"\b(?:{})\b", KEYWORDS.join("|"));
    [
        (Category::Keyword, keyword.as_str()),
        (Category::Identifier, r"[a-zA-Z_][a-zA-Z_0-9]*"),
        (Category::Literal, r"[0-9]+"),
        (Category::Symbol, r"[(){}\[\];,.]"),
        (Category::Operator, r"[+\-*/%=<>!&|^~]"),
        (Category::Whitespace, r"\s+"),
    ]
    .into_iter()
    .map(|(category, pattern)| {
        (category, Regex::new(pattern).expect("category patterns are valid"))
    })
    .collect()
});

/// Returns true if `word` is one of [`KEYWORDS`].
pub fn is_keyword(word: &str) -> bool {
    KEYWORD_SET.contains(word)
}

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Literal,
    Symbol,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Literal => "LITERAL",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Operator => "OPERATOR",
        };
        f.write_str(name)
    }
}

/// Lexical categories recognised while scanning. Whitespace is matched only to
/// be discarded and never becomes a [`TokenKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Category {
    Keyword,
    Identifier,
    Literal,
    Symbol,
    Operator,
    Whitespace,
}

impl Category {
    fn token_kind(self) -> Option<TokenKind> {
        match self {
            Category::Keyword => Some(TokenKind::Keyword),
            Category::Identifier => Some(TokenKind::Identifier),
            Category::Literal => Some(TokenKind::Literal),
            Category::Symbol => Some(TokenKind::Symbol),
            Category::Operator => Some(TokenKind::Operator),
            Category::Whitespace => None,
        }
    }
}

/// Token payload: the parsed integer for literals, the matched text otherwise
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(n) => write!(f, "{}", n),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

/// A classified lexical unit.
///
/// Tokens are immutable once produced; AST nodes hold copies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, location: SourceLocation) -> Self {
        Self {
            kind,
            value,
            location,
        }
    }

    /// Kind and value without the location, for comparing token streams lexed
    /// from differently formatted text.
    pub fn lexeme(&self) -> (TokenKind, &TokenValue) {
        (self.kind, &self.value)
    }

    /// The matched text, or `None` for literals
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(s) => Some(s),
            TokenValue::Int(_) => None,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text() == Some(word)
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text() == Some(symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Int(n) => write!(f, "{} {}", self.kind, n),
            TokenValue::Text(s) => write!(f, "{} '{}'", self.kind, s),
        }
    }
}

/// Order in which the lexer emits tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Left-to-right maximal munch, one token per lexeme
    #[default]
    Positional,
    /// Legacy: grouped by category, keywords duplicated as identifiers
    CategoryMajor,
}

/// What to do with characters that match no category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCharPolicy {
    /// Drop them silently (logged at debug level)
    #[default]
    Skip,
    /// Fail with [`LexError::UnexpectedChar`]
    Reject,
}

/// Lexer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerOptions {
    pub order: ScanOrder,
    pub unknown_chars: UnknownCharPolicy,
}

impl LexerOptions {
    pub fn with_order(mut self, order: ScanOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_unknown_chars(mut self, policy: UnknownCharPolicy) -> Self {
        self.unknown_chars = policy;
        self
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character {ch:?} at {location}")]
    UnexpectedChar { ch: char, location: SourceLocation },

    #[error("integer literal {text} out of range at {location}")]
    LiteralOverflow {
        text: String,
        location: SourceLocation,
    },
}

/// Lexer for C source code
pub struct Lexer<'a> {
    source: &'a str,
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    options: LexerOptions,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with default options.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &'a str, options: LexerOptions) -> Self {
        Self {
            source,
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            options,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let tokens = match self.options.order {
            ScanOrder::Positional => self.tokenize_positional()?,
            ScanOrder::CategoryMajor => self.tokenize_category_major()?,
        };
        log::info!(
            "tokenized {} chars into {} tokens ({:?})",
            self.input.len(),
            tokens.len(),
            self.options.order
        );
        Ok(tokens)
    }

    fn tokenize_positional(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                break;
            };
            let loc = self.current_location();

            let token = match ch {
                'a'..='z' | 'A'..='Z' | '_' => Some(self.word(loc)),
                '0'..='9' => self.number_literal(loc)?,
                _ if SYMBOL_CHARS.contains(ch) => {
                    self.advance();
                    Some(Token::new(TokenKind::Symbol, TokenValue::Text(ch.to_string()), loc))
                }
                _ if OPERATOR_CHARS.contains(ch) => {
                    self.advance();
                    Some(Token::new(TokenKind::Operator, TokenValue::Text(ch.to_string()), loc))
                }
                _ => {
                    self.advance();
                    self.unknown_char(ch, loc)?;
                    None
                }
            };

            if let Some(token) = token {
                log::debug!("found token {} at {}", token, token.location);
                tokens.push(token);
            }
        }

        Ok(tokens)
    }

    /// Identifier or keyword, matched greedily.
    ///
    /// A keyword must sit on word boundaries: a run touching a non-ASCII
    /// letter or digit (`inté`) is an identifier, matching the category-major
    /// keyword pattern.
    fn word(&mut self, loc: SourceLocation) -> Token {
        let start = self.position;
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let before = start.checked_sub(1).and_then(|i| self.input.get(i));
        let bounded = !before.is_some_and(|c| c.is_alphanumeric())
            && !self.peek().is_some_and(|c| c.is_alphanumeric());

        let kind = if bounded && is_keyword(&word) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, TokenValue::Text(word), loc)
    }

    /// Decimal digit run. `Ok(None)` when an out-of-range literal is skipped.
    fn number_literal(&mut self, loc: SourceLocation) -> Result<Option<Token>, LexError> {
        let mut digits = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        self.literal_token(digits, loc)
    }

    fn literal_token(
        &self,
        digits: String,
        loc: SourceLocation,
    ) -> Result<Option<Token>, LexError> {
        match digits.parse::<i64>() {
            Ok(value) => Ok(Some(Token::new(TokenKind::Literal, TokenValue::Int(value), loc))),
            Err(_) => match self.options.unknown_chars {
                UnknownCharPolicy::Reject => Err(LexError::LiteralOverflow {
                    text: digits,
                    location: loc,
                }),
                UnknownCharPolicy::Skip => {
                    log::warn!("skipping out-of-range literal {} at {}", digits, loc);
                    Ok(None)
                }
            },
        }
    }

    fn unknown_char(&self, ch: char, loc: SourceLocation) -> Result<(), LexError> {
        match self.options.unknown_chars {
            UnknownCharPolicy::Reject => Err(LexError::UnexpectedChar { ch, location: loc }),
            UnknownCharPolicy::Skip => {
                log::debug!("skipping unrecognised character {:?} at {}", ch, loc);
                Ok(())
            }
        }
    }

    /// Run each category pattern over the whole source in turn.
    fn tokenize_category_major(&mut self) -> Result<Vec<Token>, LexError> {
        let lines = LineIndex::new(self.source);
        let mut covered = vec![false; self.source.len()];
        let mut tokens = Vec::new();

        for (category, pattern) in CATEGORY_PATTERNS.iter() {
            log::trace!("matching category {:?}", category);
            for m in pattern.find_iter(self.source) {
                covered[m.range()].fill(true);

                let Some(kind) = category.token_kind() else {
                    continue;
                };
                let loc = lines.location_at(m.start());
                let token = if kind == TokenKind::Literal {
                    self.literal_token(m.as_str().to_string(), loc)?
                } else {
                    Some(Token::new(kind, TokenValue::Text(m.as_str().to_string()), loc))
                };

                if let Some(token) = token {
                    log::debug!("found token {} at {}", token, token.location);
                    tokens.push(token);
                }
            }
        }

        for (offset, ch) in self.source.char_indices() {
            if !covered[offset] {
                self.unknown_char(ch, lines.location_at(offset))?;
            }
        }

        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Maps byte offsets to line/column locations
struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    fn location_at(&self, offset: usize) -> SourceLocation {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let start = self.line_starts[line - 1];
        let column = self.source[start..offset].chars().count() + 1;
        SourceLocation::new(line, column)
    }
}

/// Tokenize `source` with default options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
