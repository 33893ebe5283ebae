//! End-to-end pipeline: source text → tokens → AST → regenerated text
//!
//! Each stage is a plain function over its input. The parser takes ownership
//! of a copy of the token stream, so the token listing stays available to the
//! caller.

use crate::codegen;
use crate::error::{Error, Result};
use crate::parser::ast::Program;
use crate::parser::lexer::{Lexer, LexerOptions, ScanOrder, Token, UnknownCharPolicy};
use crate::parser::parse::{ParseMode, Parser};
use std::fs;
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub lexer: LexerOptions,
    pub parse_mode: ParseMode,
}

impl Options {
    /// Reject unknown characters and report grammar mismatches.
    pub fn strict() -> Self {
        Self::default()
            .with_unknown_chars(UnknownCharPolicy::Reject)
            .with_parse_mode(ParseMode::Strict)
    }

    pub fn with_order(mut self, order: ScanOrder) -> Self {
        self.lexer = self.lexer.with_order(order);
        self
    }

    pub fn with_unknown_chars(mut self, policy: UnknownCharPolicy) -> Self {
        self.lexer = self.lexer.with_unknown_chars(policy);
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }
}

/// Output of every stage
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub program: Program,
    /// Tokens the parser stopped before (always empty in strict mode)
    pub unparsed: Vec<Token>,
    pub code: String,
}

/// Run only the lexer.
pub fn lex(source: &str, options: &Options) -> Result<Vec<Token>> {
    Ok(Lexer::with_options(source, options.lexer).tokenize()?)
}

/// Run lexer, parser and code generator over `source`.
pub fn compile(source: &str, options: &Options) -> Result<Compilation> {
    let tokens = lex(source, options)?;

    let mut parser = Parser::with_mode(tokens.clone(), options.parse_mode);
    let program = parser.parse_program()?;
    let unparsed = parser.remaining().to_vec();
    if !unparsed.is_empty() {
        log::warn!(
            "{} trailing tokens not parsed, starting with {}",
            unparsed.len(),
            unparsed[0]
        );
    }

    let code = codegen::generate(&program);

    Ok(Compilation {
        tokens,
        program,
        unparsed,
        code,
    })
}

/// Read `path` and compile its contents.
pub fn compile_file(path: &Path, options: &Options) -> Result<Compilation> {
    let source = read_source(path)?;
    compile(&source, options)
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_declarations() {
        let result = compile("int x;\nchar   y ;", &Options::default()).unwrap();

        assert_eq!(result.tokens.len(), 6);
        assert_eq!(result.program.declarations.len(), 2);
        assert!(result.unparsed.is_empty());
        assert_eq!(result.code, "int x;\nchar y;\n");
    }

    #[test]
    fn test_compile_keeps_unparsed_tail() {
        let result = compile("int x; int main() { return 0; }", &Options::default()).unwrap();

        assert_eq!(result.code, "int x;\n");
        assert_eq!(result.unparsed.len(), 9);
    }

    #[test]
    fn test_strict_options() {
        let err = compile("int x; @", &Options::strict()).unwrap_err();
        assert!(matches!(err, Error::Lex(_)));

        let err = compile("int main;;", &Options::strict()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = compile_file(Path::new("does/not/exist.c"), &Options::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("failed to read does/not/exist.c"));
    }
}
