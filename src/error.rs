//! Error handling for the front-end pipeline

use crate::parser::lexer::LexError;
use crate::parser::parse::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by [`crate::pipeline`]
#[derive(Debug, Error)]
pub enum Error {
    /// Source file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}
