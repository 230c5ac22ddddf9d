// src/error.rs
use jjq_engine::BuildError;
use jjq_syntax::SyntaxError;
use thiserror::Error;

/// A comprehensive error type for compiling and running filters.
#[derive(Error, Debug)]
pub enum JjqError {
    #[error("Parsing failed: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Invalid filter: {0}")]
    Build(#[from] BuildError),

    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl JjqError {
    /// True when the filter text itself is at fault, as opposed to the input.
    pub fn is_filter_error(&self) -> bool {
        matches!(self, JjqError::Syntax(_) | JjqError::Build(_))
    }
}
