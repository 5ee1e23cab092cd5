//! Error types for practice-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing an authored question bank.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("invalid ID format at line {line}: {value}")]
    InvalidId { line: usize, value: String },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: String, line: usize },
}

/// Errors raised when a model reply cannot be turned into a question.
#[derive(Debug, Error)]
pub enum TutorError {
    #[error("reply did not contain a JSON object")]
    MissingJson,

    #[error("malformed question JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("generated question is missing its {0}")]
    EmptyField(&'static str),
}
