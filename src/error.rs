//! Error types for the grammar workbench.

use thiserror::Error;

/// Errors that can occur while reading or validating a grammar specification.
///
/// LL(1) conflicts are deliberately absent: a conflicting grammar is a valid
/// analysis subject, and its conflicts are part of the analysis result.
#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error("line {line}: unexpected character '{found}'")]
    Lexical { line: usize, found: char },

    #[error("line {line}: unterminated {what}")]
    Unterminated { line: usize, what: &'static str },

    #[error("line {line}: unexpected {found}")]
    Syntax { line: usize, found: String },

    #[error("grammar has no rules")]
    EmptyGrammar,

    #[error("start symbol '{name}' is not the head of any rule")]
    UndeclaredStartSymbol { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, WorkbenchError>;
