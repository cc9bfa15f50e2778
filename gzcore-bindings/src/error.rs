//! Error types for binding operations and DEFBINDS parsing.

use thiserror::Error;

/// Failure of a binding operation. All variants are non-fatal: the console
/// prints the message and the operation does nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("Unknown key \"{0}\"")]
    UnknownKey(String),

    #[error("Key code {0} is out of range")]
    KeyOutOfRange(u32),

    /// Carries the usage line to show.
    #[error("{0}")]
    MissingArgument(&'static str),

    #[error("Rebind cannot be used from the console")]
    NoTriggeringKey,
}

/// Syntax error in a DEFBINDS lump.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefbindsError {
    #[error("line {line}: expected {expected} after \"{after}\"")]
    UnexpectedEnd {
        line: usize,
        expected: &'static str,
        after: String,
    },

    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: usize },
}
