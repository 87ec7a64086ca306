//! Error types for line tokenizing.

use thiserror::Error;

/// Errors produced when a raw protocol line cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LineParseError {
    /// The line was empty (or only a line terminator).
    #[error("empty line")]
    EmptyLine,

    /// No command could be found after the tags and prefix.
    #[error("missing command at position {position}")]
    MissingCommand {
        /// Byte offset where the command was expected.
        position: usize,
    },

    /// The command token is neither letters nor a three digit numeric.
    #[error("invalid command {0:?}")]
    InvalidCommand(String),
}
