//! Error types for Botscript

use thiserror::Error;

/// Botscript loading errors
///
/// Every variant except [`Error::Io`] and [`Error::Config`] is produced while
/// turning script text into a [`BotDef`](crate::BotDef). Running a loaded bot
/// never fails: unknown intents and unresolved placeholders are absorbed by
/// the interpreter instead of raised.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexical errors
    /// Input text matched none of the lexical rules
    ///
    /// **Triggered by:** Characters outside the script alphabet, or a string literal
    /// without its closing quote
    /// **Example:** `say "hi" !`
    #[error("Lexical error at line {line}, column {col}: unexpected character '{found}'{message}")]
    LexError {
        /// Line number where scanning stopped
        line: usize,
        /// Column number where scanning stopped
        col: usize,
        /// The character no rule accepted
        found: char,
        /// Additional guidance (empty or starting with a separator)
        message: String,
    },

    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** A token that the grammar does not allow at this position
    /// **Example:** `ask "name?" name` (missing `as`)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    /// Input ended before the `bot` block was opened
    #[error("Unexpected end of input: expected {expected}")]
    UnexpectedEof {
        /// Expected construct description
        expected: String,
    },

    /// Input ended while a block was still open
    ///
    /// **Triggered by:** A missing closing `}` at any nesting level
    /// **Example:** `bot "b" { intent "a" { say "x" }`
    #[error("Unterminated {block} block opened at line {line}, column {col}: missing closing `}}`")]
    UnterminatedBlock {
        /// Human-readable description of the open block, e.g. `intent "greet"`
        block: String,
        /// Line of the block's keyword
        line: usize,
        /// Column of the block's keyword
        col: usize,
    },

    /// Two `intent` blocks share a name
    #[error("Duplicate intent name \"{name}\" at line {line}, column {col}")]
    DuplicateIntent {
        /// The repeated intent name
        name: String,
        /// Line of the second declaration
        line: usize,
        /// Column of the second declaration
        col: usize,
    },

    /// More than one `default` block in a bot
    #[error("Multiple default blocks are not allowed (second one at line {line}, column {col})")]
    MultipleDefaults {
        /// Line of the second `default`
        line: usize,
        /// Column of the second `default`
        col: usize,
    },

    // External errors
    /// Reading a script file failed
    #[error("Cannot read script '{path}': {message}")]
    Io {
        /// Path that was read
        path: String,
        /// Underlying I/O message
        message: String,
    },

    /// Malformed options or classifier rules
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The script cannot be loaded; nothing can run
    Fatal,
    /// The caller may retry, e.g. with a different path or configuration
    Recoverable,
}

impl Error {
    /// Create a configuration error with a message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::LexError { .. }
            | Error::SyntaxError { .. }
            | Error::UnexpectedEof { .. }
            | Error::UnterminatedBlock { .. }
            | Error::DuplicateIntent { .. }
            | Error::MultipleDefaults { .. } => ErrorSeverity::Fatal,

            Error::Io { .. } | Error::Config(_) => ErrorSeverity::Recoverable,
        }
    }

    /// Source position (line, column) of the failure, when there is one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::LexError { line, col, .. }
            | Error::SyntaxError { line, col, .. }
            | Error::UnterminatedBlock { line, col, .. }
            | Error::DuplicateIntent { line, col, .. }
            | Error::MultipleDefaults { line, col } => Some((*line, *col)),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// Result type for Botscript operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_errors_are_fatal() {
        let err = Error::MultipleDefaults { line: 3, col: 5 };
        assert_eq!(err.classify(), ErrorSeverity::Fatal);
        assert_eq!(err.position(), Some((3, 5)));
    }

    #[test]
    fn test_unterminated_block_message() {
        let err = Error::UnterminatedBlock {
            block: "intent \"greet\"".to_string(),
            line: 2,
            col: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Unterminated intent \"greet\" block"));
        assert!(msg.contains("missing closing `}`"));
    }

    #[test]
    fn test_config_error_is_recoverable() {
        let err = Error::config("bad rules");
        assert_eq!(err.classify(), ErrorSeverity::Recoverable);
        assert_eq!(err.position(), None);
    }
}
