//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors in the declared shape of a command tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("command name must not be empty (under '{parent}')")]
    EmptyName { parent: String },

    #[error("duplicate subcommand '{name}' under '{parent}'")]
    DuplicateCommand { parent: String, name: String },

    #[error("duplicate option '{name}' on '{command}'")]
    DuplicateOption { command: String, name: String },

    #[error("duplicate short option '-{short}' on '{command}'")]
    DuplicateShort { command: String, short: char },
}

/// How an argument vector failed to match the command tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token matched neither a sibling command nor a declared option.
    UnmatchedArgument,
    /// A required option or positional was not supplied.
    MissingParameter,
    /// An option was given without its value, or with an unusable one.
    InvalidValue,
}

/// Malformed input against the declared command tree.
///
/// `path` is the deepest command path matched before the failure, so usage
/// can be shown for the level the user was at.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub path: Vec<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path,
        }
    }
}
