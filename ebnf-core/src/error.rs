//! Error and source position types shared by the scanner and parser.

use std::fmt;

/// A location in the grammar source, 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
    /// Name of the scanned file, if the source came from one.
    pub file: Option<String>,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            line,
            column,
            file: None,
        }
    }

    pub fn in_file(line: usize, column: usize, file: impl Into<String>) -> Self {
        Self {
            line,
            column,
            file: Some(file.into()),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{} ({}, {})", file, self.line, self.column),
            None => write!(f, "({}, {})", self.line, self.column),
        }
    }
}

/// Raised for any malformed grammar input.
///
/// Parsing fails fast on the first error; there is no recovery mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Syntax error: {message} at {position}")]
pub struct SyntaxError {
    pub message: String,
    pub position: Position,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}
