//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The ID contains a path separator.
    InvalidId(String),

    /// The path has no file name to derive an ID from.
    MissingFileName(String),

    /// The provided date is not a valid calendar date.
    InvalidDate(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidId(id) => write!(f, "ID cannot contain a path separator: {}", id),
            Self::MissingFileName(path) => write!(f, "Path has no file name: {}", path),
            Self::InvalidDate(date) => write!(f, "Invalid date: {}", date),
        }
    }
}

impl std::error::Error for ValidationError {}
