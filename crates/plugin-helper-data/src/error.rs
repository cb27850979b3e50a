//! Error type shared by every plugin-helper crate.

use thiserror::Error;

/// Errors raised while moving values between the dynamic tree and native
/// types.
///
/// Absence of a value is never an error; extractors report it as a zero value
/// or `None`.
#[derive(Debug, Error)]
pub enum Error {
    /// A value held a different variant than the caller asked for.
    #[error("type mismatch at {path:?}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// Embedded JSON text could not be parsed.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A flatten input was not a list or set.
    #[error("cannot flatten {found} as a sequence")]
    NotASequence { found: &'static str },
    /// A write targeted a path the store cannot address.
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

impl Error {
    pub(crate) fn mismatch(expected: &'static str, found: &'static str) -> Self {
        Error::TypeMismatch {
            path: String::new(),
            expected,
            found,
        }
    }

    pub(crate) fn invalid_path(path: &str, reason: &'static str) -> Self {
        Error::InvalidPath {
            path: path.to_owned(),
            reason,
        }
    }

    /// Attach the effective path to a type mismatch raised by a [`crate::Value`]
    /// accessor. Other variants are returned unchanged.
    pub fn at(self, path: impl Into<String>) -> Self {
        match self {
            Error::TypeMismatch {
                expected, found, ..
            } => Error::TypeMismatch {
                path: path.into(),
                expected,
                found,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
