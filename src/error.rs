//! Error types for the store and report layers

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed record in {} at line {line}: {reason}", path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Invalid date '{0}', expected e.g. 22 Dec 2025")]
    InvalidDate(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Username or password cannot be stored: '{0}'")]
    InvalidCredential(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Input closed while waiting for an answer")]
    InputClosed,
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
