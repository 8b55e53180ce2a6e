//! Error types for Tally

use std::fmt;

use thiserror::Error;

/// Abstract failure kinds reported across the collaborator boundary.
///
/// Store and sink implementations map their provider-specific error codes
/// onto these kinds so the core never branches on vendor strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The requested record or user does not exist
    NotFound,
    /// The request was malformed or out of range
    InvalidInput,
    /// The caller is not allowed to read this data
    Unauthorized,
    /// A temporary failure; a later identical call may succeed
    Transient,
}

impl StoreErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreErrorKind::NotFound => "not_found",
            StoreErrorKind::InvalidInput => "invalid_input",
            StoreErrorKind::Unauthorized => "unauthorized",
            StoreErrorKind::Transient => "transient",
        }
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Transaction store error ({kind}): {message}")]
    Store {
        kind: StoreErrorKind,
        message: String,
    },

    #[error("Notification publish error: {0}")]
    Publish(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Build a store error with an abstract kind
    pub fn store(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Error::Store {
            kind,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
