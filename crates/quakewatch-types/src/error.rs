//! Error types for quakewatch.

use thiserror::Error;

/// Classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkErrorKind {
    /// The request did not complete within its timeout.
    Timeout,
    /// The connection could not be established.
    ConnectionRefused,
    /// The server answered with a non-2xx status.
    NonSuccessStatus(u16),
    /// Any other transport or read failure.
    Io,
}

impl std::fmt::Display for NetworkErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "timeout"),
            Self::ConnectionRefused => write!(f, "connection refused"),
            Self::NonSuccessStatus(code) => write!(f, "HTTP status {code}"),
            Self::Io => write!(f, "I/O error"),
        }
    }
}

/// A classified transport failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct NetworkError {
    /// Failure classification.
    pub kind: NetworkErrorKind,
    /// Human readable detail.
    pub message: String,
}

impl NetworkError {
    /// Creates a new network error.
    #[must_use]
    pub fn new(kind: NetworkErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Classification of a document-level parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The document is not the expected feature collection.
    Malformed,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed document"),
        }
    }
}

/// Errors that can occur while parsing a feed document.
///
/// Problems with individual entries never produce a `ParseError`; only a
/// document that cannot be read as a feature collection does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The document is not the expected feature collection.
    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl ParseError {
    /// Returns the failure classification.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        match self {
            Self::Malformed(_) => ParseErrorKind::Malformed,
        }
    }
}
