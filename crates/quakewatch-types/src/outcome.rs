//! Fetch outcomes delivered to observers.

use crate::{NetworkError, NetworkErrorKind, ParseError, ParseErrorKind, Record};
use thiserror::Error;

/// What went wrong with a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The transport failed.
    Network(NetworkErrorKind),
    /// The response could not be read as a feature collection.
    Parse(ParseErrorKind),
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(kind) => write!(f, "network error ({kind})"),
            Self::Parse(kind) => write!(f, "parse error ({kind})"),
        }
    }
}

/// A classified, terminal fetch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct Failure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Human readable detail.
    pub message: String,
}

impl From<NetworkError> for Failure {
    fn from(err: NetworkError) -> Self {
        Self {
            kind: FailureKind::Network(err.kind),
            message: err.message,
        }
    }
}

impl From<ParseError> for Failure {
    fn from(err: ParseError) -> Self {
        let kind = FailureKind::Parse(err.kind());
        let message = match err {
            ParseError::Malformed(detail) => detail,
        };
        Self { kind, message }
    }
}

/// Terminal outcome of one fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Records in the order the service returned them. May be empty.
    Success(Vec<Record>),
    /// The fetch failed.
    Failure(Failure),
}

impl FetchResult {
    /// Returns true for the success arm.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the records of a successful fetch.
    #[must_use]
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            Self::Success(records) => Some(records),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure of an unsuccessful fetch.
    #[must_use]
    pub const fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}

impl From<Result<Vec<Record>, Failure>> for FetchResult {
    fn from(result: Result<Vec<Record>, Failure>) -> Self {
        match result {
            Ok(records) => Self::Success(records),
            Err(failure) => Self::Failure(failure),
        }
    }
}
