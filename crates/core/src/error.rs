//! Error types for data-access mocks
//!
//! Every verification failure, sequencing violation and counter overflow
//! surfaces as a variant of [`Error`]. The `Display` output of the
//! verification variants is the exact message callers match on in tests,
//! so the wording here is part of the public contract.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::ordinal::ordinalize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for mock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error injected into a mock to simulate a failing data-access call
///
/// The error is shared, not cloned: when a mock returns it, the caller
/// receives the same allocation that was handed to the mock, which tests
/// can check with [`InjectedError::same_as`].
#[derive(Clone)]
pub struct InjectedError(Arc<dyn std::error::Error + Send + Sync + 'static>);

impl InjectedError {
    /// Wrap an error so it can be injected into a mock
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Wrap an already shared error without re-allocating it
    pub fn from_arc(error: Arc<dyn std::error::Error + Send + Sync + 'static>) -> Self {
        Self(error)
    }

    /// Access the shared error
    pub fn as_arc(&self) -> &Arc<dyn std::error::Error + Send + Sync + 'static> {
        &self.0
    }

    /// Check whether both handles point to the same error instance
    pub fn same_as(&self, other: &InjectedError) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for InjectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InjectedError").field(&self.0).finish()
    }
}

impl fmt::Display for InjectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for InjectedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

/// Error types for data-access mocks
#[derive(Debug, Error)]
pub enum Error {
    /// A call counter would exceed `u32::MAX`
    #[error("Arithmetic operation resulted in an overflow of the {counter} counter.")]
    Overflow {
        /// Name of the counter that overflowed, e.g. `DisposeCallCount`
        counter: &'static str,
    },

    /// A verification did not hold
    ///
    /// The payload is the complete, final message.
    #[error("{0}")]
    VerificationFailed(String),

    /// A transaction was started while the previous one was still open
    #[error(
        "The {} transaction was not disposed before the {} transaction was started.",
        ordinalize(.index + 1),
        ordinalize(.index + 2)
    )]
    SequencingViolation {
        /// Zero-based index of the transaction that was left open
        index: usize,
    },

    /// A sequence verification ran before any transaction existed
    #[error("No transactions were started.")]
    NoTransactionsStarted,

    /// An argument passed to a verification was rejected
    #[error("Invalid argument `{parameter}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Why the argument was rejected
        reason: &'static str,
    },

    /// A selective verification referenced a transaction that does not exist
    #[error("There is no transaction that corresponds to index {index}.")]
    IndexOutOfRange {
        /// The requested index
        index: usize,
    },

    /// Mock configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error injected by the test, returned unchanged
    #[error(transparent)]
    Injected(InjectedError),
}

impl Error {
    /// Create a verification failure from a complete message
    pub fn verification(message: impl Into<String>) -> Self {
        Error::VerificationFailed(message.into())
    }

    /// Whether this error reports a failed expectation
    ///
    /// Sequencing violations and missing transactions are specialized
    /// verification failures and are included.
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            Error::VerificationFailed(_)
                | Error::SequencingViolation { .. }
                | Error::NoTransactionsStarted
        )
    }

    /// Whether this error is a counter overflow
    pub fn is_overflow(&self) -> bool {
        matches!(self, Error::Overflow { .. })
    }

    /// Name of the rejected parameter, for `InvalidArgument`
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Error::InvalidArgument { parameter, .. } => Some(*parameter),
            _ => None,
        }
    }

    /// Offending transaction index, for `IndexOutOfRange` and `SequencingViolation`
    pub fn index(&self) -> Option<usize> {
        match self {
            Error::IndexOutOfRange { index } | Error::SequencingViolation { index } => {
                Some(*index)
            }
            _ => None,
        }
    }

    /// The injected error, if this is one
    pub fn injected(&self) -> Option<&InjectedError> {
        match self {
            Error::Injected(e) => Some(e),
            _ => None,
        }
    }
}

impl From<InjectedError> for Error {
    fn from(e: InjectedError) -> Self {
        Error::Injected(e)
    }
}
