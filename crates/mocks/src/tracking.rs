//! Capability traits for call-tracking mocks
//!
//! Each trait exposes one tracked capability together with the fluent
//! verifications built on it. Verifications return `Result<&Self>` so that
//! several checks can be chained with `?`:
//!
//! ```
//! use datamocks_mocks::prelude::*;
//! use datamocks_mocks::SessionMock;
//!
//! # fn main() -> datamocks_mocks::Result<()> {
//! let mut session = SessionMock::new();
//! session.save_changes()?;
//! session.dispose()?;
//!
//! session
//!     .save_changes_must_have_been_called()?
//!     .must_be_disposed()?;
//! # Ok(())
//! # }
//! ```

use crate::disposable::ensure_disposed;
use crate::transaction::CommitState;
use datamocks_core::{ensure_called_exactly_once, ensure_never_called, CallCount, Error, Result};

/// A mock that counts how often it was disposed
pub trait DisposeTracking {
    /// Number of calls to `dispose` or `dispose_async`
    fn dispose_call_count(&self) -> u32;

    /// Name used for this mock in failure messages
    fn mock_name(&self) -> &str;

    /// Check that the mock was disposed at least once
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] with `"<name>" was not disposed.`
    fn must_be_disposed(&self) -> Result<&Self> {
        ensure_disposed(self.mock_name(), self.dispose_call_count())?;
        Ok(self)
    }
}

/// A transaction mock that counts commits
///
/// Transactional session mocks create their transactions through
/// `Default`, one per started transaction.
pub trait Committable: DisposeTracking + Default {
    /// Name of the commit operation as it appears in messages
    const COMMIT_OPERATION: &'static str;

    /// Number of calls to the commit operation
    fn commit_call_count(&self) -> u32;

    /// Commit sub-state derived from the commit count
    fn commit_state(&self) -> CommitState {
        CommitState::from_count(self.commit_call_count())
    }

    /// Check that the transaction was committed exactly once
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] with the actual number of commits.
    fn must_be_committed(&self) -> Result<&Self> {
        let count = self.commit_call_count();
        if count != 1 {
            return Err(Error::verification(format!(
                "{} must have been called exactly once, but it was called {} times.",
                Self::COMMIT_OPERATION,
                count
            )));
        }
        Ok(self)
    }
}

/// A session mock that counts calls to its save operation
pub trait SaveTracking {
    /// Number of calls to the save operation
    fn save_changes_call_count(&self) -> u32;

    /// Name of the save operation as it appears in messages
    fn save_changes_operation(&self) -> &str;

    /// Check that the save operation ran exactly once
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] when it never ran or ran more
    /// than once.
    fn save_changes_must_have_been_called(&self) -> Result<&Self> {
        ensure_called_exactly_once(
            self.save_changes_operation(),
            CallCount::new(self.save_changes_call_count()),
        )?;
        Ok(self)
    }

    /// Check that the save operation never ran
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] with the number of calls.
    fn save_changes_must_not_have_been_called(&self) -> Result<&Self> {
        ensure_never_called(
            self.save_changes_operation(),
            CallCount::new(self.save_changes_call_count()),
        )?;
        Ok(self)
    }
}
