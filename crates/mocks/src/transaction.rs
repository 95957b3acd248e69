//! Transaction mocks
//!
//! [`TransactionMock`] implements [`Transaction`] and [`AsyncTransactionMock`]
//! implements [`AsyncTransaction`]. Both count commits and disposals; a
//! transaction that was disposed without being committed counts as rolled
//! back.

use crate::disposable::DisposalCounter;
use crate::tracking::{Committable, DisposeTracking};
use datamocks_core::{
    AsyncDisposable, AsyncTransaction, CallCount, Disposable, Result, Transaction,
};
use std::future::{self, Future};

/// Counter name reported on overflow
const COMMIT_CALL_COUNT: &str = "CommitCallCount";

/// Commit sub-state of a transaction
///
/// Transitions only move forward:
/// - `NotCommitted` → `CommittedOnce` (first commit)
/// - `CommittedOnce` → `CommittedMultiple` (second commit)
///
/// `CommittedMultiple` is terminal; further commits only raise the count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    /// No commit was recorded (rolled back once disposed)
    NotCommitted,
    /// Exactly one commit was recorded
    CommittedOnce,
    /// More than one commit was recorded
    CommittedMultiple {
        /// Number of commits
        count: u32,
    },
}

impl CommitState {
    /// Derive the state from a commit count
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => CommitState::NotCommitted,
            1 => CommitState::CommittedOnce,
            count => CommitState::CommittedMultiple { count },
        }
    }
}

/// A mock for a synchronous transaction
#[derive(Debug, Clone, Default)]
pub struct TransactionMock {
    disposal: DisposalCounter,
    commits: CallCount,
}

impl TransactionMock {
    /// Create a transaction that was neither committed nor disposed
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the commit call count
    pub fn set_commit_call_count(&mut self, count: u32) {
        self.commits = CallCount::new(count);
    }

    /// Overwrite the dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Disposable for TransactionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl Transaction for TransactionMock {
    fn commit(&mut self) -> Result<()> {
        self.commits.increment(COMMIT_CALL_COUNT)
    }
}

impl DisposeTracking for TransactionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        "TransactionMock"
    }
}

impl Committable for TransactionMock {
    const COMMIT_OPERATION: &'static str = "Commit";

    fn commit_call_count(&self) -> u32 {
        self.commits.get()
    }
}

/// A mock for an asynchronous transaction
///
/// `commit_async` and `dispose_async` record the call immediately; the
/// returned futures are already complete.
#[derive(Debug, Clone, Default)]
pub struct AsyncTransactionMock {
    disposal: DisposalCounter,
    commits: CallCount,
}

impl AsyncTransactionMock {
    /// Create a transaction that was neither committed nor disposed
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the commit call count
    pub fn set_commit_call_count(&mut self, count: u32) {
        self.commits = CallCount::new(count);
    }

    /// Overwrite the dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Disposable for AsyncTransactionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for AsyncTransactionMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl AsyncTransaction for AsyncTransactionMock {
    fn commit_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.commits.increment(COMMIT_CALL_COUNT))
    }
}

impl DisposeTracking for AsyncTransactionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        "AsyncTransactionMock"
    }
}

impl Committable for AsyncTransactionMock {
    const COMMIT_OPERATION: &'static str = "CommitAsync";

    fn commit_call_count(&self) -> u32 {
        self.commits.get()
    }
}
