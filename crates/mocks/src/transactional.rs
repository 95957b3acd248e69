//! Transactional session mocks
//!
//! [`TransactionalSessionMock`] implements [`TransactionalSession`] and
//! [`AsyncTransactionalSessionMock`] implements [`AsyncTransactionalSession`].
//! Every started transaction is recorded in a [`TransactionLedger`]; the
//! verifications of [`TransactionTracking`] inspect the recorded sequence.
//!
//! # Example
//!
//! ```
//! use datamocks_mocks::prelude::*;
//! use datamocks_mocks::TransactionalSessionMock;
//!
//! # fn main() -> datamocks_mocks::Result<()> {
//! let mut session = TransactionalSessionMock::new();
//!
//! let first = session.begin_transaction()?;
//! first.commit()?;
//! first.dispose()?;
//!
//! let second = session.begin_transaction()?;
//! second.dispose()?;
//!
//! session.dispose()?;
//! session
//!     .all_transactions_except_last_must_be_committed()?
//!     .must_be_disposed()?;
//! # Ok(())
//! # }
//! ```

use crate::config::TransactionalSessionConfig;
use crate::disposable::{ensure_disposed, DisposalCounter};
use crate::ledger::TransactionLedger;
use crate::tracking::{Committable, DisposeTracking};
use crate::transaction::{AsyncTransactionMock, TransactionMock};
use datamocks_core::{
    AsyncDisposable, AsyncTransactionalSession, Disposable, Result, TransactionalSession,
};
use std::borrow::Cow;
use std::future::{self, Future};

/// A session mock that records the transactions it starts
///
/// All verifications return the mock itself on success so they can be
/// chained.
pub trait TransactionTracking: DisposeTracking {
    /// Transaction mock type recorded by the ledger
    type TransactionMock: Committable;

    /// The recorded transactions
    fn ledger(&self) -> &TransactionLedger<Self::TransactionMock>;

    /// All started transactions, oldest first
    fn transactions(&self) -> &[Self::TransactionMock] {
        self.ledger().transactions()
    }

    /// Check that at least one transaction was started and every
    /// transaction was committed exactly once
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransactionsStarted`](datamocks_core::Error::NoTransactionsStarted)
    /// or a verification failure naming the first offending transaction.
    fn all_transactions_must_be_committed(&self) -> Result<&Self> {
        self.ledger().verify_all_committed()?;
        Ok(self)
    }

    /// Check that every transaction but the last was committed exactly
    /// once and the last one was rolled back
    ///
    /// # Errors
    ///
    /// Returns a verification failure naming the first offending transaction.
    fn all_transactions_except_last_must_be_committed(&self) -> Result<&Self> {
        self.ledger().verify_all_except_last_committed()?;
        Ok(self)
    }

    /// Check that the transactions at `indexes` were committed exactly once
    ///
    /// # Errors
    ///
    /// Returns an argument error for an empty `indexes`, an out-of-range
    /// error for an unknown index, or a verification failure.
    fn transactions_with_indexes_must_be_committed(&self, indexes: &[usize]) -> Result<&Self> {
        self.ledger().verify_committed_at(indexes)?;
        Ok(self)
    }

    /// Check that at least one transaction was started and none was committed
    ///
    /// # Errors
    ///
    /// Returns a verification failure naming the first committed transaction.
    fn all_transactions_must_be_rolled_back(&self) -> Result<&Self> {
        self.ledger().verify_all_rolled_back()?;
        Ok(self)
    }

    /// Check that the transactions at `indexes` were not committed
    ///
    /// # Errors
    ///
    /// Returns an argument error for an empty `indexes`, an out-of-range
    /// error for an unknown index, or a verification failure.
    fn transactions_with_indexes_must_be_rolled_back(&self, indexes: &[usize]) -> Result<&Self> {
        self.ledger().verify_rolled_back_at(indexes)?;
        Ok(self)
    }
}

// ============================================================================
// Synchronous session
// ============================================================================

/// A mock for a synchronous transactional session
#[derive(Debug, Clone)]
pub struct TransactionalSessionMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
    ledger: TransactionLedger<TransactionMock>,
}

impl TransactionalSessionMock {
    /// Create a mock that requires sequential closure
    pub fn new() -> Self {
        Self::with_config(TransactionalSessionConfig::default())
    }

    /// Create a mock with an explicit sequential closure setting
    ///
    /// With `false`, a transaction may be started while the previous one was
    /// never disposed. The returned handles still borrow the session, so only
    /// one of them is usable at a time.
    pub fn with_sequential_closure(require_sequential_closure: bool) -> Self {
        Self::with_config(TransactionalSessionConfig::with_sequential_closure(
            require_sequential_closure,
        ))
    }

    /// Create a mock from a configuration
    pub fn with_config(config: TransactionalSessionConfig) -> Self {
        Self {
            name: Cow::Borrowed("TransactionalSessionMock"),
            disposal: DisposalCounter::new(),
            ledger: TransactionLedger::from_config(&config),
        }
    }

    /// Use `name` in failure messages
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether a transaction must be disposed before the next one starts
    pub fn requires_sequential_closure(&self) -> bool {
        self.ledger.requires_sequential_closure()
    }

    /// Overwrite the session's own dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Default for TransactionalSessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for TransactionalSessionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for TransactionalSessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl TransactionalSession for TransactionalSessionMock {
    type Transaction = TransactionMock;

    fn begin_transaction(&mut self) -> Result<&mut TransactionMock> {
        self.ledger.begin()
    }
}

impl DisposeTracking for TransactionalSessionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }

    /// Check that every started transaction and the session itself were disposed
    fn must_be_disposed(&self) -> Result<&Self> {
        self.ledger.verify_all_disposed()?;
        ensure_disposed(&self.name, self.disposal.count())?;
        Ok(self)
    }
}

impl TransactionTracking for TransactionalSessionMock {
    type TransactionMock = TransactionMock;

    fn ledger(&self) -> &TransactionLedger<TransactionMock> {
        &self.ledger
    }
}

// ============================================================================
// Asynchronous session
// ============================================================================

/// A mock for an asynchronous transactional session
///
/// `begin_transaction_async` performs the sequencing check and records the
/// transaction immediately; the returned future is already complete.
#[derive(Debug, Clone)]
pub struct AsyncTransactionalSessionMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
    ledger: TransactionLedger<AsyncTransactionMock>,
}

impl AsyncTransactionalSessionMock {
    /// Create a mock that requires sequential closure
    pub fn new() -> Self {
        Self::with_config(TransactionalSessionConfig::default())
    }

    /// Create a mock with an explicit sequential closure setting
    ///
    /// With `false`, a transaction may be started while the previous one was
    /// never disposed. The returned handles still borrow the session, so only
    /// one of them is usable at a time.
    pub fn with_sequential_closure(require_sequential_closure: bool) -> Self {
        Self::with_config(TransactionalSessionConfig::with_sequential_closure(
            require_sequential_closure,
        ))
    }

    /// Create a mock from a configuration
    pub fn with_config(config: TransactionalSessionConfig) -> Self {
        Self {
            name: Cow::Borrowed("AsyncTransactionalSessionMock"),
            disposal: DisposalCounter::new(),
            ledger: TransactionLedger::from_config(&config),
        }
    }

    /// Use `name` in failure messages
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether a transaction must be disposed before the next one starts
    pub fn requires_sequential_closure(&self) -> bool {
        self.ledger.requires_sequential_closure()
    }

    /// Overwrite the session's own dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Default for AsyncTransactionalSessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for AsyncTransactionalSessionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for AsyncTransactionalSessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl AsyncTransactionalSession for AsyncTransactionalSessionMock {
    type Transaction = AsyncTransactionMock;

    fn begin_transaction_async(
        &mut self,
    ) -> impl Future<Output = Result<&mut AsyncTransactionMock>> {
        future::ready(self.ledger.begin())
    }
}

impl DisposeTracking for AsyncTransactionalSessionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }

    /// Check that every started transaction and the session itself were disposed
    fn must_be_disposed(&self) -> Result<&Self> {
        self.ledger.verify_all_disposed()?;
        ensure_disposed(&self.name, self.disposal.count())?;
        Ok(self)
    }
}

impl TransactionTracking for AsyncTransactionalSessionMock {
    type TransactionMock = AsyncTransactionMock;

    fn ledger(&self) -> &TransactionLedger<AsyncTransactionMock> {
        &self.ledger
    }
}
