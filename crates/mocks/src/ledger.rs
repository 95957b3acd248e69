//! Transaction ledger
//!
//! The ledger records every transaction a session mock starts, in the order
//! they were started, and answers questions about the whole sequence. It is
//! the shared engine behind [`TransactionalSessionMock`] and
//! [`AsyncTransactionalSessionMock`].
//!
//! # Slots
//!
//! Each started transaction occupies one slot. The slot index is its
//! identity in failure messages, reported 1-based ("the 3rd transaction").
//! Slots are only ever appended.
//!
//! Per slot:
//! - `Open` → `Closed` once disposed
//! - commit sub-state as described by [`CommitState`]
//!
//! # Failure reporting
//!
//! Every check stops at the first violation and reports it. Nothing is
//! aggregated.
//!
//! [`TransactionalSessionMock`]: crate::TransactionalSessionMock
//! [`AsyncTransactionalSessionMock`]: crate::AsyncTransactionalSessionMock

use crate::config::TransactionalSessionConfig;
use crate::tracking::Committable;
use crate::transaction::CommitState;
use datamocks_core::{ordinalize, Error, Result};

/// Ordered record of started transactions
#[derive(Debug, Clone)]
pub struct TransactionLedger<T> {
    transactions: Vec<T>,
    require_sequential_closure: bool,
}

impl<T: Committable> TransactionLedger<T> {
    /// Create an empty ledger
    pub fn new(require_sequential_closure: bool) -> Self {
        Self {
            transactions: Vec::new(),
            require_sequential_closure,
        }
    }

    /// Create an empty ledger from a session configuration
    pub fn from_config(config: &TransactionalSessionConfig) -> Self {
        Self::new(config.require_sequential_closure)
    }

    /// Whether a transaction must be disposed before the next one starts
    pub fn requires_sequential_closure(&self) -> bool {
        self.require_sequential_closure
    }

    /// All started transactions, oldest first
    pub fn transactions(&self) -> &[T] {
        &self.transactions
    }

    /// Number of started transactions
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transaction was started
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Start a new transaction and return it
    ///
    /// # Errors
    ///
    /// Returns [`Error::SequencingViolation`] if sequential closure is
    /// required and the previous transaction was not disposed. No slot is
    /// added in that case.
    pub fn begin(&mut self) -> Result<&mut T> {
        self.ensure_previous_is_closed()?;

        let index = self.transactions.len();
        self.transactions.push(T::default());
        tracing::debug!(
            target: "datamocks::transactional",
            index,
            "Started {} transaction",
            ordinalize(index + 1)
        );
        Ok(&mut self.transactions[index])
    }

    /// Check that every transaction was committed exactly once
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransactionsStarted`] for an empty ledger, or
    /// [`Error::VerificationFailed`] for the first slot not committed once.
    pub fn verify_all_committed(&self) -> Result<()> {
        self.verify_committed_before(self.transactions.len())
    }

    /// Check that every transaction but the last was committed exactly once
    /// and the last one was rolled back
    ///
    /// # Errors
    ///
    /// Same as [`verify_all_committed`](Self::verify_all_committed), plus a
    /// rollback failure when the last transaction was committed.
    pub fn verify_all_except_last_committed(&self) -> Result<()> {
        self.ensure_started()?;
        let last = self.transactions.len() - 1;
        self.verify_committed_before(last)?;
        self.check_rolled_back(last)
    }

    /// Check that the transactions at `indexes` were committed exactly once
    ///
    /// Indexes are checked in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty `indexes`,
    /// [`Error::NoTransactionsStarted`] for an empty ledger,
    /// [`Error::IndexOutOfRange`] for an unknown index, or
    /// [`Error::VerificationFailed`] for the first slot not committed once.
    pub fn verify_committed_at(&self, indexes: &[usize]) -> Result<()> {
        ensure_indexes_not_empty(indexes)?;
        self.ensure_started()?;

        for &index in indexes {
            self.check_index(index)?;
            self.check_committed(index)?;
        }
        Ok(())
    }

    /// Check that no transaction was committed
    ///
    /// Disposal is not required for a transaction to count as rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoTransactionsStarted`] for an empty ledger, or
    /// [`Error::VerificationFailed`] for the first committed slot.
    pub fn verify_all_rolled_back(&self) -> Result<()> {
        self.ensure_started()?;
        (0..self.transactions.len()).try_for_each(|i| self.check_rolled_back(i))
    }

    /// Check that the transactions at `indexes` were not committed
    ///
    /// # Errors
    ///
    /// Same argument and range errors as
    /// [`verify_committed_at`](Self::verify_committed_at), or
    /// [`Error::VerificationFailed`] for the first committed slot.
    pub fn verify_rolled_back_at(&self, indexes: &[usize]) -> Result<()> {
        ensure_indexes_not_empty(indexes)?;
        self.ensure_started()?;

        for &index in indexes {
            self.check_index(index)?;
            self.check_rolled_back(index)?;
        }
        Ok(())
    }

    /// Check that every transaction was disposed
    ///
    /// An empty ledger passes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VerificationFailed`] for the first open slot.
    pub fn verify_all_disposed(&self) -> Result<()> {
        match self
            .transactions
            .iter()
            .position(|t| t.dispose_call_count() == 0)
        {
            Some(i) => Err(Error::verification(format!(
                "The {} transaction was not disposed.",
                ordinalize(i + 1)
            ))),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Slot checks
    // ========================================================================

    fn ensure_previous_is_closed(&self) -> Result<()> {
        if !self.require_sequential_closure {
            return Ok(());
        }

        let Some(last) = self.transactions.last() else {
            return Ok(());
        };
        if last.dispose_call_count() == 0 {
            let index = self.transactions.len() - 1;
            tracing::warn!(
                target: "datamocks::transactional",
                index,
                "Transaction started while the previous one is still open"
            );
            return Err(Error::SequencingViolation { index });
        }
        Ok(())
    }

    fn ensure_started(&self) -> Result<()> {
        if self.transactions.is_empty() {
            return Err(Error::NoTransactionsStarted);
        }
        Ok(())
    }

    fn verify_committed_before(&self, upper_limit: usize) -> Result<()> {
        self.ensure_started()?;
        (0..upper_limit).try_for_each(|i| self.check_committed(i))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.transactions.len() {
            return Err(Error::IndexOutOfRange { index });
        }
        Ok(())
    }

    fn check_committed(&self, index: usize) -> Result<()> {
        match self.transactions[index].commit_state() {
            CommitState::CommittedOnce => Ok(()),
            CommitState::NotCommitted => Err(Error::verification(format!(
                "The {} transaction was not committed.",
                ordinalize(index + 1)
            ))),
            CommitState::CommittedMultiple { count } => Err(Error::verification(format!(
                "The {} transaction was committed too often ({} times).",
                ordinalize(index + 1),
                count
            ))),
        }
    }

    fn check_rolled_back(&self, index: usize) -> Result<()> {
        if self.transactions[index].commit_call_count() != 0 {
            return Err(Error::verification(format!(
                "The {} transaction was committed, although it should be rolled back.",
                ordinalize(index + 1)
            )));
        }
        Ok(())
    }
}

fn ensure_indexes_not_empty(indexes: &[usize]) -> Result<()> {
    if indexes.is_empty() {
        return Err(Error::InvalidArgument {
            parameter: "indexes",
            reason: "at least one transaction index must be specified",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionMock;
    use datamocks_core::{Disposable, Transaction};

    fn ledger_with(commits: &[u32]) -> TransactionLedger<TransactionMock> {
        let mut ledger: TransactionLedger<TransactionMock> = TransactionLedger::new(true);
        for &count in commits {
            let transaction = ledger.begin().unwrap();
            for _ in 0..count {
                transaction.commit().unwrap();
            }
            transaction.dispose().unwrap();
        }
        ledger
    }

    #[test]
    fn test_begin_appends_in_order() {
        let ledger = ledger_with(&[1, 0, 2]);
        assert_eq!(ledger.len(), 3);
        let counts: Vec<u32> = ledger
            .transactions()
            .iter()
            .map(|t| t.commit_call_count())
            .collect();
        assert_eq!(counts, vec![1, 0, 2]);
    }

    #[test]
    fn test_sequencing_violation_adds_no_slot() {
        let mut ledger: TransactionLedger<TransactionMock> = TransactionLedger::new(true);
        ledger.begin().unwrap();
        let err = ledger.begin().unwrap_err();
        assert!(matches!(err, Error::SequencingViolation { index: 0 }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_without_sequential_closure_open_transactions_are_allowed() {
        let mut ledger: TransactionLedger<TransactionMock> = TransactionLedger::new(false);
        for _ in 0..3 {
            ledger.begin().unwrap();
        }
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_empty_ledger() {
        let ledger: TransactionLedger<TransactionMock> = TransactionLedger::new(true);
        assert!(ledger.is_empty());
        assert!(matches!(
            ledger.verify_all_committed(),
            Err(Error::NoTransactionsStarted)
        ));
        assert!(matches!(
            ledger.verify_all_except_last_committed(),
            Err(Error::NoTransactionsStarted)
        ));
        assert!(matches!(
            ledger.verify_all_rolled_back(),
            Err(Error::NoTransactionsStarted)
        ));
        assert!(ledger.verify_all_disposed().is_ok());
    }

    #[test]
    fn test_argument_check_precedes_started_check() {
        let ledger: TransactionLedger<TransactionMock> = TransactionLedger::new(true);
        let err = ledger.verify_committed_at(&[]).unwrap_err();
        assert_eq!(err.parameter(), Some("indexes"));
        let err = ledger.verify_committed_at(&[0]).unwrap_err();
        assert!(matches!(err, Error::NoTransactionsStarted));
    }

    #[test]
    fn test_single_rolled_back_transaction_passes_except_last() {
        let ledger = ledger_with(&[0]);
        assert!(ledger.verify_all_except_last_committed().is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let ledger = ledger_with(&[0, 3, 0]);
        let err = ledger.verify_all_committed().unwrap_err();
        assert_eq!(err.to_string(), "The 1st transaction was not committed.");

        let err = ledger.verify_committed_at(&[1, 0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "The 2nd transaction was committed too often (3 times)."
        );
    }

    #[test]
    fn test_index_out_of_range_reports_index() {
        let ledger = ledger_with(&[1, 1]);
        let err = ledger.verify_committed_at(&[0, 2]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 2 }));
        let err = ledger.verify_rolled_back_at(&[5]).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 5 }));
    }

    #[test]
    fn test_rollback_does_not_require_disposal() {
        let mut ledger: TransactionLedger<TransactionMock> = TransactionLedger::new(false);
        ledger.begin().unwrap();
        ledger.begin().unwrap();
        assert!(ledger.verify_all_rolled_back().is_ok());
        assert!(ledger.verify_rolled_back_at(&[1]).is_ok());
    }
}
