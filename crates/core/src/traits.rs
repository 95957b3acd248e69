//! Data-access abstractions
//!
//! These traits describe the capabilities that application code depends on
//! instead of a concrete database client: sessions that save changes,
//! transactions that commit, read-only sessions and async factories. The
//! mocks in `datamocks-mocks` implement them, so code under test can be
//! written generically and exercised without a database.
//!
//! All fallible operations return [`Result`]. Async operations return
//! `impl Future`; implementations are free to complete immediately.

use crate::error::Result;
use std::future::Future;

/// A resource that must be released explicitly
pub trait Disposable {
    /// Release the resource
    ///
    /// # Errors
    ///
    /// Returns an error if releasing fails.
    fn dispose(&mut self) -> Result<()>;
}

/// A resource that is released asynchronously
pub trait AsyncDisposable {
    /// Release the resource
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>>;
}

/// A synchronous database transaction
///
/// A transaction that is disposed without a prior [`Transaction::commit`]
/// counts as rolled back.
pub trait Transaction: Disposable {
    /// Commit all changes made within the transaction
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    fn commit(&mut self) -> Result<()>;
}

/// An asynchronous database transaction
pub trait AsyncTransaction: AsyncDisposable {
    /// Commit all changes made within the transaction
    fn commit_async(&mut self) -> impl Future<Output = Result<()>>;
}

/// A session that tracks changes and saves them in one call
pub trait Session: Disposable {
    /// Persist all pending changes
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    fn save_changes(&mut self) -> Result<()>;
}

/// An asynchronous session that tracks changes and saves them in one call
pub trait AsyncSession: AsyncDisposable {
    /// Persist all pending changes
    fn save_changes_async(&mut self) -> impl Future<Output = Result<()>>;
}

/// A session that only reads data
pub trait ReadOnlySession: Disposable {}

/// An asynchronous session that only reads data
pub trait AsyncReadOnlySession: AsyncDisposable {}

/// A session whose changes are grouped into explicit transactions
pub trait TransactionalSession: Disposable {
    /// Transaction handle type
    type Transaction: Transaction;

    /// Start a new transaction
    ///
    /// The handle borrows the session, so at most one transaction is in use
    /// at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    fn begin_transaction(&mut self) -> Result<&mut Self::Transaction>;
}

/// An asynchronous session whose changes are grouped into explicit transactions
pub trait AsyncTransactionalSession: AsyncDisposable {
    /// Transaction handle type
    type Transaction: AsyncTransaction;

    /// Start a new transaction
    fn begin_transaction_async(&mut self)
        -> impl Future<Output = Result<&mut Self::Transaction>>;
}

/// Asynchronously provides an instance of `T`
///
/// The instance stays owned by the factory; callers borrow it for as long
/// as they use it.
pub trait AsyncFactory<T> {
    /// Create or look up the instance
    fn create_async<'a>(&'a mut self) -> impl Future<Output = Result<&'a mut T>>
    where
        T: 'a;
}
