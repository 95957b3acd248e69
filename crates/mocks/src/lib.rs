//! Call-counting mocks for data-access abstractions
//!
//! This crate provides test doubles for the traits in `datamocks-core`:
//! - DisposableMock / AsyncDisposableMock: disposal tracking only
//! - TransactionMock / AsyncTransactionMock: commit and disposal tracking
//! - SessionMock / AsyncSessionMock: save tracking with error injection
//! - ReadOnlySessionMock / AsyncReadOnlySessionMock: read-only sessions
//! - TransactionalSessionMock / AsyncTransactionalSessionMock: ordered
//!   transaction recording with sequencing and commit/rollback verification
//! - AsyncFactoryMock: create-call tracking
//!
//! Import [`prelude`] to bring the abstractions and the verification traits
//! into scope.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod disposable;
pub mod factory;
pub mod ledger;
pub mod read_only;
pub mod session;
pub mod tracking;
pub mod transaction;
pub mod transactional;

pub use config::TransactionalSessionConfig;
pub use disposable::{ensure_disposed, AsyncDisposableMock, DisposableMock, DisposalCounter};
pub use factory::AsyncFactoryMock;
pub use ledger::TransactionLedger;
pub use read_only::{AsyncReadOnlySessionMock, ReadOnlySessionMock};
pub use session::{AsyncSessionMock, SaveCounter, SessionMock};
pub use tracking::{Committable, DisposeTracking, SaveTracking};
pub use transaction::{AsyncTransactionMock, CommitState, TransactionMock};
pub use transactional::{
    AsyncTransactionalSessionMock, TransactionTracking, TransactionalSessionMock,
};

// Re-export the core types so consumers only need this crate
pub use datamocks_core::{ordinalize, CallCount, Error, InjectedError, Result};

/// Traits needed to drive and verify the mocks
pub mod prelude {
    pub use crate::tracking::{Committable, DisposeTracking, SaveTracking};
    pub use crate::transactional::TransactionTracking;
    pub use datamocks_core::traits::{
        AsyncDisposable, AsyncFactory, AsyncReadOnlySession, AsyncSession, AsyncTransaction,
        AsyncTransactionalSession, Disposable, ReadOnlySession, Session, Transaction,
        TransactionalSession,
    };
}
