//! Core types and traits for DataMocks
//!
//! This crate defines the foundations shared by all mocks:
//! - Error: Error taxonomy (overflow, verification failures, argument errors)
//! - CallCount: Checked call counter and "called once" / "never called" checks
//! - ordinal: 1-based English ordinals used in failure messages
//! - Traits: Data-access abstractions (sessions, transactions, factories)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counter;
pub mod error;
pub mod ordinal;
pub mod traits;

pub use counter::{ensure_called_exactly_once, ensure_never_called, CallCount};
pub use error::{Error, InjectedError, Result};
pub use ordinal::ordinalize;
pub use traits::{
    AsyncDisposable, AsyncFactory, AsyncReadOnlySession, AsyncSession, AsyncTransaction,
    AsyncTransactionalSession, Disposable, ReadOnlySession, Session, Transaction,
    TransactionalSession,
};
