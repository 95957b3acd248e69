//! DataMocks - call-counting test doubles for data-access abstractions
//!
//! Code that talks to a database through sessions and transactions can be
//! unit tested without one: hand it a mock, run it, then verify how the
//! mock was used.
//!
//! # Quick Start
//!
//! ```
//! use datamocks::prelude::*;
//! use datamocks::TransactionalSessionMock;
//!
//! fn transfer<S: TransactionalSession>(session: &mut S) -> datamocks::Result<()> {
//!     let transaction = session.begin_transaction()?;
//!     transaction.commit()?;
//!     transaction.dispose()?;
//!     session.dispose()
//! }
//!
//! # fn main() -> datamocks::Result<()> {
//! let mut session = TransactionalSessionMock::new();
//! transfer(&mut session)?;
//!
//! session
//!     .all_transactions_must_be_committed()?
//!     .must_be_disposed()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! The abstractions and the error type live in `datamocks-core`, the mocks
//! in `datamocks-mocks`. This crate re-exports both.

pub use datamocks_mocks::*;

/// Data-access abstractions implemented by the mocks
pub use datamocks_core::traits;
