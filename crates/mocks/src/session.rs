//! Session mocks
//!
//! [`SessionMock`] implements [`Session`], [`AsyncSessionMock`] implements
//! [`AsyncSession`]. Both count save calls and can be told to fail them
//! with an injected error. Sessions are disposable, synchronously and
//! asynchronously.

use crate::disposable::DisposalCounter;
use crate::tracking::{DisposeTracking, SaveTracking};
use datamocks_core::{
    AsyncDisposable, AsyncSession, CallCount, Disposable, Error, InjectedError, Result, Session,
};
use std::borrow::Cow;
use std::future::{self, Future};

/// Counter name reported on overflow
const SAVE_CHANGES_CALL_COUNT: &str = "SaveChangesCallCount";

/// Counts calls to a named save operation
///
/// Each call is counted before the injected error, if any, is returned, so
/// the count also reflects failed calls.
#[derive(Debug, Clone)]
pub struct SaveCounter {
    operation: &'static str,
    count: CallCount,
    error: Option<InjectedError>,
}

impl SaveCounter {
    /// Create a counter for `operation` (e.g. `"SaveChanges"`)
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            count: CallCount::ZERO,
            error: None,
        }
    }

    /// Record a save call
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the count is already `u32::MAX`,
    /// otherwise the injected error if one is set.
    pub fn record(&mut self) -> Result<()> {
        self.count.increment(SAVE_CHANGES_CALL_COUNT)?;
        if let Some(error) = &self.error {
            tracing::debug!(
                target: "datamocks::session",
                operation = self.operation,
                call = self.count.get(),
                "Returning injected error"
            );
            return Err(Error::Injected(error.clone()));
        }
        Ok(())
    }

    /// Name of the save operation
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Number of recorded save calls
    pub fn count(&self) -> u32 {
        self.count.get()
    }

    /// Overwrite the recorded count
    pub fn set_count(&mut self, count: u32) {
        self.count = CallCount::new(count);
    }

    /// Error returned by subsequent save calls
    pub fn error(&self) -> Option<&InjectedError> {
        self.error.as_ref()
    }

    /// Make subsequent save calls fail with `error`
    pub fn set_error(&mut self, error: Option<InjectedError>) {
        self.error = error;
    }
}

/// A mock for a synchronous session
#[derive(Debug, Clone)]
pub struct SessionMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
    saves: SaveCounter,
}

impl SessionMock {
    /// Create a mock named `SessionMock` tracking `SaveChanges`
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("SessionMock"),
            disposal: DisposalCounter::new(),
            saves: SaveCounter::new("SaveChanges"),
        }
    }

    /// Use `name` in failure messages
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every `save_changes` call fail with `error`
    pub fn with_error_on_save_changes(mut self, error: InjectedError) -> Self {
        self.saves.set_error(Some(error));
        self
    }

    /// Make subsequent `save_changes` calls fail with `error`
    pub fn set_error_on_save_changes(&mut self, error: InjectedError) {
        self.saves.set_error(Some(error));
    }

    /// Let subsequent `save_changes` calls succeed again
    pub fn clear_error_on_save_changes(&mut self) {
        self.saves.set_error(None);
    }

    /// Error returned by `save_changes`, if any
    pub fn error_on_save_changes(&self) -> Option<&InjectedError> {
        self.saves.error()
    }

    /// Overwrite the save call count
    pub fn set_save_changes_call_count(&mut self, count: u32) {
        self.saves.set_count(count);
    }

    /// Overwrite the dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Default for SessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for SessionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for SessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl Session for SessionMock {
    fn save_changes(&mut self) -> Result<()> {
        self.saves.record()
    }
}

impl DisposeTracking for SessionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }
}

impl SaveTracking for SessionMock {
    fn save_changes_call_count(&self) -> u32 {
        self.saves.count()
    }

    fn save_changes_operation(&self) -> &str {
        self.saves.operation()
    }
}

/// A mock for an asynchronous session
#[derive(Debug, Clone)]
pub struct AsyncSessionMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
    saves: SaveCounter,
}

impl AsyncSessionMock {
    /// Create a mock named `AsyncSessionMock` tracking `SaveChangesAsync`
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("AsyncSessionMock"),
            disposal: DisposalCounter::new(),
            saves: SaveCounter::new("SaveChangesAsync"),
        }
    }

    /// Use `name` in failure messages
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Make every `save_changes_async` call fail with `error`
    pub fn with_error_on_save_changes(mut self, error: InjectedError) -> Self {
        self.saves.set_error(Some(error));
        self
    }

    /// Make subsequent `save_changes_async` calls fail with `error`
    pub fn set_error_on_save_changes(&mut self, error: InjectedError) {
        self.saves.set_error(Some(error));
    }

    /// Let subsequent `save_changes_async` calls succeed again
    pub fn clear_error_on_save_changes(&mut self) {
        self.saves.set_error(None);
    }

    /// Error returned by `save_changes_async`, if any
    pub fn error_on_save_changes(&self) -> Option<&InjectedError> {
        self.saves.error()
    }

    /// Overwrite the save call count
    pub fn set_save_changes_call_count(&mut self, count: u32) {
        self.saves.set_count(count);
    }

    /// Overwrite the dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Default for AsyncSessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for AsyncSessionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for AsyncSessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl AsyncSession for AsyncSessionMock {
    fn save_changes_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.saves.record())
    }
}

impl DisposeTracking for AsyncSessionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }
}

impl SaveTracking for AsyncSessionMock {
    fn save_changes_call_count(&self) -> u32 {
        self.saves.count()
    }

    fn save_changes_operation(&self) -> &str {
        self.saves.operation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn injected(message: &str) -> InjectedError {
        InjectedError::new(io::Error::new(io::ErrorKind::Other, message.to_string()))
    }

    #[test]
    fn test_counter_counts_before_failing() {
        let mut counter = SaveCounter::new("SaveChanges");
        let error = injected("database unavailable");
        counter.set_error(Some(error.clone()));

        let err = counter.record().unwrap_err();
        assert_eq!(counter.count(), 1);
        assert!(err.injected().unwrap().same_as(&error));
    }

    #[test]
    fn test_counter_overflow_skips_injected_error() {
        let mut counter = SaveCounter::new("SaveChanges");
        counter.set_error(Some(injected("never returned")));
        counter.set_count(u32::MAX);

        let err = counter.record().unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn test_session_operation_names() {
        assert_eq!(SessionMock::new().save_changes_operation(), "SaveChanges");
        assert_eq!(
            AsyncSessionMock::new().save_changes_operation(),
            "SaveChangesAsync"
        );
    }

    #[test]
    fn test_clear_error_restores_success() {
        let mut session = SessionMock::new().with_error_on_save_changes(injected("boom"));
        assert!(session.save_changes().is_err());

        session.clear_error_on_save_changes();
        assert!(session.error_on_save_changes().is_none());
        session.save_changes().unwrap();
        assert_eq!(session.save_changes_call_count(), 2);
    }
}
