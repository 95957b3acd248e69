//! Disposal tracking
//!
//! [`DisposalCounter`] is the value type every mock embeds to count dispose
//! calls. [`DisposableMock`] and [`AsyncDisposableMock`] are ready-made mocks
//! for code that only needs a disposable dependency.

use crate::tracking::DisposeTracking;
use datamocks_core::{AsyncDisposable, CallCount, Disposable, Error, Result};
use std::borrow::Cow;
use std::future::{self, Future};

/// Counter name reported on overflow
pub(crate) const DISPOSE_CALL_COUNT: &str = "DisposeCallCount";

/// Check a dispose count, naming the mock in the failure message
///
/// # Errors
///
/// Returns [`Error::VerificationFailed`] with `"<name>" was not disposed.`
/// when `count` is zero.
pub fn ensure_disposed(name: &str, count: u32) -> Result<()> {
    if count < 1 {
        return Err(Error::verification(format!(
            "\"{}\" was not disposed.",
            name
        )));
    }
    Ok(())
}

/// Counts dispose calls
///
/// The count starts at zero, only grows and never wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisposalCounter {
    count: CallCount,
}

impl DisposalCounter {
    /// Create a counter with no recorded disposal
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter that already recorded `count` disposals
    pub fn starting_at(count: u32) -> Self {
        Self {
            count: CallCount::new(count),
        }
    }

    /// Record a dispose call
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] if the count is already `u32::MAX`.
    pub fn dispose(&mut self) -> Result<()> {
        self.count.increment(DISPOSE_CALL_COUNT)
    }

    /// Number of recorded dispose calls
    pub fn count(&self) -> u32 {
        self.count.get()
    }

    /// Whether at least one dispose call was recorded
    pub fn is_disposed(&self) -> bool {
        !self.count.is_zero()
    }

    /// Overwrite the recorded count
    pub fn set_count(&mut self, count: u32) {
        self.count = CallCount::new(count);
    }
}

/// A mock for a synchronously disposable dependency
#[derive(Debug, Clone)]
pub struct DisposableMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
}

impl DisposableMock {
    /// Create a mock named `DisposableMock`
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("DisposableMock"),
            disposal: DisposalCounter::new(),
        }
    }

    /// Use `name` in failure messages
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Overwrite the dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Default for DisposableMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for DisposableMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl DisposeTracking for DisposableMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }
}

/// A mock for a dependency that can be disposed synchronously or asynchronously
///
/// Both paths increment the same counter.
#[derive(Debug, Clone)]
pub struct AsyncDisposableMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
}

impl AsyncDisposableMock {
    /// Create a mock named `AsyncDisposableMock`
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("AsyncDisposableMock"),
            disposal: DisposalCounter::new(),
        }
    }

    /// Use `name` in failure messages
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Overwrite the dispose call count
    pub fn set_dispose_call_count(&mut self, count: u32) {
        self.disposal.set_count(count);
    }
}

impl Default for AsyncDisposableMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for AsyncDisposableMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for AsyncDisposableMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl DisposeTracking for AsyncDisposableMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let counter = DisposalCounter::new();
        assert_eq!(counter.count(), 0);
        assert!(!counter.is_disposed());
    }

    #[test]
    fn test_counter_counts_every_call() {
        let mut counter = DisposalCounter::new();
        for _ in 0..3 {
            counter.dispose().unwrap();
        }
        assert_eq!(counter.count(), 3);
        assert!(counter.is_disposed());
    }

    #[test]
    fn test_counter_overflow() {
        let mut counter = DisposalCounter::starting_at(u32::MAX);
        let err = counter.dispose().unwrap_err();
        assert!(matches!(
            err,
            Error::Overflow {
                counter: "DisposeCallCount"
            }
        ));
        assert_eq!(counter.count(), u32::MAX);
    }

    #[test]
    fn test_ensure_disposed_message() {
        assert!(ensure_disposed("Foo", 1).is_ok());
        let err = ensure_disposed("Foo", 0).unwrap_err();
        assert_eq!(err.to_string(), "\"Foo\" was not disposed.");
    }

    #[test]
    fn test_disposable_mock_must_be_disposed() {
        let mut mock = DisposableMock::new();
        let err = mock.must_be_disposed().unwrap_err();
        assert_eq!(err.to_string(), "\"DisposableMock\" was not disposed.");

        mock.dispose().unwrap();
        assert!(std::ptr::eq(mock.must_be_disposed().unwrap(), &mock));
    }

    #[test]
    fn test_disposing_twice_still_passes() {
        let mut mock = DisposableMock::new();
        mock.dispose().unwrap();
        mock.dispose().unwrap();
        assert_eq!(mock.dispose_call_count(), 2);
        assert!(mock.must_be_disposed().is_ok());
    }

    #[test]
    fn test_custom_name_appears_in_message() {
        let mock = AsyncDisposableMock::new().with_name("ConnectionPool");
        let err = mock.must_be_disposed().unwrap_err();
        assert_eq!(err.to_string(), "\"ConnectionPool\" was not disposed.");
    }
}
