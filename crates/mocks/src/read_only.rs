//! Read-only session mocks
//!
//! Read-only sessions never save, so their mocks only track disposal.

use crate::disposable::DisposalCounter;
use crate::tracking::DisposeTracking;
use datamocks_core::{AsyncDisposable, AsyncReadOnlySession, Disposable, ReadOnlySession, Result};
use std::borrow::Cow;
use std::future::{self, Future};

/// A mock for a synchronous read-only session
#[derive(Debug, Clone)]
pub struct ReadOnlySessionMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
}

impl ReadOnlySessionMock {
    /// Create a mock named `ReadOnlySessionMock`
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("ReadOnlySessionMock"),
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

impl Default for ReadOnlySessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for ReadOnlySessionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl ReadOnlySession for ReadOnlySessionMock {}

impl DisposeTracking for ReadOnlySessionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }
}

/// A mock for an asynchronous read-only session
///
/// `dispose` and `dispose_async` share one counter.
#[derive(Debug, Clone)]
pub struct AsyncReadOnlySessionMock {
    name: Cow<'static, str>,
    disposal: DisposalCounter,
}

impl AsyncReadOnlySessionMock {
    /// Create a mock named `AsyncReadOnlySessionMock`
    pub fn new() -> Self {
        Self {
            name: Cow::Borrowed("AsyncReadOnlySessionMock"),
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

impl Default for AsyncReadOnlySessionMock {
    fn default() -> Self {
        Self::new()
    }
}

impl Disposable for AsyncReadOnlySessionMock {
    fn dispose(&mut self) -> Result<()> {
        self.disposal.dispose()
    }
}

impl AsyncDisposable for AsyncReadOnlySessionMock {
    fn dispose_async(&mut self) -> impl Future<Output = Result<()>> {
        future::ready(self.disposal.dispose())
    }
}

impl AsyncReadOnlySession for AsyncReadOnlySessionMock {}

impl DisposeTracking for AsyncReadOnlySessionMock {
    fn dispose_call_count(&self) -> u32 {
        self.disposal.count()
    }

    fn mock_name(&self) -> &str {
        &self.name
    }
}
