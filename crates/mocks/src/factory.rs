//! Async factory mock

use datamocks_core::{
    ensure_called_exactly_once, ensure_never_called, AsyncFactory, CallCount, Result,
};
use std::future::{self, Future};

/// Operation name used in failure messages
const CREATE_OPERATION: &str = "CreateAsync";

/// A mock for [`AsyncFactory`] that hands out one stored instance
///
/// Every call to `create_async` resolves to the stored instance itself, so
/// whatever the code under test does with it can be verified afterwards
/// through [`instance`](Self::instance).
#[derive(Debug, Clone)]
pub struct AsyncFactoryMock<T> {
    instance: T,
    creates: CallCount,
}

impl<T> AsyncFactoryMock<T> {
    /// Create a factory that returns `instance`
    pub fn new(instance: T) -> Self {
        Self {
            instance,
            creates: CallCount::ZERO,
        }
    }

    /// The instance returned by `create_async`
    pub fn instance(&self) -> &T {
        &self.instance
    }

    /// Take back the stored instance
    pub fn into_instance(self) -> T {
        self.instance
    }

    /// Number of calls to `create_async`
    pub fn create_call_count(&self) -> u32 {
        self.creates.get()
    }

    /// Overwrite the create call count
    pub fn set_create_call_count(&mut self, count: u32) {
        self.creates = CallCount::new(count);
    }

    /// Check that `create_async` was called exactly once
    ///
    /// # Errors
    ///
    /// Returns a verification failure distinguishing "never called" from
    /// "called N times".
    pub fn create_must_have_been_called(&self) -> Result<&Self> {
        ensure_called_exactly_once(CREATE_OPERATION, self.creates)?;
        Ok(self)
    }

    /// Check that `create_async` was never called
    ///
    /// # Errors
    ///
    /// Returns a verification failure with the number of calls.
    pub fn create_must_not_have_been_called(&self) -> Result<&Self> {
        ensure_never_called(CREATE_OPERATION, self.creates)?;
        Ok(self)
    }
}

impl<T> AsyncFactory<T> for AsyncFactoryMock<T> {
    fn create_async<'a>(&'a mut self) -> impl Future<Output = Result<&'a mut T>>
    where
        T: 'a,
    {
        let created = match self.creates.increment("CreateCallCount") {
            Ok(()) => Ok(&mut self.instance),
            Err(e) => Err(e),
        };
        future::ready(created)
    }
}
