//! Call counting
//!
//! [`CallCount`] is the value type behind every counter a mock keeps.
//! Increments are checked: a counter never wraps, it fails with
//! [`Error::Overflow`] instead.

use crate::error::{Error, Result};
use std::fmt;

/// Number of times a mocked operation was invoked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CallCount(u32);

impl CallCount {
    /// A counter that has not seen any call
    pub const ZERO: CallCount = CallCount(0);

    /// The largest representable count
    pub const MAX: CallCount = CallCount(u32::MAX);

    /// Create a counter starting at `count`
    pub const fn new(count: u32) -> Self {
        CallCount(count)
    }

    /// Current value
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether no call was recorded
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Record one more call
    ///
    /// # Errors
    ///
    /// Returns [`Error::Overflow`] naming `counter` if the count is already
    /// at [`CallCount::MAX`]. The count is left unchanged in that case.
    pub fn increment(&mut self, counter: &'static str) -> Result<()> {
        self.0 = self.0.checked_add(1).ok_or(Error::Overflow { counter })?;
        Ok(())
    }
}

impl From<u32> for CallCount {
    fn from(count: u32) -> Self {
        CallCount(count)
    }
}

impl fmt::Display for CallCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Verify that `operation` ran exactly once
///
/// # Errors
///
/// Returns [`Error::VerificationFailed`] distinguishing "never called" from
/// "called N times".
pub fn ensure_called_exactly_once(operation: &str, count: CallCount) -> Result<()> {
    match count.get() {
        1 => Ok(()),
        0 => Err(Error::verification(format!(
            "{} must have been called exactly once, but it was actually never called.",
            operation
        ))),
        n => Err(Error::verification(format!(
            "{} must have been called exactly once, but it was actually called {} times.",
            operation, n
        ))),
    }
}

/// Verify that `operation` never ran
///
/// # Errors
///
/// Returns [`Error::VerificationFailed`] with the number of calls.
pub fn ensure_never_called(operation: &str, count: CallCount) -> Result<()> {
    match count.get() {
        0 => Ok(()),
        n => Err(Error::verification(format!(
            "{} must not have been called, but it was actually called {} {}.",
            operation,
            n,
            if n == 1 { "time" } else { "times" }
        ))),
    }
}
