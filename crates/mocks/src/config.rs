//! Transactional session mock configuration
//!
//! The configuration is fixed when a session mock is created. It can be
//! built in code or parsed from TOML, which lets a test suite keep shared
//! fixture settings next to its other test data.

use datamocks_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration of a transactional session mock
///
/// # Example
///
/// ```toml
/// # Fail when a transaction is started while the previous one is still open
/// require_sequential_closure = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionalSessionConfig {
    /// Whether the previous transaction must be disposed before the next one
    /// is started. Defaults to `true`.
    ///
    /// Turning it off allows starting a transaction while the previous one
    /// was never disposed. It does not allow holding two handles at once:
    /// each handle borrows the session until it is dropped.
    #[serde(default = "default_require_sequential_closure")]
    pub require_sequential_closure: bool,
}

fn default_require_sequential_closure() -> bool {
    true
}

impl Default for TransactionalSessionConfig {
    fn default() -> Self {
        Self {
            require_sequential_closure: default_require_sequential_closure(),
        }
    }
}

impl TransactionalSessionConfig {
    /// Configuration with an explicit sequential closure setting
    pub fn with_sequential_closure(require_sequential_closure: bool) -> Self {
        Self {
            require_sequential_closure,
        }
    }

    /// Parse a configuration from TOML
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the text is not valid TOML or
    /// contains unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Returns the default configuration as commented TOML
    pub fn default_toml() -> &'static str {
        r#"# Transactional session mock configuration
#
# Fail when a transaction is started while the previous one was not
# disposed (default: true). Disable for code that keeps several
# transactions open at once.
require_sequential_closure = true
"#
    }
}
