//! Error types for the shell.

use thiserror::Error;
use todo_shell_runtime::StoreError;

/// Errors raised while configuring or mounting the shell
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// A media query string could not be parsed
    #[error("Invalid media query {query:?}: {reason}")]
    InvalidMediaQuery {
        /// The offending query
        query: String,
        /// What was wrong with it
        reason: String,
    },

    /// A theme name other than `light` or `dark`
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// A configuration value failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The store rejected an action
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl ShellError {
    pub(crate) fn media_query(query: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMediaQuery {
            query: query.to_string(),
            reason: reason.into(),
        }
    }
}
