//! Errors raised at the application boundary

use thiserror::Error;

/// Errors from configuring or driving the shell.
///
/// The motion core itself never fails; these cover what a user can get wrong
/// from the outside.
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("unknown page `{0}` (expected home, profile, tools, roadmap or contacts)")]
    UnknownPage(String),
}

impl DriftError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DriftError>;
