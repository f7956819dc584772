//! Error types for HireGuard Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Rule '{rule}' expects {expected} input")]
    RuleInputMismatch {
        rule: &'static str,
        expected: &'static str,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
