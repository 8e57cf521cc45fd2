//! Error types for rule construction and configuration loading.
//!
//! Masking itself never fails: every masking entrypoint is total and falls
//! back to the input on trouble. Errors only surface while rules and
//! configurations are being built, before anything is observable.

use thiserror::Error;

/// Validation failures raised while building a [`MaskingRule`](crate::MaskingRule).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// The rule was given an empty name.
    #[error("rule name is required")]
    EmptyName,

    /// The rule has no field names to match against.
    #[error("at least one field name is required")]
    NoFieldNames,
}

/// Failures while turning operator settings into a [`MaskingConfig`](crate::MaskingConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured rule failed validation.
    #[error("rule #{index} ({name:?}) is invalid: {source}")]
    InvalidRule {
        index: usize,
        name: String,
        #[source]
        source: RuleError,
    },

    /// The settings document could not be parsed.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
