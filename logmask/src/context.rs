//! Configuration and per-call context for masking.

use std::sync::Arc;

use crate::rule::MaskingRuleRegistry;

/// Default cap on logged body length, in characters.
pub const DEFAULT_MAX_BODY_LENGTH: usize = 1000;

/// Appended to bodies cut at the configured maximum length.
pub const TRUNCATION_SUFFIX: &str = "... (truncated)";

/// Masking settings: on/off switch, output length cap, and active rules.
///
/// `max_body_length == 0` disables truncation.
#[derive(Clone, Debug)]
pub struct MaskingConfig {
    enabled: bool,
    max_body_length: usize,
    registry: Arc<MaskingRuleRegistry>,
}

impl MaskingConfig {
    /// Enabled, 1000-character cap, built-in rules.
    pub fn create_default() -> Self {
        Self {
            enabled: true,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
            registry: MaskingRuleRegistry::shared_default(),
        }
    }

    pub fn builder() -> MaskingConfigBuilder {
        MaskingConfigBuilder {
            config: Self::create_default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn max_body_length(&self) -> usize {
        self.max_body_length
    }

    pub fn registry(&self) -> &Arc<MaskingRuleRegistry> {
        &self.registry
    }
}

impl Default for MaskingConfig {
    fn default() -> Self {
        Self::create_default()
    }
}

/// Builder for [`MaskingConfig`], starting from the defaults.
#[derive(Clone, Debug)]
pub struct MaskingConfigBuilder {
    config: MaskingConfig,
}

impl MaskingConfigBuilder {
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Caps the masked output at `max_body_length` characters; `0` disables the cap.
    #[must_use]
    pub fn max_body_length(mut self, max_body_length: usize) -> Self {
        self.config.max_body_length = max_body_length;
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: impl Into<Arc<MaskingRuleRegistry>>) -> Self {
        self.config.registry = registry.into();
        self
    }

    pub fn build(self) -> MaskingConfig {
        self.config
    }
}

/// Binds a [`MaskingConfig`] to masking invocations.
///
/// Cloning is cheap: the registry is shared, so many contexts can reuse one
/// set of rules.
#[derive(Clone, Debug, Default)]
pub struct MaskingContext {
    config: MaskingConfig,
}

impl MaskingContext {
    pub fn new(config: MaskingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MaskingConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn max_body_length(&self) -> usize {
        self.config.max_body_length
    }

    pub fn registry(&self) -> &MaskingRuleRegistry {
        &self.config.registry
    }
}

impl From<MaskingConfig> for MaskingContext {
    fn from(config: MaskingConfig) -> Self {
        Self::new(config)
    }
}
