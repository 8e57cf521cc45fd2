//! Operator-facing masking settings.
//!
//! [`MaskingSettings`] is the serializable form of a [`MaskingConfig`], suitable
//! for a service's configuration file:
//!
//! ```json
//! {
//!   "enabled": true,
//!   "max_body_length": 1000,
//!   "include_defaults": true,
//!   "rules": [
//!     { "name": "session", "fields": ["sid", "x-session"] },
//!     { "name": "card", "fields": ["card_no"], "type": "partial",
//!       "kind": "generic", "keep_suffix": 4, "mask_char": "#" }
//!   ]
//! }
//! ```
//!
//! Custom rules take priority over the built-in ones.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    context::{DEFAULT_MAX_BODY_LENGTH, MaskingConfig},
    error::ConfigError,
    rule::{MASK_CHAR, MaskingRule, MaskingRuleRegistry, RuleType, ValueKind},
};

/// Serializable description of one [`MaskingRule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,

    #[serde(default)]
    pub fields: Vec<String>,

    #[serde(rename = "type", default)]
    pub rule_type: RuleType,

    #[serde(default)]
    pub kind: ValueKind,

    #[serde(default)]
    pub keep_prefix: usize,

    #[serde(default)]
    pub keep_suffix: usize,

    #[serde(default = "default_mask_char")]
    pub mask_char: char,

    #[serde(default)]
    pub min_length: usize,
}

impl RuleSpec {
    pub fn to_rule(&self) -> Result<MaskingRule, crate::error::RuleError> {
        MaskingRule::builder(self.name.clone())
            .field_names(&self.fields)
            .rule_type(self.rule_type)
            .kind(self.kind)
            .keep_prefix(self.keep_prefix)
            .keep_suffix(self.keep_suffix)
            .mask_char(self.mask_char)
            .min_length(self.min_length)
            .build()
    }
}

/// Serializable masking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskingSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Output cap in characters. Zero or negative disables truncation.
    #[serde(
        default = "default_max_body_length",
        deserialize_with = "deserialize_body_length"
    )]
    pub max_body_length: usize,

    /// Append the built-in rules after the custom ones.
    #[serde(default = "default_true")]
    pub include_defaults: bool,

    #[serde(default)]
    pub rules: Vec<RuleSpec>,
}

impl Default for MaskingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
            include_defaults: true,
            rules: Vec::new(),
        }
    }
}

impl MaskingSettings {
    /// Parses settings from a JSON document.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates every rule and builds the runtime configuration.
    pub fn into_config(self) -> Result<MaskingConfig, ConfigError> {
        let registry = if self.rules.is_empty() && self.include_defaults {
            MaskingRuleRegistry::shared_default()
        } else {
            let mut builder = MaskingRuleRegistry::builder();
            for (index, rule_spec) in self.rules.iter().enumerate() {
                let rule = rule_spec.to_rule().map_err(|source| ConfigError::InvalidRule {
                    index,
                    name: rule_spec.name.clone(),
                    source,
                })?;
                builder = builder.add_rule(rule);
            }
            if self.include_defaults {
                builder = builder.add_default_rules();
            }
            builder.build().into()
        };

        Ok(MaskingConfig::builder()
            .enabled(self.enabled)
            .max_body_length(self.max_body_length)
            .registry(registry)
            .build())
    }
}

fn default_true() -> bool {
    true
}

fn default_max_body_length() -> usize {
    DEFAULT_MAX_BODY_LENGTH
}

fn default_mask_char() -> char {
    MASK_CHAR
}

fn deserialize_body_length<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(usize::try_from(raw.max(0)).unwrap_or(usize::MAX))
}
