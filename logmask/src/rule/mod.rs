//! Masking rules: value strategies, field-bound rules, and registries.
//!
//! This module provides:
//!
//! - **Strategies** (`strategy`): [`MaskStrategy`] and its configuration types
//!   (`KeepConfig`, `EmailConfig`), pure string transformations.
//!
//! - **Rules** (`masking_rule`): [`MaskingRule`] binds a strategy to a set of
//!   case-insensitive field names.
//!
//! - **Registries** (`registry`): [`MaskingRuleRegistry`] holds rules in
//!   priority order and answers "is this field sensitive?".
//!
//! # Example
//!
//! ```rust
//! use logmask::{MaskingRuleRegistry, MASKED_PLACEHOLDER};
//!
//! let registry = MaskingRuleRegistry::create_default();
//! let rule = registry.find_rule("Password").unwrap();
//! assert_eq!(rule.apply("hunter2"), MASKED_PLACEHOLDER);
//! ```

pub mod masking_rule;
pub mod registry;
pub mod strategy;

pub use masking_rule::{MaskingRule, RuleBuilder, RuleType, ValueKind};
pub use registry::{MaskingRuleRegistry, RegistryBuilder};
pub use strategy::{EmailConfig, KeepConfig, MASK_CHAR, MASKED_PLACEHOLDER, MaskStrategy};
