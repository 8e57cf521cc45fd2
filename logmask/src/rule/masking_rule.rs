//! Immutable masking rules bound to a set of field names.

use std::collections::BTreeSet;

use super::strategy::{EmailConfig, KeepConfig, MASK_CHAR, MaskStrategy};
use crate::error::RuleError;

/// Whether a rule hides the whole value or reveals part of it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RuleType {
    /// Replace the value with a constant marker (e.g. `"***MASKED***"`).
    #[default]
    Full,
    /// Keep a bounded prefix/suffix visible (e.g. `"138****5678"`).
    Partial,
}

/// Semantic shape of a value, selecting the partial masking algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ValueKind {
    #[default]
    Generic,
    Phone,
    Email,
    IdCard,
    /// Opaque credential. Always fully masked, even for [`RuleType::Partial`].
    Token,
}

/// A redaction strategy bound to a set of case-insensitive field names.
///
/// Rules are validated on construction and immutable afterwards, so they can
/// be shared freely across threads.
///
/// ```
/// use logmask::{MaskingRule, RuleType, ValueKind};
///
/// let rule = MaskingRule::builder("phone")
///     .field_names(["phone", "Mobile"])
///     .rule_type(RuleType::Partial)
///     .kind(ValueKind::Phone)
///     .keep_prefix(3)
///     .keep_suffix(4)
///     .build()
///     .unwrap();
///
/// assert!(rule.matches_field("MOBILE"));
/// assert_eq!(rule.apply("13812345678"), "138****5678");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskingRule {
    name: String,
    field_names: BTreeSet<String>,
    rule_type: RuleType,
    kind: ValueKind,
    keep_prefix: usize,
    keep_suffix: usize,
    mask_char: char,
    min_length: usize,
    strategy: MaskStrategy,
}

impl MaskingRule {
    /// Starts building a rule called `name`.
    pub fn builder(name: impl Into<String>) -> RuleBuilder {
        RuleBuilder::new(name)
    }

    /// Masks `value` according to this rule.
    ///
    /// Empty values are returned as-is.
    #[must_use]
    pub fn apply(&self, value: &str) -> String {
        self.strategy.apply_to(value)
    }

    /// Case-insensitive membership test against this rule's field names.
    pub fn matches_field(&self, field_name: &str) -> bool {
        self.field_names
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(field_name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased field names this rule applies to.
    pub fn field_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.field_names.iter().map(String::as_str)
    }

    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn keep_prefix(&self) -> usize {
        self.keep_prefix
    }

    pub fn keep_suffix(&self) -> usize {
        self.keep_suffix
    }

    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// The concrete strategy this rule resolved to.
    pub fn strategy(&self) -> MaskStrategy {
        self.strategy
    }
}

/// Builder for [`MaskingRule`].
///
/// Defaults: [`RuleType::Full`], [`ValueKind::Generic`], nothing kept visible,
/// `'*'` as mask character, no minimum length.
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    name: String,
    field_names: BTreeSet<String>,
    rule_type: RuleType,
    kind: ValueKind,
    keep_prefix: usize,
    keep_suffix: usize,
    mask_char: char,
    min_length: usize,
}

impl RuleBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_names: BTreeSet::new(),
            rule_type: RuleType::Full,
            kind: ValueKind::Generic,
            keep_prefix: 0,
            keep_suffix: 0,
            mask_char: MASK_CHAR,
            min_length: 0,
        }
    }

    /// Adds a single field name. Empty names are ignored.
    #[must_use]
    pub fn field_name(mut self, field_name: impl AsRef<str>) -> Self {
        let field_name = field_name.as_ref();
        if !field_name.is_empty() {
            self.field_names.insert(field_name.to_ascii_lowercase());
        }
        self
    }

    /// Adds several field names. Empty names are ignored.
    #[must_use]
    pub fn field_names<I, S>(self, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        field_names
            .into_iter()
            .fold(self, |builder, field_name| builder.field_name(field_name))
    }

    #[must_use]
    pub fn rule_type(mut self, rule_type: RuleType) -> Self {
        self.rule_type = rule_type;
        self
    }

    #[must_use]
    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn keep_prefix(mut self, keep_prefix: usize) -> Self {
        self.keep_prefix = keep_prefix;
        self
    }

    #[must_use]
    pub fn keep_suffix(mut self, keep_suffix: usize) -> Self {
        self.keep_suffix = keep_suffix;
        self
    }

    #[must_use]
    pub fn mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    #[must_use]
    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Validates the builder and produces an immutable rule.
    pub fn build(self) -> Result<MaskingRule, RuleError> {
        if self.name.is_empty() {
            return Err(RuleError::EmptyName);
        }
        if self.field_names.is_empty() {
            return Err(RuleError::NoFieldNames);
        }
        Ok(self.build_unchecked())
    }

    /// Builds without validation. Only for rule sets known to be well formed.
    pub(crate) fn build_unchecked(self) -> MaskingRule {
        let strategy = match (self.rule_type, self.kind) {
            (RuleType::Full, _) | (RuleType::Partial, ValueKind::Token) => MaskStrategy::Full,
            (RuleType::Partial, ValueKind::Email) => MaskStrategy::Email(
                EmailConfig::new(self.keep_prefix, self.keep_suffix)
                    .with_mask_char(self.mask_char)
                    .with_min_length(self.min_length),
            ),
            (RuleType::Partial, ValueKind::Generic | ValueKind::Phone | ValueKind::IdCard) => {
                MaskStrategy::Keep(
                    KeepConfig::both(self.keep_prefix, self.keep_suffix)
                        .with_mask_char(self.mask_char)
                        .with_min_length(self.min_length),
                )
            }
        };

        MaskingRule {
            name: self.name,
            field_names: self.field_names,
            rule_type: self.rule_type,
            kind: self.kind,
            keep_prefix: self.keep_prefix,
            keep_suffix: self.keep_suffix,
            mask_char: self.mask_char,
            min_length: self.min_length,
            strategy,
        }
    }
}
