//! Ordered rule collections with case-insensitive lookup.

use std::{
    borrow::Cow,
    collections::HashMap,
    sync::{Arc, LazyLock},
};

use super::masking_rule::{MaskingRule, RuleType, ValueKind};

static SHARED_DEFAULT: LazyLock<Arc<MaskingRuleRegistry>> =
    LazyLock::new(|| Arc::new(MaskingRuleRegistry::create_default()));

/// An immutable, ordered set of [`MaskingRule`]s.
///
/// Lookups are case-insensitive (ASCII only, locale independent). When two
/// rules claim the same field name, the one added first wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskingRuleRegistry {
    rules: Vec<MaskingRule>,
    // lower-cased field name -> index into `rules`
    by_field: HashMap<String, usize>,
}

impl MaskingRuleRegistry {
    /// Creates a registry from rules in priority order.
    pub fn from_rules(rules: impl IntoIterator<Item = MaskingRule>) -> Self {
        let rules: Vec<MaskingRule> = rules.into_iter().collect();
        let mut by_field = HashMap::new();
        for (index, rule) in rules.iter().enumerate() {
            for field_name in rule.field_names() {
                by_field.entry(field_name.to_owned()).or_insert(index);
            }
        }
        Self { rules, by_field }
    }

    /// Creates a registry seeded with the built-in credential and PII rules.
    pub fn create_default() -> Self {
        Self::from_rules(default_rules())
    }

    /// Returns the process-wide default registry.
    ///
    /// Built once on first use and shared by every default configuration.
    pub fn shared_default() -> Arc<Self> {
        Arc::clone(&SHARED_DEFAULT)
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Finds the first rule matching `field_name`, ignoring ASCII case.
    pub fn find_rule(&self, field_name: &str) -> Option<&MaskingRule> {
        let key = if field_name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(field_name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(field_name)
        };
        self.by_field.get(key.as_ref()).map(|&index| &self.rules[index])
    }

    pub fn is_sensitive(&self, field_name: &str) -> bool {
        self.find_rule(field_name).is_some()
    }

    /// All rules in priority order.
    pub fn rules(&self) -> &[MaskingRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for composing custom rules with or without the defaults.
///
/// ```
/// use logmask::{MaskingRule, MaskingRuleRegistry};
///
/// let registry = MaskingRuleRegistry::builder()
///     .add_rule(MaskingRule::builder("session").field_name("sid").build().unwrap())
///     .add_default_rules()
///     .build();
///
/// assert!(registry.is_sensitive("SID"));
/// assert!(registry.is_sensitive("password"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RegistryBuilder {
    rules: Vec<MaskingRule>,
}

impl RegistryBuilder {
    #[must_use]
    pub fn add_rule(mut self, rule: MaskingRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn add_rules(mut self, rules: impl IntoIterator<Item = MaskingRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Appends the built-in rules after anything added so far.
    #[must_use]
    pub fn add_default_rules(mut self) -> Self {
        self.rules.extend(default_rules());
        self
    }

    pub fn build(self) -> MaskingRuleRegistry {
        MaskingRuleRegistry::from_rules(self.rules)
    }
}

fn default_rules() -> Vec<MaskingRule> {
    vec![
        MaskingRule::builder("phone")
            .field_names(["phone", "mobile", "tel", "telephone"])
            .rule_type(RuleType::Partial)
            .kind(ValueKind::Phone)
            .keep_prefix(3)
            .keep_suffix(4)
            .min_length(7)
            .build_unchecked(),
        MaskingRule::builder("idcard")
            .field_names(["idcard", "id_card", "identity", "identity_no", "idnumber"])
            .rule_type(RuleType::Partial)
            .kind(ValueKind::IdCard)
            .keep_prefix(6)
            .keep_suffix(4)
            .min_length(10)
            .build_unchecked(),
        MaskingRule::builder("email")
            .field_names(["email", "mail"])
            .rule_type(RuleType::Partial)
            .kind(ValueKind::Email)
            .keep_prefix(2)
            .keep_suffix(1)
            .min_length(3)
            .build_unchecked(),
        MaskingRule::builder("token")
            .field_names([
                "password",
                "token",
                "secret",
                "apikey",
                "api_key",
                "authorization",
                "credential",
                "x-api-key",
                "api-key",
                "x-auth-token",
                "cookie",
                "set-cookie",
                "access_token",
                "accessToken",
                "refresh_token",
                "refreshToken",
                "bearer_token",
                "bearerToken",
                "session_token",
                "sessionToken",
            ])
            .rule_type(RuleType::Full)
            .kind(ValueKind::Token)
            .build_unchecked(),
    ]
}
