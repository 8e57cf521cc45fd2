//! Value masking strategies for sensitive strings.
//!
//! This module provides [`MaskStrategy`] and its configuration types. Strategies
//! are pure string transformations: they know nothing about field names,
//! registries, or body formats.

/// Marker emitted in place of a fully masked value.
pub const MASKED_PLACEHOLDER: &str = "***MASKED***";

/// Default character used to mask hidden characters.
pub const MASK_CHAR: char = '*';

/// Configuration that keeps a prefix and a suffix visible and masks the middle.
///
/// Lengths are counted in Unicode scalar values. Values that are too short to
/// reveal anything safely (shorter than `min_length`, or shorter than
/// `visible_prefix + visible_suffix`) collapse to [`MASKED_PLACEHOLDER`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeepConfig {
    /// Number of leading characters to keep visible.
    visible_prefix: usize,
    /// Number of trailing characters to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask the middle.
    mask_char: char,
    /// Values shorter than this are fully masked.
    min_length: usize,
}

impl KeepConfig {
    /// Keeps `visible_prefix` leading and `visible_suffix` trailing characters.
    #[must_use]
    pub fn both(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: MASK_CHAR,
            min_length: 0,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Fully masks values shorter than `min_length`.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> String {
        let mut chars: Vec<char> = value.chars().collect();
        let total = chars.len();
        if total < self.min_length || total < self.visible_prefix.saturating_add(self.visible_suffix)
        {
            return MASKED_PLACEHOLDER.to_string();
        }

        for ch in &mut chars[self.visible_prefix..(total - self.visible_suffix)] {
            *ch = self.mask_char;
        }
        chars.into_iter().collect()
    }
}

/// Configuration for email address masking.
///
/// Masks the middle of the local part (before the first `@`) and preserves the
/// domain verbatim. A local part too short to reveal anything is masked in
/// full, but the domain is still kept for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmailConfig {
    /// Number of leading characters of the local part to keep visible.
    visible_prefix: usize,
    /// Number of trailing characters of the local part to keep visible.
    visible_suffix: usize,
    /// Symbol used to mask the local part.
    mask_char: char,
    /// Whole values shorter than this are fully masked.
    min_length: usize,
}

impl EmailConfig {
    /// Keeps `visible_prefix` leading and `visible_suffix` trailing characters
    /// of the local part.
    #[must_use]
    pub fn new(visible_prefix: usize, visible_suffix: usize) -> Self {
        Self {
            visible_prefix,
            visible_suffix,
            mask_char: MASK_CHAR,
            min_length: 0,
        }
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Fully masks values shorter than `min_length`.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> String {
        if value.chars().count() < self.min_length {
            return MASKED_PLACEHOLDER.to_string();
        }

        let Some(at_pos) = value.find('@').filter(|&pos| pos > 0) else {
            return MASKED_PLACEHOLDER.to_string();
        };
        let local = &value[..at_pos];
        let domain = &value[at_pos..]; // includes the @

        let local_chars: Vec<char> = local.chars().collect();
        let local_len = local_chars.len();
        let keep = self.visible_prefix.saturating_add(self.visible_suffix);

        let mut masked = String::with_capacity(value.len());
        if local_len <= keep {
            masked.extend(std::iter::repeat_n(self.mask_char, local_len));
        } else {
            masked.extend(&local_chars[..self.visible_prefix]);
            masked.extend(std::iter::repeat_n(self.mask_char, local_len - keep));
            masked.extend(&local_chars[(local_len - self.visible_suffix)..]);
        }
        masked.push_str(domain);
        masked
    }
}

/// A masking strategy for a single sensitive value.
///
/// Each variant carries only the parameters it needs. Empty input is never
/// masked by any variant: it carries no sensitive content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskStrategy {
    /// Replace the entire value with [`MASKED_PLACEHOLDER`].
    Full,
    /// Keep a prefix and suffix visible, mask the middle.
    Keep(KeepConfig),
    /// Email-specific: mask the local part, preserve the domain.
    Email(EmailConfig),
}

impl MaskStrategy {
    /// Applies the strategy to `value`.
    ///
    /// This method is total (it does not return errors).
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        match self {
            MaskStrategy::Full => MASKED_PLACEHOLDER.to_string(),
            MaskStrategy::Keep(config) => config.apply_to(value),
            MaskStrategy::Email(config) => config.apply_to(value),
        }
    }
}

impl std::default::Default for MaskStrategy {
    fn default() -> Self {
        Self::Full
    }
}
