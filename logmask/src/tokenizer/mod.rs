//! Body scanners that rewrite sensitive field values in place.
//!
//! Each format pairs a cheap admission check (`supports`) with a single-pass
//! rewrite (`mask`). Formats are tried in the fixed order of
//! [`BodyFormat::PRIORITY`]; a body no format admits is left untouched by the
//! engine.
//!
//! Both scanners are total: malformed input produces a best-effort
//! reconstruction, never an error.

pub mod form;
pub mod json;

use crate::{buffer::MaskingBuffer, rule::MaskingRuleRegistry};

/// A body shape the engine knows how to scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyFormat {
    /// JSON object or array.
    Json,
    /// `application/x-www-form-urlencoded` style `key=value&key=value`.
    Form,
}

impl BodyFormat {
    /// Formats in the order they are offered a body.
    pub const PRIORITY: [BodyFormat; 2] = [BodyFormat::Json, BodyFormat::Form];

    /// Returns the first format that admits `body`, if any.
    pub fn detect(body: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|format| format.supports(body))
    }

    /// Shape check only; does not validate the body.
    pub fn supports(self, body: &str) -> bool {
        match self {
            BodyFormat::Json => json::supports(body),
            BodyFormat::Form => form::supports(body),
        }
    }

    /// Rewrites `body`, masking values of fields the registry marks sensitive.
    pub fn mask(
        self,
        body: &str,
        registry: &MaskingRuleRegistry,
        buffer: &mut MaskingBuffer,
    ) -> String {
        match self {
            BodyFormat::Json => json::mask(body, registry, buffer),
            BodyFormat::Form => form::mask(body, registry, buffer),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyFormat::Json => "json",
            BodyFormat::Form => "form",
        }
    }
}

impl std::fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::BodyFormat;

    #[test]
    fn json_takes_priority_over_form() {
        // contains '=' but is shaped like JSON
        assert_eq!(
            BodyFormat::detect(r#"{"query":"a=b"}"#),
            Some(BodyFormat::Json)
        );
        assert_eq!(BodyFormat::detect("a=b&c=d"), Some(BodyFormat::Form));
    }

    #[test]
    fn unknown_shapes_are_not_claimed() {
        assert_eq!(BodyFormat::detect("plain text body"), None);
        assert_eq!(BodyFormat::detect("<xml>value</xml>"), None);
        assert_eq!(BodyFormat::detect(""), None);
    }

    #[test]
    fn bracketed_body_without_matching_close_is_not_form() {
        // JSON declines (no closing brace) and form defers '{' bodies to JSON
        assert_eq!(BodyFormat::detect("{a=b"), None);
    }
}
