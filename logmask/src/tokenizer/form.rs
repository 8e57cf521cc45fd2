//! URL-encoded form masking (`key=value&key=value`).
//!
//! Pairs are split on `&` and each pair at its first `=`. Keys are matched
//! as-is (no percent-decoding). Pairs with a non-sensitive key, or no `=` at
//! all, are copied verbatim; pair order and `&` separators are always kept.
//!
//! For a sensitive key, the value is the text between the first and second
//! `=`. Anything after a second `=` in that pair is dropped from the output.

use crate::{buffer::MaskingBuffer, rule::MaskingRuleRegistry};

/// Body contains `=` and does not look like JSON.
pub fn supports(body: &str) -> bool {
    let trimmed = body.trim_start();
    body.contains('=') && !trimmed.starts_with('{') && !trimmed.starts_with('[')
}

pub fn mask(body: &str, registry: &MaskingRuleRegistry, buffer: &mut MaskingBuffer) -> String {
    let out = buffer.acquire();

    for (index, pair) in body.split('&').enumerate() {
        if index > 0 {
            out.push('&');
        }
        let sensitive = pair
            .split_once('=')
            .and_then(|(key, rest)| registry.find_rule(key).map(|rule| (key, rest, rule)));
        match sensitive {
            Some((key, rest, rule)) => {
                let value = rest.split_once('=').map_or(rest, |(value, _)| value);
                out.push_str(key).push('=').push_str(&rule.apply(value));
            }
            None => {
                out.push_str(pair);
            }
        }
    }

    out.to_output()
}
