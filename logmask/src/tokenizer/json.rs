//! Single-pass JSON field masking.
//!
//! The scanner never builds a tree. The only thing it tracks is the field name
//! governing the next value: a quoted token whose next significant character is
//! `:` is a field name, unless it directly follows a colon, in which case it is
//! always a value; the first value after that colon is governed by it. Any
//! structural character (`{`, `[`, `}`, `]`, `,`) drops the governing name, so
//! array elements and nested containers are never masked by a parent's name.
//!
//! Only string values are masked. Numbers, booleans and `null` are copied
//! verbatim, as is everything outside the quotes of a masked string.

use crate::{
    buffer::MaskingBuffer,
    rule::{MaskingRule, MaskingRuleRegistry},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Between tokens: inside an object or array, waiting for the next token.
    Structural,
    /// A field name was read; waiting for its colon.
    FieldName,
    /// Colon seen; the next value belongs to the current field.
    AfterColon,
    /// A value was copied; waiting for `,` or a closing bracket.
    AfterValue,
}

/// Trimmed body starts and ends with matching object or array delimiters.
pub fn supports(body: &str) -> bool {
    let trimmed = body.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Copies `body`, masking string values of sensitive fields.
///
/// Scanning stops at end of input. An unterminated string is copied as-is,
/// unless it is the value of a sensitive field, in which case its remainder is
/// masked.
pub fn mask(body: &str, registry: &MaskingRuleRegistry, buffer: &mut MaskingBuffer) -> String {
    let out = buffer.acquire();
    let bytes = body.as_bytes();
    let mut state = State::Structural;
    let mut field: Option<&str> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => {
                let start = i + 1;
                let Some(end) = find_string_end(bytes, start) else {
                    match governing_rule(state, field, registry) {
                        Some(rule) => {
                            out.push('"').push_str(&rule.apply(&body[start..]));
                        }
                        None => {
                            out.push_str(&body[i..]);
                        }
                    }
                    break;
                };

                if state != State::AfterColon && next_significant(body, end + 1) == Some(':') {
                    field = Some(&body[start..end]);
                    state = State::FieldName;
                    out.push_str(&body[i..=end]);
                } else {
                    match governing_rule(state, field, registry) {
                        Some(rule) => {
                            out.push('"')
                                .push_str(&rule.apply(&body[start..end]))
                                .push('"');
                        }
                        None => {
                            out.push_str(&body[i..=end]);
                        }
                    }
                    field = None;
                    state = State::AfterValue;
                }
                i = end + 1;
            }
            b':' => {
                out.push(':');
                if state == State::FieldName {
                    state = State::AfterColon;
                }
                i += 1;
            }
            b @ (b'{' | b'[' | b'}' | b']' | b',') => {
                out.push(char::from(b));
                field = None;
                state = State::Structural;
                i += 1;
            }
            _ => {
                let Some(ch) = body[i..].chars().next() else {
                    break;
                };
                if ch.is_whitespace() {
                    out.push(ch);
                    i += ch.len_utf8();
                } else {
                    // number, true/false, null, or anything unquoted
                    let end = literal_end(body, i);
                    out.push_str(&body[i..end]);
                    field = None;
                    state = State::AfterValue;
                    i = end;
                }
            }
        }
    }

    out.to_output()
}

fn governing_rule<'r>(
    state: State,
    field: Option<&str>,
    registry: &'r MaskingRuleRegistry,
) -> Option<&'r MaskingRule> {
    match (state, field) {
        (State::AfterColon, Some(name)) => registry.find_rule(name),
        _ => None,
    }
}

/// Index of the closing quote of a string whose content starts at `start`.
///
/// Backslash escapes are skipped, so `\"` does not close the string.
fn find_string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return Some(j),
            _ => j += 1,
        }
    }
    None
}

fn next_significant(body: &str, from: usize) -> Option<char> {
    body.get(from..)?.chars().find(|ch| !ch.is_whitespace())
}

fn is_value_terminator(ch: char) -> bool {
    matches!(ch, ',' | '}' | ']') || ch.is_whitespace()
}

fn literal_end(body: &str, start: usize) -> usize {
    body[start..]
        .char_indices()
        .find(|&(_, ch)| is_value_terminator(ch))
        .map_or(body.len(), |(offset, _)| start + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::MASKED_PLACEHOLDER;

    fn run(body: &str) -> String {
        let registry = MaskingRuleRegistry::create_default();
        mask(body, &registry, &mut MaskingBuffer::new())
    }

    #[test]
    fn supports_objects_and_arrays() {
        assert!(supports(r#"{"key":"value"}"#));
        assert!(supports("[1,2,3]"));
        assert!(supports("  {}  "));
        assert!(supports("\n[]\n"));
    }

    #[test]
    fn supports_rejects_other_shapes() {
        assert!(!supports(""));
        assert!(!supports("   "));
        assert!(!supports("key=value"));
        assert!(!supports(r#"{"unclosed":"#));
        assert!(!supports("[1,2"));
        assert!(!supports("{]"));
    }

    #[test]
    fn supports_is_only_a_shape_check() {
        assert!(supports("{ this is not json }"));
    }

    #[test]
    fn masks_sensitive_string_value() {
        assert_eq!(
            run(r#"{"username":"john","password":"secret123"}"#),
            r#"{"username":"john","password":"***MASKED***"}"#
        );
    }

    #[test]
    fn masks_nested_objects() {
        assert_eq!(
            run(r#"{"user":{"name":"john","token":"abc"},"ok":true}"#),
            r#"{"user":{"name":"john","token":"***MASKED***"},"ok":true}"#
        );
    }

    #[test]
    fn masks_objects_inside_arrays() {
        assert_eq!(
            run(r#"[{"password":"a"},{"password":"b","id":1}]"#),
            r#"[{"password":"***MASKED***"},{"password":"***MASKED***","id":1}]"#
        );
    }

    #[test]
    fn field_after_string_array_is_still_masked() {
        assert_eq!(
            run(r#"{"tags":["a","b"],"password":"x"}"#),
            r#"{"tags":["a","b"],"password":"***MASKED***"}"#
        );
    }

    #[test]
    fn array_elements_are_not_masked_by_field_name() {
        let body = r#"{"password":["one","two"],"secret":{"inner":"v"}}"#;
        assert_eq!(run(body), body);
    }

    #[test]
    fn bare_array_strings_are_never_masked() {
        let body = r#"["password","secret"]"#;
        assert_eq!(run(body), body);
    }

    #[test]
    fn non_string_values_are_copied() {
        let body = r#"{"password":12345,"token":true,"secret":null,"apikey":-1.5e3}"#;
        assert_eq!(run(body), body);
    }

    #[test]
    fn whitespace_is_preserved() {
        assert_eq!(
            run("{\n  \"password\" : \"secret\",\n  \"name\" : \"x\"\n}"),
            "{\n  \"password\" : \"***MASKED***\",\n  \"name\" : \"x\"\n}"
        );
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        assert_eq!(
            run(r#"{"password":"se\"cr\\\"et","note":"say \"hi\""}"#),
            r#"{"password":"***MASKED***","note":"say \"hi\""}"#
        );
    }

    #[test]
    fn escaped_backslash_before_closing_quote() {
        assert_eq!(
            run(r#"{"token":"ends\\","next":"v"}"#),
            r#"{"token":"***MASKED***","next":"v"}"#
        );
    }

    #[test]
    fn field_names_match_case_insensitively() {
        assert_eq!(
            run(r#"{"PASSWORD":"a","Password":"b"}"#),
            r#"{"PASSWORD":"***MASKED***","Password":"***MASKED***"}"#
        );
    }

    #[test]
    fn partial_rules_apply_to_strings() {
        assert_eq!(
            run(r#"{"phone":"13812345678","email":"john@example.com"}"#),
            r#"{"phone":"138****5678","email":"jo*n@example.com"}"#
        );
    }

    #[test]
    fn empty_string_value_stays_empty() {
        let body = r#"{"password":""}"#;
        assert_eq!(run(body), body);
    }

    #[test]
    fn unicode_content_is_preserved() {
        assert_eq!(
            run(r#"{"名字":"张三","password":"密码"}"#),
            r#"{"名字":"张三","password":"***MASKED***"}"#
        );
    }

    #[test]
    fn literal_ends_at_unicode_whitespace() {
        let body = "{\"count\":42\u{3000},\"ok\":false}";
        assert_eq!(run(body), body);
    }

    #[test]
    fn unterminated_sensitive_value_is_masked() {
        let masked = run(r#"{"password":"secret"#);
        assert!(!masked.contains("secret"));
        assert_eq!(masked, format!(r#"{{"password":"{MASKED_PLACEHOLDER}"#));
    }

    #[test]
    fn unterminated_plain_value_is_copied() {
        let body = r#"{"name":"john"#;
        assert_eq!(run(body), body);
    }

    #[test]
    fn missing_closing_brace_keeps_prefix() {
        assert_eq!(
            run(r#"{"password":"x","n":1"#),
            r#"{"password":"***MASKED***","n":1"#
        );
    }

    #[test]
    fn empty_containers_round_trip() {
        for body in ["{}", "[]", r#"{"a":{},"b":[]}"#, "[[[]]]"] {
            assert_eq!(run(body), body);
        }
    }

    #[test]
    fn non_sensitive_body_is_byte_identical() {
        let body = r#"{"id":7,"items":[{"sku":"A-1","qty":2}],"meta":{"ok":true,"note":null}}"#;
        assert_eq!(run(body), body);
    }

    #[test]
    fn buffer_is_reusable_between_calls() {
        let registry = MaskingRuleRegistry::create_default();
        let mut buffer = MaskingBuffer::new();
        let first = mask(r#"{"token":"a"}"#, &registry, &mut buffer);
        let second = mask(r#"{"name":"b"}"#, &registry, &mut buffer);
        assert_eq!(first, r#"{"token":"***MASKED***"}"#);
        assert_eq!(second, r#"{"name":"b"}"#);
    }

    #[test]
    fn string_after_colon_is_always_a_value() {
        assert_eq!(
            run(r#"{"token":"abc":1}"#),
            r#"{"token":"***MASKED***":1}"#
        );
        assert_eq!(
            run(r#"{"password" : "x" : "y"}"#),
            r#"{"password" : "***MASKED***" : "y"}"#
        );
    }

    #[test]
    fn unicode_whitespace_before_colon() {
        assert_eq!(
            run("{\"password\"\u{3000}:\"leak\"}"),
            "{\"password\"\u{3000}:\"***MASKED***\"}"
        );
        assert_eq!(
            run("{\"token\"\u{a0}:\u{2003}\"leak\"}"),
            "{\"token\"\u{a0}:\u{2003}\"***MASKED***\"}"
        );
    }
}
