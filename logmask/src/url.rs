//! Query-string masking for logged request URLs.

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

/// Replacement for sensitive query parameter values.
pub const URL_MASK: &str = "***";

// Unanchored on purpose: `my_token=` and `oauth=` are caught by their suffix.
static SENSITIVE_QUERY_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(api[_-]?key|token|password|secret|authorization|auth|access[_-]?token|refresh[_-]?token|bearer[_-]?token|session[_-]?token)=([^&]*)",
    )
    .expect("sensitive query parameter pattern is valid")
});

/// Masks credential-like query parameters in `url`.
///
/// Only the query string (between `?` and an optional `#fragment`) is
/// rewritten. URLs without a query are returned unchanged.
///
/// ```
/// assert_eq!(
///     logmask::mask_url("https://api.example.com/v1/chat?api_key=sk-123&limit=5"),
///     "https://api.example.com/v1/chat?api_key=***&limit=5"
/// );
/// ```
pub fn mask_url(url: &str) -> Cow<'_, str> {
    let Some(query_start) = url.find('?') else {
        return Cow::Borrowed(url);
    };
    let query_end = url[query_start..]
        .find('#')
        .map_or(url.len(), |offset| query_start + offset);
    let query = &url[query_start + 1..query_end];

    match SENSITIVE_QUERY_PARAM.replace_all(query, format!("${{1}}={URL_MASK}")) {
        Cow::Borrowed(_) => Cow::Borrowed(url),
        Cow::Owned(masked) => {
            let mut out = String::with_capacity(url.len());
            out.push_str(&url[..=query_start]);
            out.push_str(&masked);
            out.push_str(&url[query_end..]);
            Cow::Owned(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.example.com/v1/chat";

    #[test]
    fn url_without_query_is_unchanged() {
        assert!(matches!(mask_url(BASE), Cow::Borrowed(u) if u == BASE));
        assert_eq!(mask_url(""), "");
    }

    #[test]
    fn masks_known_parameter_spellings() {
        for name in [
            "api_key",
            "apiKey",
            "api-key",
            "token",
            "access_token",
            "accessToken",
            "refresh_token",
            "refreshToken",
            "bearer_token",
            "bearerToken",
            "session_token",
            "sessionToken",
            "password",
            "secret",
            "authorization",
            "auth",
        ] {
            let url = format!("{BASE}?{name}=value123");
            assert_eq!(mask_url(&url), format!("{BASE}?{name}=***"), "{name}");
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            mask_url(&format!("{BASE}?API_KEY=abc&Token=def")),
            format!("{BASE}?API_KEY=***&Token=***")
        );
    }

    #[test]
    fn other_parameters_are_kept() {
        assert_eq!(
            mask_url(&format!("{BASE}?user=john&password=secret&limit=10")),
            format!("{BASE}?user=john&password=***&limit=10")
        );
        let url = format!("{BASE}?user=john&limit=10");
        assert!(matches!(mask_url(&url), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_value_is_masked_too() {
        assert_eq!(
            mask_url(&format!("{BASE}?token=&a=1")),
            format!("{BASE}?token=***&a=1")
        );
    }

    #[test]
    fn fragment_is_preserved() {
        assert_eq!(
            mask_url(&format!("{BASE}?token=abc#section")),
            format!("{BASE}?token=***#section")
        );
    }
}
