//! The masking facade used by HTTP logging filters.
//!
//! [`MaskingEngine`] selects a body scanner, applies truncation, and shields
//! callers from any internal failure. Masking is a logging side-channel: no
//! call here may fail the request or response being logged. When a scanner
//! fails unexpectedly the original body is returned, which can leave sensitive
//! data in that log line. Availability of the request path wins over
//! completeness of redaction.
//!
//! The failure is still reported to the process panic hook, and the default
//! hook prints the panic message to stderr. Slicing panics quote the text
//! involved, so fragments of the body can reach stderr. Services that treat
//! stderr as a log sink should install a hook that drops payloads.

use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    panic::{self, AssertUnwindSafe},
    sync::LazyLock,
};

use crate::{
    buffer::MaskingBuffer,
    context::{MaskingConfig, MaskingContext, TRUNCATION_SUFFIX},
    output::{MaskedBody, MaskedHeaders},
    rule::MASKED_PLACEHOLDER,
    tokenizer::BodyFormat,
};

/// HTTP header map as handed over by logging filters.
pub type HeaderMap = HashMap<String, Vec<String>>;

static DEFAULT_ENGINE: LazyLock<MaskingEngine> =
    LazyLock::new(|| MaskingEngine::new(MaskingConfig::create_default()));

/// Masks headers, bodies and single values before they are logged.
///
/// The engine owns a default [`MaskingContext`]; every operation also has a
/// `*_with_context` form taking an explicit one.
#[derive(Clone, Debug, Default)]
pub struct MaskingEngine {
    context: MaskingContext,
}

impl MaskingEngine {
    pub fn new(config: MaskingConfig) -> Self {
        Self {
            context: MaskingContext::new(config),
        }
    }

    /// The process-wide engine with default configuration.
    pub fn global() -> &'static MaskingEngine {
        &DEFAULT_ENGINE
    }

    pub fn context(&self) -> &MaskingContext {
        &self.context
    }

    pub fn mask_headers(&self, headers: &HeaderMap) -> HeaderMap {
        self.mask_headers_with_context(headers, &self.context)
    }

    /// Replaces the values of sensitive headers with a single masked marker.
    ///
    /// Non-sensitive headers keep their value lists unchanged.
    pub fn mask_headers_with_context(
        &self,
        headers: &HeaderMap,
        context: &MaskingContext,
    ) -> HeaderMap {
        if !context.is_enabled() {
            return headers.clone();
        }
        let registry = context.registry();
        mask_header_values(headers, |name| registry.is_sensitive(name))
    }

    /// Masks headers against an ad-hoc set of names instead of a registry.
    ///
    /// Names are compared ignoring ASCII case.
    pub fn mask_headers_matching<I, S>(&self, headers: &HeaderMap, sensitive_names: I) -> HeaderMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: HashSet<String> = sensitive_names
            .into_iter()
            .map(|name| name.as_ref().to_ascii_lowercase())
            .collect();
        if names.is_empty() {
            return headers.clone();
        }
        mask_header_values(headers, |name| {
            names.contains(&name.to_ascii_lowercase())
        })
    }

    pub fn mask_body<'a>(&self, body: &'a str) -> Cow<'a, str> {
        self.mask_body_with_context(body, &self.context)
    }

    /// Masks `body` using this thread's scratch buffer.
    pub fn mask_body_with_context<'a>(
        &self,
        body: &'a str,
        context: &MaskingContext,
    ) -> Cow<'a, str> {
        if body.is_empty() || !context.is_enabled() {
            return Cow::Borrowed(body);
        }
        MaskingBuffer::with_local(|buffer| self.mask_body_with_buffer(body, context, buffer))
    }

    /// Masks `body` using a caller-owned scratch buffer.
    ///
    /// The body is scanned in full before truncation, so a secret beyond the
    /// truncation point is masked before anything is discarded. Bodies no
    /// scanner admits are returned unchanged (then truncated).
    pub fn mask_body_with_buffer<'a>(
        &self,
        body: &'a str,
        context: &MaskingContext,
        buffer: &mut MaskingBuffer,
    ) -> Cow<'a, str> {
        if body.is_empty() || !context.is_enabled() {
            return Cow::Borrowed(body);
        }

        let max_chars = context.max_body_length();
        match BodyFormat::detect(body) {
            Some(format) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(format = %format, body_len = body.len(), "masking body");

                let registry = context.registry();
                scan_and_truncate(body, format, max_chars, || {
                    format.mask(body, registry, buffer)
                })
            }
            None => truncate(Cow::Borrowed(body), max_chars),
        }
    }

    pub fn mask_value<'a>(&self, field_name: &str, value: &'a str) -> Cow<'a, str> {
        self.mask_value_with_context(field_name, value, &self.context)
    }

    /// Masks one value (a cookie, a query parameter) by its field name.
    ///
    /// Empty values and unknown fields are returned unchanged.
    pub fn mask_value_with_context<'a>(
        &self,
        field_name: &str,
        value: &'a str,
        context: &MaskingContext,
    ) -> Cow<'a, str> {
        if value.is_empty() || !context.is_enabled() {
            return Cow::Borrowed(value);
        }
        match context.registry().find_rule(field_name) {
            Some(rule) => Cow::Owned(rule.apply(value)),
            None => Cow::Borrowed(value),
        }
    }

    /// Wraps `body` so it is masked only when formatted.
    pub fn display_body<'a>(&'a self, body: &'a str) -> MaskedBody<'a> {
        MaskedBody::new(self, body)
    }

    /// Wraps `headers` so they are masked only when formatted.
    pub fn display_headers<'a>(&'a self, headers: &'a HeaderMap) -> MaskedHeaders<'a> {
        MaskedHeaders::new(self, headers)
    }
}

/// Runs `scan` over a body of a detected format, then truncates the result.
///
/// If `scan` panics the original body is truncated and returned instead.
fn scan_and_truncate<'a>(
    body: &'a str,
    format: BodyFormat,
    max_chars: usize,
    scan: impl FnOnce() -> String,
) -> Cow<'a, str> {
    let masked = match panic::catch_unwind(AssertUnwindSafe(scan)) {
        Ok(masked) => Cow::Owned(masked),
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                format = %format,
                body_len = body.len(),
                "body masking failed, logging body unmasked"
            );
            #[cfg(not(feature = "tracing"))]
            let _ = format;
            Cow::Borrowed(body)
        }
    };
    truncate(masked, max_chars)
}

fn mask_header_values(headers: &HeaderMap, is_sensitive: impl Fn(&str) -> bool) -> HeaderMap {
    headers
        .iter()
        .map(|(name, values)| {
            let values = if is_sensitive(name) {
                vec![MASKED_PLACEHOLDER.to_string()]
            } else {
                values.clone()
            };
            (name.clone(), values)
        })
        .collect()
}

/// Cuts `text` to `max_chars` characters and appends [`TRUNCATION_SUFFIX`].
///
/// `max_chars == 0` disables truncation.
fn truncate(text: Cow<'_, str>, max_chars: usize) -> Cow<'_, str> {
    if max_chars == 0 {
        return text;
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                max_chars,
                body_len = text.len(),
                "truncating masked body"
            );
            let mut truncated = String::with_capacity(cut + TRUNCATION_SUFFIX.len());
            truncated.push_str(&text[..cut]);
            truncated.push_str(TRUNCATION_SUFFIX);
            Cow::Owned(truncated)
        }
        None => text,
    }
}
