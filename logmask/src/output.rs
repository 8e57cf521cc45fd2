//! Lazily masked values for logging boundaries.
//!
//! - [`MaskedBody`]: a body that is masked when formatted
//! - [`MaskedHeaders`]: a header map that is masked when formatted
//! - [`ToMaskedOutput`]: produces the masked text eagerly
//!
//! Nothing is masked until the wrapper is actually formatted, so log
//! statements filtered out by level never pay for a scan.

use std::{collections::BTreeMap, fmt};

use crate::engine::{HeaderMap, MaskingEngine};

// =============================================================================
// ToMaskedOutput - eager masked text
// =============================================================================

/// Produces a logging-safe string.
pub trait ToMaskedOutput {
    #[must_use]
    fn to_masked_output(&self) -> String;
}

// =============================================================================
// MaskedBody
// =============================================================================

/// Display wrapper that masks a body with its engine's context.
#[derive(Clone, Copy)]
pub struct MaskedBody<'a> {
    engine: &'a MaskingEngine,
    body: &'a str,
}

impl<'a> MaskedBody<'a> {
    pub fn new(engine: &'a MaskingEngine, body: &'a str) -> Self {
        Self { engine, body }
    }
}

impl fmt::Display for MaskedBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.engine.mask_body(self.body))
    }
}

impl fmt::Debug for MaskedBody<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.engine.mask_body(self.body).as_ref(), f)
    }
}

impl ToMaskedOutput for MaskedBody<'_> {
    fn to_masked_output(&self) -> String {
        self.engine.mask_body(self.body).into_owned()
    }
}

// =============================================================================
// MaskedHeaders
// =============================================================================

/// Display wrapper that masks headers with its engine's context.
///
/// Headers are rendered sorted by name, e.g.
/// `{"Accept": ["*/*"], "Authorization": ["***MASKED***"]}`.
#[derive(Clone, Copy)]
pub struct MaskedHeaders<'a> {
    engine: &'a MaskingEngine,
    headers: &'a HeaderMap,
}

impl<'a> MaskedHeaders<'a> {
    pub fn new(engine: &'a MaskingEngine, headers: &'a HeaderMap) -> Self {
        Self { engine, headers }
    }

    fn sorted(&self) -> BTreeMap<String, Vec<String>> {
        self.engine.mask_headers(self.headers).into_iter().collect()
    }
}

impl fmt::Display for MaskedHeaders<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.sorted())
    }
}

impl fmt::Debug for MaskedHeaders<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl ToMaskedOutput for MaskedHeaders<'_> {
    fn to_masked_output(&self) -> String {
        self.to_string()
    }
}
