//! Adapters for emitting masked values through `tracing`.
//!
//! `TracingMaskedExt` turns a body, a header map, or one of the lazy wrappers
//! from [`crate::output`] into a `tracing` display value that already carries
//! the masked text. Raw values never reach the subscriber.
//!
//! # Example
//!
//! ```ignore
//! use logmask::tracing::TracingMaskedExt;
//!
//! tracing::debug!(body = %request_body.tracing_masked(), "request body");
//! tracing::debug!(headers = %headers.tracing_masked(), "request headers");
//! ```

use tracing::field::{DisplayValue, display};

use crate::{
    engine::{HeaderMap, MaskingEngine},
    output::{MaskedBody, MaskedHeaders, ToMaskedOutput},
};

/// Extension trait for logging masked values as display strings.
///
/// Plain bodies and header maps are masked with [`MaskingEngine::global`].
pub trait TracingMaskedExt {
    /// Masks the value and wraps the result for `tracing`.
    fn tracing_masked(&self) -> DisplayValue<String>;
}

impl TracingMaskedExt for str {
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(MaskingEngine::global().mask_body(self).into_owned())
    }
}

impl TracingMaskedExt for String {
    fn tracing_masked(&self) -> DisplayValue<String> {
        self.as_str().tracing_masked()
    }
}

impl TracingMaskedExt for HeaderMap {
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(MaskingEngine::global().display_headers(self).to_masked_output())
    }
}

impl TracingMaskedExt for MaskedBody<'_> {
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(self.to_masked_output())
    }
}

impl TracingMaskedExt for MaskedHeaders<'_> {
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(self.to_masked_output())
    }
}
