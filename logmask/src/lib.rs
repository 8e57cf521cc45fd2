//! Masking of sensitive values in HTTP headers and bodies for safe logging.
//!
//! This crate separates:
//! - **Rules**: which field names are sensitive and how their values are masked
//!   (fully, or revealing a bounded prefix/suffix of a phone, email, ID, ...).
//! - **Scanners**: single-pass JSON and form scanners that find the value
//!   governed by a field name without building a parse tree.
//! - **The engine**: picks a scanner, truncates the result, and never fails the
//!   caller.
//!
//! What this crate does:
//! - rewrites header maps, bodies, single values, and URL query strings
//! - leaves every non-sensitive byte of a body untouched
//! - provides sink adapters behind feature flags (`tracing`, `slog`)
//!
//! What it does not do:
//! - parse, validate, or re-serialize JSON or forms
//! - decide when to log, or where
//!
//! ```
//! let masked = logmask::mask_body(r#"{"username":"john","password":"secret123"}"#);
//! assert_eq!(masked, r#"{"username":"john","password":"***MASKED***"}"#);
//!
//! let masked = logmask::mask_body("phone=13812345678");
//! assert_eq!(masked, "phone=138****5678");
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::return_self_not_must_use,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

use std::borrow::Cow;

// Module declarations
mod buffer;
mod context;
mod engine;
mod error;
pub mod output;
pub mod rule;
#[cfg(feature = "serde")]
mod settings;
#[cfg(feature = "slog")]
pub mod slog;
pub mod tokenizer;
#[cfg(feature = "tracing")]
pub mod tracing;
mod url;

pub use buffer::MaskingBuffer;
pub use context::{
    DEFAULT_MAX_BODY_LENGTH, MaskingConfig, MaskingConfigBuilder, MaskingContext,
    TRUNCATION_SUFFIX,
};
pub use engine::{HeaderMap, MaskingEngine};
pub use error::{ConfigError, RuleError};
pub use output::{MaskedBody, MaskedHeaders, ToMaskedOutput};
pub use rule::{
    EmailConfig, KeepConfig, MASK_CHAR, MASKED_PLACEHOLDER, MaskStrategy, MaskingRule,
    MaskingRuleRegistry, RegistryBuilder, RuleBuilder, RuleType, ValueKind,
};
#[cfg(feature = "serde")]
pub use settings::{MaskingSettings, RuleSpec};
pub use tokenizer::BodyFormat;
pub use url::{URL_MASK, mask_url};

/// Masks sensitive headers with the default engine.
pub fn mask_headers(headers: &HeaderMap) -> HeaderMap {
    MaskingEngine::global().mask_headers(headers)
}

/// Masks a request or response body with the default engine.
pub fn mask_body(body: &str) -> Cow<'_, str> {
    MaskingEngine::global().mask_body(body)
}

/// Masks a single value by field name with the default engine.
pub fn mask_value<'a>(field_name: &str, value: &'a str) -> Cow<'a, str> {
    MaskingEngine::global().mask_value(field_name, value)
}
