//! Adapters for emitting masked values through `slog`.
//!
//! [`MaskedBody`] and [`MaskedHeaders`] implement `slog::Value`, so they can be
//! passed straight into a record's key-value list. Masking happens when the
//! drain serializes the record, never for records that are filtered out.
//!
//! ```ignore
//! use slog::debug;
//!
//! let engine = logmask::MaskingEngine::global();
//! debug!(logger, "request"; "body" => engine.display_body(&body));
//! ```

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::output::{MaskedBody, MaskedHeaders};

/// Marker for values whose `slog` serialization is always masked.
///
/// ```compile_fail
/// use logmask::slog::SlogMasked;
///
/// fn assert_slog_masked<T: SlogMasked>() {}
///
/// assert_slog_masked::<String>();
/// ```
pub trait SlogMasked: SlogValue {}

impl<T: SlogMasked + ?Sized> SlogMasked for &T {}

impl SlogValue for MaskedBody<'_> {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_arguments(key, &format_args!("{self}"))
    }
}

impl SlogMasked for MaskedBody<'_> {}

impl SlogValue for MaskedHeaders<'_> {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_arguments(key, &format_args!("{self}"))
    }
}

impl SlogMasked for MaskedHeaders<'_> {}
