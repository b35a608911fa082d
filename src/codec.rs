//! Field encoding for requests and reports.
//!
//! Requests carry revision specs and paths percent-encoded, with `+` standing
//! for a space. Reports encode each attribute one of two ways, fixed by the
//! kind of field:
//!
//! - [`escape`] for tokens that are already safe text (node hashes)
//! - [`quote_escape`] for user-controlled names and paths, which are
//!   percent-encoded first so separators, quotes and non-ASCII bytes survive
//!   the consumer's decoder unchanged
//!
//! The consumer decodes names with a CGI-style unescape, so the exact byte
//! set left unencoded here is part of the wire format.

use std::borrow::Cow;

use encoding_rs::Encoding;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode, percent_encode};

use crate::error::{AppError, Result};

/// Bytes left as-is by [`quote`]: unreserved characters plus the path separator.
const QUOTE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~')
    .remove(b'/');

/// Bytes left as-is by [`encode_request`]. Space is handled separately.
const FORM_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Percent-unescapes a request field, then maps every `+` to a space.
///
/// The order matters: an escaped `%2B` also ends up as a space.
pub fn unquote_plus(raw: &[u8]) -> Vec<u8> {
    let mut bytes: Vec<u8> = percent_decode(raw).collect();
    for b in bytes.iter_mut() {
        if *b == b'+' {
            *b = b' ';
        }
    }
    bytes
}

/// Form-encodes a request field so that [`unquote_plus`] restores it.
///
/// A literal `+` in the input cannot survive the trip: it comes back as a space.
pub fn encode_request(text: &str) -> String {
    text.split(' ')
        .map(|part| percent_encode(part.as_bytes(), FORM_SAFE).to_string())
        .collect::<Vec<_>>()
        .join("+")
}

/// Decodes request bytes into text using the configured path encoding.
pub fn decode_text(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| {
            AppError::InvalidPath(format!(
                "{} is not valid {}",
                String::from_utf8_lossy(bytes),
                encoding.name()
            ))
        })
}

/// Markup-escapes text: `&`, `<`, `>`, `"` and `'`.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes every byte outside the unreserved set and `/`.
pub fn quote(bytes: &[u8]) -> String {
    percent_encode(bytes, QUOTE_SAFE).to_string()
}

/// Percent-encodes, then markup-escapes. Used for every name and path attribute.
pub fn quote_escape(bytes: &[u8]) -> String {
    escape(&quote(bytes))
}
