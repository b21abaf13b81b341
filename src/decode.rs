//! Byte-to-text decoding for uploaded exports.
//!
//! Exports are usually UTF-8, but some phones and desktop tools save them as
//! UTF-16. Decoding tries UTF-8 first and falls back to UTF-16 (BOM respected,
//! little-endian otherwise). Anything else is a fatal
//! [`AuditError::Decode`](crate::error::AuditError::Decode).
//!
//! Almost any even-length byte string is well-formed UTF-16LE, so the
//! BOM-less fallback is only accepted when the result contains at least one
//! ASCII character. Every real export has them (dates, colons); a Latin-1
//! file decoded this way has none and is rejected instead of turning into
//! CJK noise.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::{AuditError, Result};

/// Encoding that was used to decode an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    /// Returns the WHATWG label of the encoding.
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decodes raw export bytes into text.
///
/// A leading byte-order mark is removed so the first header line still
/// anchors at column zero.
///
/// # Example
///
/// ```rust
/// use chataudit::decode::{decode_bytes, TextEncoding};
///
/// let (text, encoding) = decode_bytes("01/02/2024, 09:15 - Ana: hola".as_bytes(), "input")?;
/// assert_eq!(encoding, TextEncoding::Utf8);
/// assert!(text.starts_with("01/02/2024"));
/// # Ok::<(), chataudit::AuditError>(())
/// ```
pub fn decode_bytes<'a>(bytes: &'a [u8], context: &str) -> Result<(Cow<'a, str>, TextEncoding)> {
    let bom = Encoding::for_bom(bytes);

    let (encoding, body) = match bom {
        Some((enc, bom_len)) if enc == UTF_16BE => (TextEncoding::Utf16Be, &bytes[bom_len..]),
        Some((enc, bom_len)) if enc == UTF_16LE => (TextEncoding::Utf16Le, &bytes[bom_len..]),
        Some((_, bom_len)) => (TextEncoding::Utf8, &bytes[bom_len..]),
        None => (TextEncoding::Utf8, bytes),
    };

    if encoding == TextEncoding::Utf8 {
        if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(body) {
            return Ok((text, TextEncoding::Utf8));
        }
        tracing::debug!(context, "input is not valid UTF-8, retrying as UTF-16");
        return decode_utf16(body, UTF_16LE, TextEncoding::Utf16Le)
            .filter(|(text, _)| text.chars().any(|c| c.is_ascii()))
            .ok_or_else(|| AuditError::decode(context, bytes.len()));
    }

    let enc = if encoding == TextEncoding::Utf16Be {
        UTF_16BE
    } else {
        UTF_16LE
    };
    decode_utf16(body, enc, encoding).ok_or_else(|| AuditError::decode(context, bytes.len()))
}

fn decode_utf16<'a>(
    bytes: &'a [u8],
    encoding: &'static Encoding,
    kind: TextEncoding,
) -> Option<(Cow<'a, str>, TextEncoding)> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| (text, kind))
}
