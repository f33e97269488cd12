//! Byte-level helpers for reading XLIFF files.

use std::borrow::Cow;

use memchr::memmem;

/// Decode raw file bytes to a string.
///
/// This function:
/// 1. First tries UTF-8 (a BOM is stripped by encoding_rs)
/// 2. If malformed, tries the encoding named in the `<?xml encoding="..."?>` declaration
/// 3. Falls back to Windows-1252
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8 without a BOM.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(label) = declared_encoding(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(label)
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_encoding(bytes: &[u8]) -> Option<&[u8]> {
    let start = memmem::find(bytes, b"<?xml")?;
    let end = start + memmem::find(&bytes[start..], b"?>")?;
    let decl = &bytes[start..end];

    let attr = memmem::find(decl, b"encoding")?;
    let rest = &decl[attr + b"encoding".len()..];
    let eq = memchr::memchr(b'=', rest)?;
    let rest = &rest[eq + 1..];
    let quote_pos = memchr::memchr2(b'"', b'\'', rest)?;
    let quote = rest[quote_pos];
    let value = &rest[quote_pos + 1..];
    let close = memchr::memchr(quote, value)?;
    Some(&value[..close])
}
