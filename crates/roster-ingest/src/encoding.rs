//! Text decoding with a single legacy code page fallback.

use encoding_rs::{UTF_8, WINDOWS_1252};

const REPLACEMENT_CHAR: char = '\u{FFFD}';

/// Decodes uploaded bytes to text.
///
/// Decodes as UTF-8 first (stripping a UTF-8 BOM). If the result contains
/// U+FFFD the same bytes are decoded again as Windows-1252 and that result
/// is returned as-is. There is no further fallback and no error path: bytes
/// in some third encoding still come back as Windows-1252 text.
pub fn resolve_text(bytes: &[u8]) -> String {
    let (text, _) = UTF_8.decode_with_bom_removal(bytes);
    if !text.contains(REPLACEMENT_CHAR) {
        return text.into_owned();
    }

    tracing::debug!(
        bytes = bytes.len(),
        "UTF-8 decode produced replacement characters, re-decoding as Windows-1252"
    );
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}
