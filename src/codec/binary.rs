//! Binary structure helpers
//!
//! Small readers for the fixed layouts found on the clipboard: the
//! `CF_LOCALE` LCID, GUIDs embedded in OLE blobs, and short buffers shown as
//! 32-bit integers.

use serde::Serialize;
use tracing::trace;

use crate::clipboard::error::{InspectError, InspectResult};
use crate::codec::hexdump::hex_dump_with_limit;

/// Buffers up to this size are shown as little-endian `i32` values
pub const INTEGER_DUMP_MAX: usize = 32;

const GUID_LEN: usize = 16;

/// LCID → (tag, display name)
const LOCALES: &[(u32, &str, &str)] = &[
    (0x0401, "ar-SA", "Arabic (Saudi Arabia)"),
    (0x0404, "zh-TW", "Chinese (Traditional, Taiwan)"),
    (0x0405, "cs-CZ", "Czech (Czech Republic)"),
    (0x0406, "da-DK", "Danish (Denmark)"),
    (0x0407, "de-DE", "German (Germany)"),
    (0x0408, "el-GR", "Greek (Greece)"),
    (0x0409, "en-US", "English (United States)"),
    (0x040B, "fi-FI", "Finnish (Finland)"),
    (0x040C, "fr-FR", "French (France)"),
    (0x040D, "he-IL", "Hebrew (Israel)"),
    (0x040E, "hu-HU", "Hungarian (Hungary)"),
    (0x0410, "it-IT", "Italian (Italy)"),
    (0x0411, "ja-JP", "Japanese (Japan)"),
    (0x0412, "ko-KR", "Korean (Korea)"),
    (0x0413, "nl-NL", "Dutch (Netherlands)"),
    (0x0414, "nb-NO", "Norwegian Bokmål (Norway)"),
    (0x0415, "pl-PL", "Polish (Poland)"),
    (0x0416, "pt-BR", "Portuguese (Brazil)"),
    (0x0418, "ro-RO", "Romanian (Romania)"),
    (0x0419, "ru-RU", "Russian (Russia)"),
    (0x041D, "sv-SE", "Swedish (Sweden)"),
    (0x041E, "th-TH", "Thai (Thailand)"),
    (0x041F, "tr-TR", "Turkish (Turkey)"),
    (0x0422, "uk-UA", "Ukrainian (Ukraine)"),
    (0x042A, "vi-VN", "Vietnamese (Vietnam)"),
    (0x0439, "hi-IN", "Hindi (India)"),
    (0x0804, "zh-CN", "Chinese (Simplified, China)"),
    (0x0807, "de-CH", "German (Switzerland)"),
    (0x0809, "en-GB", "English (United Kingdom)"),
    (0x080A, "es-MX", "Spanish (Mexico)"),
    (0x080C, "fr-BE", "French (Belgium)"),
    (0x0816, "pt-PT", "Portuguese (Portugal)"),
    (0x0C07, "de-AT", "German (Austria)"),
    (0x0C09, "en-AU", "English (Australia)"),
    (0x0C0A, "es-ES", "Spanish (Spain)"),
    (0x0C0C, "fr-CA", "French (Canada)"),
    (0x1009, "en-CA", "English (Canada)"),
    (0x1409, "en-NZ", "English (New Zealand)"),
    (0x1809, "en-IE", "English (Ireland)"),
    (0x4009, "en-IN", "English (India)"),
];

/// Look up an LCID
///
/// Returns `(tag, display name)` for known locales.
pub fn locale_name(lcid: u32) -> Option<(&'static str, &'static str)> {
    LOCALES
        .iter()
        .find(|(id, _, _)| *id == lcid)
        .map(|&(_, tag, name)| (tag, name))
}

/// Describe a `CF_LOCALE` payload
///
/// The first four bytes are a little-endian LCID. A hex dump of up to
/// `hex_limit` bytes follows the description.
pub fn decode_locale(bytes: &[u8], hex_limit: usize) -> InspectResult<String> {
    let lcid_bytes: [u8; 4] = bytes
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .ok_or(InspectError::Truncated {
            what: "locale",
            expected: 4,
            actual: bytes.len(),
        })?;
    let lcid = u32::from_le_bytes(lcid_bytes);

    let locale = match locale_name(lcid) {
        Some((tag, name)) => format!("{} [{}]", name, tag),
        None => format!("Unknown locale ({})", lcid),
    };

    Ok(format!(
        "Locale ID: {} (0x{:04X})\nLocale: {}\n\n{}",
        lcid,
        lcid,
        locale,
        hex_dump_with_limit(bytes, hex_limit)
    ))
}

/// GUID found in a binary blob
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidHit {
    /// Byte offset of the GUID
    pub offset: usize,
    /// Registry form, `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`
    pub guid: String,
}

/// Heuristic GUID scan
///
/// A candidate is a 16-byte window at the buffer start or right after a
/// zero byte whose bytes 4, 6 and 9 are zero and which is not all zeros.
/// This matches the sparse layout of small CLSIDs in OLE streams and will
/// produce false positives on arbitrary data.
pub fn scan_for_guids(bytes: &[u8]) -> Vec<GuidHit> {
    let mut hits = Vec::new();
    let mut offset = 0usize;

    while offset + GUID_LEN <= bytes.len() {
        let window = &bytes[offset..offset + GUID_LEN];
        let aligned = offset == 0 || bytes[offset - 1] == 0;

        if aligned && window[4] == 0 && window[6] == 0 && window[9] == 0 && window.iter().any(|&b| b != 0) {
            let mut raw = [0u8; GUID_LEN];
            raw.copy_from_slice(window);
            let guid = uuid::Uuid::from_bytes_le(raw)
                .braced()
                .to_string()
                .to_uppercase();
            trace!(offset, %guid, "GUID candidate");
            hits.push(GuidHit { offset, guid });
            offset += GUID_LEN;
        } else {
            offset += 1;
        }
    }

    hits
}

/// Split a short buffer into `(offset, i32)` pairs
///
/// Trailing bytes that do not fill a full word are ignored.
pub fn decode_as_integers(bytes: &[u8]) -> Vec<(usize, i32)> {
    bytes
        .chunks_exact(4)
        .enumerate()
        .map(|(i, word)| (i * 4, i32::from_le_bytes([word[0], word[1], word[2], word[3]])))
        .collect()
}
