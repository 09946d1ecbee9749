//! Best-effort text decoding
//!
//! Clipboard payloads rarely say which encoding they use. Decoding tries a
//! fixed list of candidates and accepts the first one that both decodes and
//! does not look like binary data.

use serde::Serialize;
use tracing::{debug, trace};

use crate::clipboard::error::{InspectError, InspectResult};
use crate::codec::hexdump::hex_dump_with_limit;

/// Characters sampled by the binary heuristic
const BINARY_SAMPLE_CHARS: usize = 1000;

/// Fraction of control characters above which text is considered binary
const BINARY_CONTROL_RATIO: f64 = 0.05;

/// Candidate text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// UTF-8
    Utf8,
    /// UTF-16 little-endian
    Utf16Le,
    /// 7-bit ASCII, other bytes shown as `?`
    Ascii,
}

impl TextEncoding {
    /// Order in which encodings are tried
    pub const CANDIDATES: [TextEncoding; 3] = [Self::Utf8, Self::Utf16Le, Self::Ascii];

    /// Decode bytes, dropping a BOM and trailing NULs
    pub fn decode(self, bytes: &[u8]) -> InspectResult<String> {
        match self {
            Self::Utf8 => decode_utf8(bytes),
            Self::Utf16Le => decode_utf16le(bytes),
            Self::Ascii => Ok(decode_ascii_lossy(bytes)),
        }
    }

    /// Display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Ascii => "ASCII",
        }
    }
}

/// Text together with the encoding that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded text
    pub text: String,
    /// Encoding that was accepted
    pub encoding: TextEncoding,
}

/// Decode UTF-8, trimming a BOM and trailing NULs
pub fn decode_utf8(bytes: &[u8]) -> InspectResult<String> {
    let text = std::str::from_utf8(bytes).map_err(|_| InspectError::InvalidUtf8)?;
    Ok(text
        .trim_start_matches('\u{FEFF}')
        .trim_end_matches('\0')
        .to_string())
}

/// Decode UTF-16LE, trimming a BOM and trailing NULs
///
/// A single trailing zero byte (allocation padding) is tolerated.
pub fn decode_utf16le(bytes: &[u8]) -> InspectResult<String> {
    let bytes = match bytes.split_last() {
        Some((0, rest)) if bytes.len() % 2 != 0 => rest,
        _ => bytes,
    };
    if bytes.len() % 2 != 0 {
        return Err(InspectError::InvalidUtf16);
    }

    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let text = String::from_utf16(&units).map_err(|_| InspectError::InvalidUtf16)?;
    Ok(text
        .trim_start_matches('\u{FEFF}')
        .trim_end_matches('\0')
        .to_string())
}

/// Decode 7-bit ASCII, replacing other bytes with `?`
pub fn decode_ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect::<String>()
        .trim_end_matches('\0')
        .to_string()
}

/// Binary heuristic
///
/// Samples the first 1000 characters; more than 5% control characters
/// (not counting CR, LF, TAB) means binary.
pub fn looks_binary(text: &str) -> bool {
    let mut sampled = 0usize;
    let mut control = 0usize;

    for c in text.chars().take(BINARY_SAMPLE_CHARS) {
        sampled += 1;
        if c.is_control() && !matches!(c, '\r' | '\n' | '\t') {
            control += 1;
        }
    }

    sampled > 0 && (control as f64 / sampled as f64) > BINARY_CONTROL_RATIO
}

/// Decode with the first candidate encoding that yields non-binary text
pub fn decode_text(bytes: &[u8]) -> InspectResult<DecodedText> {
    TextEncoding::CANDIDATES
        .iter()
        .find_map(|&encoding| match encoding.decode(bytes) {
            Ok(text) if !looks_binary(&text) => Some(DecodedText { text, encoding }),
            Ok(_) => {
                trace!(encoding = encoding.label(), "Decoded text looks binary");
                None
            }
            Err(e) => {
                trace!(encoding = encoding.label(), "Decode failed: {}", e);
                None
            }
        })
        .ok_or(InspectError::Binary)
}

/// Decode as text, or fall back to a hex dump of up to `hex_limit` bytes
pub fn decode_best_effort(bytes: &[u8], hex_limit: usize) -> String {
    match decode_text(bytes) {
        Ok(decoded) => decoded.text,
        Err(_) => {
            debug!(len = bytes.len(), "No text encoding fits, rendering hex dump");
            hex_dump_with_limit(bytes, hex_limit)
        }
    }
}

/// Scan a binary blob for NUL-terminated strings
///
/// A run ends at one zero byte (8-bit strings) or at an aligned zero
/// 16-bit unit (UTF-16 strings, detected by a `xx 00 yy` start). A run that
/// starts like UTF-16 but has no aligned terminator is read as an 8-bit run
/// instead. Runs are decoded as ASCII first and, for even lengths, as
/// UTF-16LE, then stripped of leading and trailing control characters.
/// Runs without a terminator, strings that still look binary, and empty or
/// whitespace-only strings are dropped.
pub fn extract_null_terminated_strings(bytes: &[u8]) -> Vec<String> {
    let mut strings = Vec::new();
    let mut start = 0usize;

    while start < bytes.len() {
        if bytes[start] == 0 {
            start += 1;
            continue;
        }

        let wide = if is_wide_start(bytes, start) {
            find_wide_terminator(bytes, start).map(|end| (&bytes[start..end], end + 2))
        } else {
            None
        };

        let Some((run, next)) = wide.or_else(|| narrow_run(bytes, start)) else {
            break;
        };

        if let Some(text) = decode_run(run) {
            let text = text.trim_matches(|c: char| c.is_control());
            if !text.trim().is_empty() && !looks_binary(text) {
                strings.push(text.to_string());
            }
        }
        start = next;
    }

    strings
}

/// 8-bit run from `start` to the next zero byte, and where scanning resumes
fn narrow_run(bytes: &[u8], start: usize) -> Option<(&[u8], usize)> {
    let len = bytes[start..].iter().position(|&b| b == 0)?;
    let end = start + len;
    // Swallow a second zero so "AB\0\0" counts as one terminator
    let next = if bytes.get(end + 1) == Some(&0) { end + 2 } else { end + 1 };
    Some((&bytes[start..end], next))
}

fn is_wide_start(bytes: &[u8], start: usize) -> bool {
    matches!(
        bytes.get(start..start + 3),
        Some([lo, 0, next]) if *lo != 0 && *next != 0
    )
}

fn find_wide_terminator(bytes: &[u8], start: usize) -> Option<usize> {
    let mut pos = start;
    while pos + 1 < bytes.len() {
        if bytes[pos] == 0 && bytes[pos + 1] == 0 {
            return Some(pos);
        }
        pos += 2;
    }
    None
}

fn decode_run(run: &[u8]) -> Option<String> {
    if run.iter().all(|&b| (1..0x80).contains(&b)) {
        return Some(run.iter().map(|&b| b as char).collect());
    }
    if run.len() % 2 == 0 {
        return decode_utf16le(run).ok().filter(|s| !looks_binary(s));
    }
    None
}
