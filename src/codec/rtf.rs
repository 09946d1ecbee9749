//! Plain-text projection of RTF
//!
//! A small control-word scanner, not a full RTF reader. It drops metadata
//! destinations (font table, color table, pictures, fields), turns `\par`
//! and `\line` into newlines, and resolves `\'hh` and `\uN` escapes.

use tracing::trace;

use crate::clipboard::error::{InspectError, InspectResult};
use crate::codec::codepage::{decode_windows1252, windows1252_to_char};

/// Destination groups that hold metadata rather than document text
const SKIP_DESTINATIONS: &[&str] = &[
    "fonttbl",
    "colortbl",
    "stylesheet",
    "info",
    "pict",
    "header",
    "footer",
    "footnote",
    "annotation",
    "fldinst",
    "datafield",
    "docvar",
    "themedata",
    "colorschememapping",
    "latentstyles",
    "listtable",
    "listoverridetable",
    "rsidtbl",
    "generator",
    "xe",
    "tc",
    "rxe",
];

/// Check for the `{\rtf` signature
pub fn is_rtf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"{\\rtf")
}

/// Extract readable text from an RTF document
///
/// The payload is read as Windows-1252, the code page RTF escapes are
/// written in. Fails if the signature is missing or braces do not balance.
pub fn rtf_to_text(bytes: &[u8]) -> InspectResult<String> {
    let bytes = trim_trailing_nuls(bytes);
    if !is_rtf(bytes) {
        return Err(InspectError::Tokenize("missing {\\rtf signature".to_string()));
    }

    let source = decode_windows1252(bytes);
    let mut chars = source.chars().peekable();
    let mut out = String::new();

    let mut depth = 0usize;
    // Group depth at which a skipped destination started
    let mut skip_depth: Option<usize> = None;
    // Characters still to drop after a \uN escape
    let mut pending_fallback = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '{' => depth += 1,
            '}' => {
                if skip_depth == Some(depth) {
                    skip_depth = None;
                }
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| InspectError::Unbalanced("unmatched '}' in RTF".to_string()))?;
            }
            '\\' => {
                let mut word = String::new();
                while let Some(&nc) = chars.peek() {
                    if !nc.is_ascii_alphabetic() {
                        break;
                    }
                    word.push(nc);
                    chars.next();
                }

                let mut param = String::new();
                while let Some(&nc) = chars.peek().filter(|_| !word.is_empty()) {
                    if !(nc.is_ascii_digit() || (nc == '-' && param.is_empty())) {
                        break;
                    }
                    param.push(nc);
                    chars.next();
                }

                // A single space delimits the control word
                if !word.is_empty() && chars.peek() == Some(&' ') {
                    chars.next();
                }

                if SKIP_DESTINATIONS.contains(&word.as_str()) {
                    skip_depth.get_or_insert(depth);
                    continue;
                }
                if skip_depth.is_some() {
                    if word.is_empty() {
                        // Keep \'hh from being read as text
                        if chars.next() == Some('\'') {
                            chars.next();
                            chars.next();
                        }
                    }
                    continue;
                }

                match word.as_str() {
                    "par" | "line" => out.push('\n'),
                    "tab" => out.push('\t'),
                    "u" => {
                        if let Some(c) = param
                            .parse::<i32>()
                            .ok()
                            .map(|n| if n < 0 { n + 0x10000 } else { n })
                            .and_then(|n| u32::try_from(n).ok())
                            .and_then(char::from_u32)
                        {
                            out.push(c);
                        }
                        pending_fallback = 1;
                    }
                    "" => match chars.next() {
                        Some(escaped @ ('\\' | '{' | '}')) => push_text(&mut out, escaped, &mut pending_fallback),
                        Some('\'') => {
                            let hex: String = chars.by_ref().take(2).collect();
                            if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                                push_text(&mut out, windows1252_to_char(byte), &mut pending_fallback);
                            }
                        }
                        Some('*') => {
                            skip_depth.get_or_insert(depth);
                        }
                        Some('~') => push_text(&mut out, '\u{00A0}', &mut pending_fallback),
                        Some('\n' | '\r') => out.push('\n'),
                        _ => {}
                    },
                    other => trace!(control_word = other, "Ignored RTF control word"),
                }
            }
            '\r' | '\n' => {}
            _ if skip_depth.is_none() && !c.is_control() => push_text(&mut out, c, &mut pending_fallback),
            _ => {}
        }
    }

    if depth != 0 {
        return Err(InspectError::Unbalanced(format!("{} unclosed RTF group(s)", depth)));
    }

    Ok(out)
}

fn push_text(out: &mut String, c: char, pending_fallback: &mut usize) {
    if *pending_fallback > 0 {
        *pending_fallback -= 1;
    } else {
        out.push(c);
    }
}

fn trim_trailing_nuls(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}
