//! Link representations
//!
//! Browsers and Office put links on the clipboard in many shapes: a bare
//! URL, `"title" url` pairs, `Title:` lines, UTF-16 blobs, or OLE-style
//! binary with NUL-terminated strings. Extraction here is heuristic and
//! returns the best URL/title guess along with the decoded text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::codec::hexdump::hex_dump_with_limit;
use crate::codec::text::{decode_utf16le, decode_utf8, extract_null_terminated_strings, looks_binary};
use crate::html::decode_entities;
use crate::utils::uri::is_absolute_uri;

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>()]+"#).expect("static regex"));

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#""([^"]+)""#).expect("static regex"));

static TITLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Title:\s*(.+)").expect("static regex"));

static ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#)
        .expect("static regex")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

/// Best-guess link target and title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkInfo {
    /// Link target
    pub url: Option<String>,
    /// Link title
    pub title: Option<String>,
    /// Text the guess was made from
    #[serde(skip_serializing_if = "String::is_empty")]
    pub raw_text: String,
}

impl LinkInfo {
    /// True if neither a URL nor a title was found
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.title.is_none()
    }

    /// Text view: URL and title lines, then the source text
    pub fn render(&self) -> String {
        let mut out = format!(
            "URL: {}\nTitle: {}",
            self.url.as_deref().unwrap_or("(none)"),
            self.title.as_deref().unwrap_or("(none)")
        );
        if !self.raw_text.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.raw_text);
        }
        out
    }
}

/// Decode link bytes as UTF-8, then UTF-16LE, else render a hex dump
fn decode_link_text(bytes: &[u8], hex_limit: usize) -> String {
    decode_utf8(bytes)
        .ok()
        .filter(|s| !looks_binary(s))
        .or_else(|| decode_utf16le(bytes).ok().filter(|s| !looks_binary(s)))
        .unwrap_or_else(|| hex_dump_with_limit(bytes, hex_limit))
}

/// Extract a URL/title pair from a link representation
///
/// The first `http(s)://` match in the decoded text is the URL. The title
/// is the first double-quoted substring, even when it repeats the URL,
/// else a `Title:` line. Without a URL in the text, NUL-terminated strings
/// are scanned for the first absolute URI, and the string after it becomes
/// the title. Undecodable text is shown as a hex dump of up to `hex_limit`
/// bytes.
pub fn extract_link(bytes: &[u8], hex_limit: usize) -> LinkInfo {
    let raw_text = decode_link_text(bytes, hex_limit);

    let mut url = URL.find(&raw_text).map(|m| m.as_str().to_string());
    let mut title = QUOTED
        .captures(&raw_text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .or_else(|| {
            TITLE_LINE
                .captures(&raw_text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim())
        })
        .map(str::to_string);

    if url.is_none() {
        let strings = extract_null_terminated_strings(bytes);
        if let Some(pos) = strings.iter().position(|s| is_absolute_uri(s)) {
            debug!(count = strings.len(), "Link URL found in NUL-terminated strings");
            url = Some(strings[pos].trim().to_string());
            if let Some(next) = strings.get(pos + 1) {
                title = Some(next.trim().to_string());
            }
        }
    }

    LinkInfo {
        url,
        title,
        raw_text,
    }
}

/// First `<a href="...">title</a>` anchor in an HTML snippet
///
/// The title is the anchor's inner text with tags stripped and character
/// references decoded.
pub fn extract_html_anchor(html: &str) -> Option<LinkInfo> {
    let caps = ANCHOR.captures(html)?;
    let url = caps.get(1).map(|m| decode_entities(m.as_str().trim()))?;
    let title = caps
        .get(2)
        .map(|m| decode_entities(TAG.replace_all(m.as_str(), "").trim()))
        .filter(|t| !t.is_empty());

    Some(LinkInfo {
        url: Some(url),
        title,
        raw_text: html.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::hexdump::HEX_DUMP_LIMIT;

    fn utf16z(parts: &[&str]) -> Vec<u8> {
        let mut out = Vec::new();
        for part in parts {
            out.extend(part.encode_utf16().flat_map(u16::to_le_bytes));
            out.extend_from_slice(&[0, 0]);
        }
        out
    }

    #[test]
    fn test_plain_url() {
        let info = extract_link(b"https://example.com/path?q=1\0", HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("https://example.com/path?q=1"));
        assert_eq!(info.title, None);
    }

    #[test]
    fn test_quoted_title() {
        let info = extract_link(br#"<https://example.com/a> "Example Page""#, HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("https://example.com/a"));
        assert_eq!(info.title.as_deref(), Some("Example Page"));
    }

    #[test]
    fn test_first_quoted_substring_is_title() {
        let info = extract_link(br#"href="https://example.com" "Docs""#, HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("https://example.com"));
        assert_eq!(info.title.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_title_line() {
        let info = extract_link(b"URL: http://example.org\r\nTitle:   Hello there\r\n", HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("http://example.org"));
        assert_eq!(info.title.as_deref(), Some("Hello there"));
    }

    #[test]
    fn test_utf16_url() {
        let info = extract_link(&utf16z(&["https://example.com/w"]), HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("https://example.com/w"));
    }

    #[test]
    fn test_fallback_after_small_integer_header() {
        let mut blob = vec![0x01, 0x00, 0x02, 0x03];
        blob.extend_from_slice(b"mailto:a@example.com\0Mail a\0");
        let info = extract_link(&blob, HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("mailto:a@example.com"));
        assert_eq!(info.title.as_deref(), Some("Mail a"));
    }

    #[test]
    fn test_binary_text_hex_dump_uses_limit() {
        // Invalid UTF-8 with an odd length fails both text decoders
        let blob = [0xFFu8; 47];
        let info = extract_link(&blob, 16);
        assert!(info.raw_text.starts_with("00000000: FF FF"));
        assert!(info.raw_text.ends_with("... 31 more bytes not shown (47 bytes total)"));
    }

    #[test]
    fn test_null_terminated_fallback() {
        let mut blob = vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x00];
        blob.extend_from_slice(b"mailto:someone@example.com\0Mail someone\0");
        let info = extract_link(&blob, HEX_DUMP_LIMIT);
        assert_eq!(info.url.as_deref(), Some("mailto:someone@example.com"));
        assert_eq!(info.title.as_deref(), Some("Mail someone"));
    }

    #[test]
    fn test_html_anchor() {
        let info = extract_html_anchor(
            r#"<p>See <A class="x" HREF='https://example.com/?a=1&amp;b=2'><b>The</b> Site</a></p>"#,
        )
        .unwrap();
        assert_eq!(info.url.as_deref(), Some("https://example.com/?a=1&b=2"));
        assert_eq!(info.title.as_deref(), Some("The Site"));
        assert!(extract_html_anchor("<p>no link</p>").is_none());
    }

    #[test]
    fn test_render() {
        let info = LinkInfo {
            url: Some("https://a.example".to_string()),
            title: None,
            raw_text: String::new(),
        };
        assert_eq!(info.render(), "URL: https://a.example\nTitle: (none)");
    }
}
