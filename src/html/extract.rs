//! Fragment extraction for "HTML Format" payloads
//!
//! The payload starts with `Version:` / `StartHTML:` style header lines,
//! followed by a full document in which the copied selection is delimited
//! by `<!--StartFragment-->` and `<!--EndFragment-->`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::beautify::beautify_html;
use super::entities::decode_entities;
use crate::clipboard::error::{InspectError, InspectResult};

/// Default beautifier indent for fragment content (inside `<html><body>`)
pub const FRAGMENT_BASE_INDENT: usize = 2;

static FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!--StartFragment-->(.*?)<!--EndFragment-->").expect("static regex")
});

static NESTED_DOCUMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<html.*?>.*?<body.*?>(.*?)</body>.*?</html>").expect("static regex")
});

static BODY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<body.*?>(.*?)</body>").expect("static regex"));

static SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<span[^>]*>(.*?)</span>").expect("static regex"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Header lines and selected content of an HTML clipboard payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlFragment {
    /// Leading header lines, each already wrapped as `<!-- line -->`
    pub metadata: Vec<String>,
    /// Selected markup, before cleaning
    pub fragment: String,
}

/// Decode an HTML payload as UTF-8 with trailing NULs removed
pub fn decode_html_bytes(bytes: &[u8]) -> InspectResult<&str> {
    std::str::from_utf8(bytes)
        .map(|s| s.trim_end_matches('\0'))
        .map_err(|_| InspectError::InvalidUtf8)
}

/// Separate header lines from the document and locate the fragment
///
/// Header lines are the leading lines that do not start with `<`. The
/// fragment is the text between the fragment markers (narrowed to the
/// `<body>` of a nested document if there is one), else the `<body>` of the
/// whole text, else the whole text.
pub fn extract_fragment(text: &str) -> HtmlFragment {
    let metadata = text
        .lines()
        .map(str::trim)
        .take_while(|line| !line.starts_with('<'))
        .map(|line| format!("<!-- {} -->", line))
        .collect();

    let fragment = match FRAGMENT.captures(text).and_then(|c| c.get(1)) {
        Some(marked) => {
            let marked = marked.as_str();
            NESTED_DOCUMENT
                .captures(marked)
                .and_then(|c| c.get(1))
                .map_or(marked, |inner| inner.as_str())
        }
        None => {
            debug!("No fragment markers, falling back to <body>");
            BODY.captures(text)
                .and_then(|c| c.get(1))
                .map_or(text, |body| body.as_str())
        }
    };

    HtmlFragment {
        metadata,
        fragment: fragment.to_string(),
    }
}

/// Clean a fragment for display
///
/// Decodes character references. Syntax-highlighted source (inline
/// `color:` / `background-color:` styles) is rebuilt from its `<span>`
/// contents. Whitespace runs collapse to one space.
pub fn clean_fragment(fragment: &str) -> String {
    if fragment.trim().is_empty() {
        return fragment.to_string();
    }

    let decoded = decode_entities(fragment);

    let cleaned = if decoded.contains("style=\"color:") || decoded.contains("style=\"background-color:") {
        let rebuilt = rebuild_from_spans(&decoded);
        if rebuilt.trim().is_empty() {
            decoded
        } else {
            debug!("Rebuilt syntax-highlighted HTML from spans");
            rebuilt
        }
    } else {
        decoded
    };

    WHITESPACE.replace_all(&cleaned, " ").into_owned()
}

/// Concatenate span contents that are either a whole escaped tag or plain
/// text; spans mixing the two are dropped
fn rebuild_from_spans(html: &str) -> String {
    let mut out = String::new();

    for caps in SPAN.captures_iter(html) {
        let Some(content) = caps.get(1).map(|m| m.as_str().trim()) else {
            continue;
        };

        if content.starts_with("&lt;") && content.ends_with("&gt;") {
            out.push_str(&content.replace("&lt;", "<").replace("&gt;", ">"));
        } else if !content.contains("&lt;") && !content.contains("&gt;") {
            out.push_str(content);
        }
    }

    out
}

/// Full pipeline: fragment, clean, re-indent, wrap in a document shell
pub fn process_html(text: &str, base_indent: usize) -> String {
    let HtmlFragment { metadata, fragment } = extract_fragment(text);
    let cleaned = clean_fragment(&fragment);

    let mut out = String::new();
    for line in &metadata {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("<html>\n\t<head></head>\n\t<body>\n");
    out.push_str(&beautify_html(&cleaned, base_indent));
    out.push_str("\n\t</body>\n</html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_and_fragment() {
        let fragment = extract_fragment("meta1\nmeta2\n<!--StartFragment--><b>hi</b><!--EndFragment-->");
        assert_eq!(fragment.metadata, ["<!-- meta1 -->", "<!-- meta2 -->"]);
        assert_eq!(fragment.fragment, "<b>hi</b>");
    }

    #[test]
    fn test_nested_document_in_fragment() {
        let text = "<!--StartFragment--><html><head></head><BODY class=x>inner</BODY></html><!--EndFragment-->";
        assert_eq!(extract_fragment(text).fragment, "inner");
    }

    #[test]
    fn test_body_fallback_and_verbatim() {
        assert_eq!(
            extract_fragment("<html><body>\n<p>x</p>\n</body></html>").fragment,
            "\n<p>x</p>\n"
        );
        assert_eq!(extract_fragment("<p>loose</p>").fragment, "<p>loose</p>");
        assert!(extract_fragment("<p>loose</p>").metadata.is_empty());
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_fragment("<p>a \n\t b &amp; c</p>"), "<p>a b & c</p>");
    }

    #[test]
    fn test_clean_rebuilds_highlighted_source() {
        let html = concat!(
            r#"<div style="color: #d4d4d4;">"#,
            r#"<span style="color:#808080;">&amp;lt;p&amp;gt;</span>"#,
            r#"<span style="color:#d4d4d4;">Hello</span>"#,
            r#"<span style="color:#808080;">&amp;lt;/p&amp;gt;</span>"#,
            r#"<span style="color:#808080;">a &amp;lt; b</span>"#,
            "</div>"
        );
        assert_eq!(clean_fragment(html), "<p>Hello</p>");
    }

    #[test]
    fn test_process_html() {
        let out = process_html(
            "Version:0.9\r\nStartHTML:00000097\r\n<html><body><!--StartFragment--><b>hi</b><!--EndFragment--></body></html>",
            FRAGMENT_BASE_INDENT,
        );
        assert_eq!(
            out,
            "<!-- Version:0.9 -->\n<!-- StartHTML:00000097 -->\n<html>\n\t<head></head>\n\t<body>\n\n\t\t<b>\n\t\t\thi\n\t\t</b>\n\t</body>\n</html>"
        );
    }

    #[test]
    fn test_decode_bytes() {
        assert_eq!(decode_html_bytes(b"<p>x</p>\0\0").unwrap(), "<p>x</p>");
        assert!(decode_html_bytes(&[0x3C, 0xFF]).is_err());
    }
}
