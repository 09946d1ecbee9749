//! Format classification
//!
//! Maps a `(format_id, format_name, bytes)` triple to exactly one
//! [`FormatKind`]. Name substrings overlap ("HTML Format" vs
//! "text/x-moz-url" vs "Rich Text Format"), so the rules are an ordered
//! table and the first match wins:
//!
//! | # | Kind | Rule |
//! |---|------|------|
//! | 1 | `Image` | image format ID, or name contains bitmap/image/png/jpg/jpeg/gif/jfif/tiff |
//! | 2 | `HtmlLink` | titled-hyperlink ID/name, or name contains both "titled" and "hyperlink" |
//! | 3 | `JsonLink` | link-preview ID/name **and** bytes sniff as JSON |
//! | 4 | `Html` | name contains "html" |
//! | 5 | `RichText` | name contains "rich text" or "rtf" |
//! | 6 | `UnicodeText` | `CF_UNICODETEXT` or name contains "unicode" |
//! | 7 | `DataObject` | name contains "dataobject" |
//! | 8 | `OleData` | OLE private data / descriptor names |
//! | 9 | `Locale` | `CF_LOCALE` or name contains "locale" |
//! | 10 | `Link` | name contains link/hyperlink/url/uniformresourcelocator |
//! | 11 | `PlainText` | `CF_TEXT`, `CF_OEMTEXT`, or name contains "text" |
//! | 12 | `Generic` | everything else |
//!
//! Name matching is case-insensitive. Classification never fails.

use tracing::debug;

use crate::clipboard::formats::{
    FormatKind, FormatRegistry, CF_LOCALE, CF_OEMTEXT, CF_TEXT, CF_UNICODETEXT,
};
use crate::clipboard::RawRepresentation;
use crate::json::is_json_content;

const IMAGE_NAME_MARKERS: &[&str] = &["bitmap", "image", "png", "jpg", "jpeg", "gif", "jfif", "tiff"];
const RICH_TEXT_MARKERS: &[&str] = &["rich text", "rtf"];
const OLE_MARKERS: &[&str] = &[
    "ole private data",
    "oleprivatedata",
    "object descriptor",
    "link source",
    "embed source",
    "embedded object",
];
const LINK_MARKERS: &[&str] = &["link", "hyperlink", "url", "uniformresourcelocator"];

/// Everything a rule may look at
struct Candidate<'a> {
    format_id: u32,
    /// Lower-cased format name
    name: String,
    raw_name: &'a str,
    bytes: Option<&'a [u8]>,
    registry: &'a FormatRegistry,
}

impl Candidate<'_> {
    fn name_contains_any(&self, markers: &[&str]) -> bool {
        markers.iter().any(|m| self.name.contains(m))
    }
}

/// One entry of the precedence table
struct Rule {
    kind: FormatKind,
    matches: fn(&Candidate<'_>) -> bool,
}

/// Classification rules in precedence order. `Generic` is the fallback and
/// has no entry.
const RULES: &[Rule] = &[
    Rule {
        kind: FormatKind::Image,
        matches: |p| p.registry.is_image_id(p.format_id) || p.name_contains_any(IMAGE_NAME_MARKERS),
    },
    Rule {
        kind: FormatKind::HtmlLink,
        matches: |p| {
            p.registry.is_titled_hyperlink(p.format_id, p.raw_name)
                || (p.name.contains("titled") && p.name.contains("hyperlink"))
        },
    },
    Rule {
        kind: FormatKind::JsonLink,
        matches: |p| p.registry.is_link_preview(p.format_id, p.raw_name) && sniff_json(p.bytes),
    },
    Rule {
        kind: FormatKind::Html,
        matches: |p| p.name.contains("html"),
    },
    Rule {
        kind: FormatKind::RichText,
        matches: |p| p.name_contains_any(RICH_TEXT_MARKERS),
    },
    Rule {
        kind: FormatKind::UnicodeText,
        matches: |p| p.format_id == CF_UNICODETEXT || p.name.contains("unicode"),
    },
    Rule {
        kind: FormatKind::DataObject,
        matches: |p| p.name.contains("dataobject"),
    },
    Rule {
        kind: FormatKind::OleData,
        matches: |p| p.name_contains_any(OLE_MARKERS),
    },
    Rule {
        kind: FormatKind::Locale,
        matches: |p| p.format_id == CF_LOCALE || p.name.contains("locale"),
    },
    Rule {
        kind: FormatKind::Link,
        matches: |p| p.name_contains_any(LINK_MARKERS),
    },
    Rule {
        kind: FormatKind::PlainText,
        matches: |p| p.format_id == CF_TEXT || p.format_id == CF_OEMTEXT || p.name.contains("text"),
    },
];

/// Decode as UTF-8, drop trailing NULs, and run the JSON sniff test.
/// Bytes that are not UTF-8 are "not JSON".
fn sniff_json(bytes: Option<&[u8]>) -> bool {
    bytes
        .and_then(|b| std::str::from_utf8(b).ok())
        .map(|text| is_json_content(text.trim_end_matches('\0')))
        .unwrap_or(false)
}

/// Classify a representation by ID, name, and content
pub fn classify(
    registry: &FormatRegistry,
    format_id: u32,
    format_name: &str,
    bytes: Option<&[u8]>,
) -> FormatKind {
    let candidate = Candidate {
        format_id,
        name: format_name.to_lowercase(),
        raw_name: format_name,
        bytes,
        registry,
    };

    let kind = RULES
        .iter()
        .find(|rule| (rule.matches)(&candidate))
        .map(|rule| rule.kind)
        .unwrap_or(FormatKind::Generic);

    debug!(format_id, format_name, %kind, "Classified representation");
    kind
}

/// Classify a [`RawRepresentation`]
pub fn classify_representation(registry: &FormatRegistry, rep: &RawRepresentation) -> FormatKind {
    classify(registry, rep.format_id, &rep.format_name, rep.bytes.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::formats::{CF_DIB, CF_HDROP, CF_WAVE};

    fn kind(id: u32, name: &str, bytes: &[u8]) -> FormatKind {
        classify(&FormatRegistry::new(), id, name, Some(bytes))
    }

    #[test]
    fn test_image_precedes_html() {
        assert_eq!(kind(CF_DIB, "HTML Format", b"<b>x</b>"), FormatKind::Image);
        assert_eq!(kind(0xC010, "PNG", b"\x89PNG"), FormatKind::Image);
        assert_eq!(kind(0xC011, "image/jpeg", b""), FormatKind::Image);
    }

    #[test]
    fn test_titled_hyperlink() {
        assert_eq!(kind(0xC020, "Titled Hyperlink Format", b"x"), FormatKind::HtmlLink);
        assert_eq!(kind(0xC020, "TitledHyperlink", b"x"), FormatKind::HtmlLink);

        let registry = FormatRegistry {
            titled_hyperlink_id: Some(0xC021),
            ..FormatRegistry::default()
        };
        assert_eq!(
            classify(&registry, 0xC021, "Custom Format (49185)", None),
            FormatKind::HtmlLink
        );
    }

    #[test]
    fn test_link_preview_requires_json_content() {
        let json = br#"{"url":"https://example.com","title":"Example"}"#;
        assert_eq!(kind(0xC030, "Link Preview Format", json), FormatKind::JsonLink);

        let mut with_nul = json.to_vec();
        with_nul.extend_from_slice(&[0, 0]);
        assert_eq!(kind(0xC030, "Link Preview Format", &with_nul), FormatKind::JsonLink);

        // Falls through to the generic link rule
        assert_eq!(kind(0xC030, "Link Preview Format", b"plain"), FormatKind::Link);
        assert_eq!(
            kind(0xC030, "Link Preview Format", &[0xFF, 0xFE, 0x7B]),
            FormatKind::Link
        );
    }

    #[test]
    fn test_text_family() {
        assert_eq!(kind(0xC040, "HTML Format", b""), FormatKind::Html);
        assert_eq!(kind(0xC041, "text/html", b""), FormatKind::Html);
        assert_eq!(kind(0xC042, "Rich Text Format", b"{\\rtf1}"), FormatKind::RichText);
        assert_eq!(kind(CF_UNICODETEXT, "CF_UNICODETEXT", b"h\0"), FormatKind::UnicodeText);
        assert_eq!(kind(CF_TEXT, "CF_TEXT", b"h"), FormatKind::PlainText);
        assert_eq!(kind(CF_OEMTEXT, "CF_OEMTEXT", b"h"), FormatKind::PlainText);
        assert_eq!(kind(0xC043, "text/plain", b"h"), FormatKind::PlainText);
    }

    #[test]
    fn test_binary_structures() {
        assert_eq!(kind(0xC050, "DataObject", &[1, 2, 3, 4]), FormatKind::DataObject);
        assert_eq!(kind(0xC051, "Ole Private Data", &[0; 8]), FormatKind::OleData);
        assert_eq!(kind(0xC052, "Link Source", &[0; 8]), FormatKind::OleData);
        assert_eq!(kind(CF_LOCALE, "CF_LOCALE", &[9, 4, 0, 0]), FormatKind::Locale);
    }

    #[test]
    fn test_links_and_generic() {
        assert_eq!(kind(0xC060, "UniformResourceLocatorW", b"h"), FormatKind::Link);
        assert_eq!(kind(0xC061, "text/x-moz-url", b"h"), FormatKind::Link);
        assert_eq!(kind(CF_HDROP, "CF_HDROP", b"h"), FormatKind::Generic);
        assert_eq!(kind(CF_WAVE, "CF_WAVE", b"RIFF"), FormatKind::Generic);
    }

    #[test]
    fn test_rules_follow_documented_order() {
        let ordered: Vec<FormatKind> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(ordered, FormatKind::ALL[..FormatKind::ALL.len() - 1].to_vec());
    }
}
