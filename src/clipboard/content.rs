//! Decoded Content
//!
//! The payload handed to a display collaborator. Each [`FormatKind`] maps to
//! one variant; `Text` and `HexDump` also serve as fallbacks when structured
//! decoding degrades.

use serde::Serialize;

use crate::clipboard::formats::{FormatKind, RawRepresentation};
use crate::codec::image::DecodedImage;
use crate::json::JsonNode;
use crate::link::LinkInfo;

/// Message shown for absent or empty payloads
pub const NO_DATA_MESSAGE: &str = "No data available for this format.";

/// Result of decoding one representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum DecodedContent {
    /// Decoded text, or a structured text report
    Text(String),

    /// Hex dump of content judged binary
    HexDump(String),

    /// Re-indented HTML wrapped in a document shell
    HtmlDocument(String),

    /// JSON link preview
    JsonTree {
        /// Display tree
        root: JsonNode,
        /// URL/title found in the tree
        link: LinkInfo,
        /// Re-indented source text
        formatted: String,
    },

    /// URL/title guess
    Link(LinkInfo),

    /// RTF source with a plain-text projection
    RichText {
        /// Source as decoded text
        raw: String,
        /// Readable text, if the source could be scanned
        plain: Option<String>,
    },

    /// Decodable image
    Image(DecodedImage),

    /// Bytes absent or empty
    NoData,

    /// Structured decode failed
    Malformed {
        /// What went wrong
        message: String,
        /// Best-effort rendering of the input
        raw: String,
    },
}

impl DecodedContent {
    /// Text view for a display collaborator
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) | Self::HexDump(text) | Self::HtmlDocument(text) => text.clone(),
            Self::JsonTree { link, formatted, .. } => {
                format!("{}\n\n{}", link.render(), formatted)
            }
            Self::Link(info) => info.render(),
            Self::RichText { raw, plain } => match plain {
                Some(plain) => format!("{}\n\n--- RTF source ---\n{}", plain, raw),
                None => raw.clone(),
            },
            Self::Image(image) => image.describe(),
            Self::NoData => NO_DATA_MESSAGE.to_string(),
            Self::Malformed { message, raw } => format!("Error: {}\n\n{}", message, raw),
        }
    }

    /// Whether decoding fell back to an error payload
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }

    /// Short variant name
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::HexDump(_) => "hex_dump",
            Self::HtmlDocument(_) => "html_document",
            Self::JsonTree { .. } => "json_tree",
            Self::Link(_) => "link",
            Self::RichText { .. } => "rich_text",
            Self::Image(_) => "image",
            Self::NoData => "no_data",
            Self::Malformed { .. } => "malformed",
        }
    }
}

/// Kind plus decoded content for one representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Inspection {
    /// Clipboard format ID
    pub format_id: u32,
    /// Format name
    pub format_name: String,
    /// Size reported by the source
    pub size_bytes: u32,
    /// Assigned kind
    pub kind: FormatKind,
    /// Decoded payload
    pub content: DecodedContent,
}

impl Inspection {
    /// Pair a representation with its decoded content
    pub fn new(rep: &RawRepresentation, kind: FormatKind, content: DecodedContent) -> Self {
        Self {
            format_id: rep.format_id,
            format_name: rep.format_name.clone(),
            size_bytes: rep.size_bytes,
            kind,
            content,
        }
    }

    /// Header line: name, ID, size, kind
    pub fn summary(&self) -> String {
        format!(
            "{} (ID: {}, {} bytes) [{}]",
            self.format_name, self.format_id, self.size_bytes, self.kind
        )
    }

    /// Header line followed by the rendered content
    pub fn render(&self) -> String {
        format!("{}\n{}", self.summary(), self.content.render())
    }
}
