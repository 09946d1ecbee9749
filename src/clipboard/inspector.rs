//! Representation Inspector
//!
//! Classifies a representation and runs the decoder chain for its kind.
//! Chains are written as `Result` fallbacks; only this boundary turns an
//! error into a visible [`DecodedContent::Malformed`] payload, so one bad
//! representation never stops the others from being shown.

use tracing::{debug, warn};

use crate::clipboard::classify::classify;
use crate::clipboard::content::{DecodedContent, Inspection};
use crate::clipboard::error::InspectResult;
use crate::clipboard::formats::{FormatKind, FormatRegistry, RawRepresentation, CF_OEMTEXT, CF_TEXT};
use crate::codec::binary::{decode_as_integers, decode_locale, scan_for_guids};
use crate::codec::codepage::{decode_cp437, decode_windows1252};
use crate::codec::hexdump::hex_dump_with_limit;
use crate::codec::image::decode_image;
use crate::codec::rtf::rtf_to_text;
use crate::codec::text::{decode_best_effort, decode_text, decode_utf16le, decode_utf8, extract_null_terminated_strings, looks_binary};
use crate::config::{Config, InspectionConfig};
use crate::html::{decode_html_bytes, process_html};
use crate::json::{build_tree, extract_link_info, pretty_print};
use crate::link::{extract_html_anchor, extract_link};

/// Classifier plus decoder chains
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    registry: FormatRegistry,
    limits: InspectionConfig,
}

impl Inspector {
    /// Create an inspector with explicit registry and limits
    pub fn new(registry: FormatRegistry, limits: InspectionConfig) -> Self {
        Self { registry, limits }
    }

    /// Create an inspector from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.formats.registry(), config.inspection.clone())
    }

    /// Registered format IDs in use
    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Classify without decoding
    pub fn classify(&self, rep: &RawRepresentation) -> FormatKind {
        classify(&self.registry, rep.format_id, &rep.format_name, rep.bytes.as_deref())
    }

    /// Classify and decode one representation
    pub fn inspect(&self, rep: &RawRepresentation) -> Inspection {
        let kind = self.classify(rep);
        let content = self.decode(kind, rep);
        Inspection::new(rep, kind, content)
    }

    /// Inspect every representation, in order
    pub fn inspect_all(&self, reps: &[RawRepresentation]) -> Vec<Inspection> {
        reps.iter().map(|rep| self.inspect(rep)).collect()
    }

    /// Run the decoder chain for `kind`
    pub fn decode(&self, kind: FormatKind, rep: &RawRepresentation) -> DecodedContent {
        let Some(bytes) = rep.payload() else {
            debug!(format_id = rep.format_id, "No bytes to decode");
            return DecodedContent::NoData;
        };

        let result = match kind {
            FormatKind::Image => decode_image(bytes).map(DecodedContent::Image),
            FormatKind::HtmlLink => Ok(self.decode_html_link(bytes)),
            FormatKind::JsonLink => self.decode_json_link(bytes),
            FormatKind::Html => Ok(self.decode_html(bytes)),
            FormatKind::RichText => Ok(self.decode_rich_text(bytes)),
            FormatKind::UnicodeText => Ok(self.decode_unicode_text(bytes)),
            FormatKind::DataObject | FormatKind::OleData => Ok(DecodedContent::Text(self.binary_report(bytes))),
            FormatKind::Locale => decode_locale(bytes, self.limits.hex_dump_limit).map(DecodedContent::Text),
            FormatKind::Link => Ok(DecodedContent::Link(extract_link(bytes, self.limits.hex_dump_limit))),
            FormatKind::PlainText => Ok(self.decode_plain_text(rep.format_id, bytes)),
            FormatKind::Generic => Ok(self.text_or_hex(bytes)),
        };

        match result {
            Ok(content) => content,
            Err(e) => {
                warn!(format_id = rep.format_id, %kind, "Decode failed: {}", e);
                DecodedContent::Malformed {
                    message: e.to_string(),
                    raw: self.best_effort(bytes),
                }
            }
        }
    }

    fn hex(&self, bytes: &[u8]) -> String {
        hex_dump_with_limit(bytes, self.limits.hex_dump_limit)
    }

    /// Text if any candidate encoding fits, else a hex dump
    fn text_or_hex(&self, bytes: &[u8]) -> DecodedContent {
        match decode_text(bytes) {
            Ok(decoded) => DecodedContent::Text(decoded.text),
            Err(_) => DecodedContent::HexDump(self.hex(bytes)),
        }
    }

    fn best_effort(&self, bytes: &[u8]) -> String {
        decode_best_effort(bytes, self.limits.hex_dump_limit)
    }

    fn decode_unicode_text(&self, bytes: &[u8]) -> DecodedContent {
        decode_utf16le(bytes)
            .ok()
            .filter(|text| !looks_binary(text))
            .map(DecodedContent::Text)
            .unwrap_or_else(|| self.text_or_hex(bytes))
    }

    fn decode_plain_text(&self, format_id: u32, bytes: &[u8]) -> DecodedContent {
        let single_byte = match format_id {
            CF_OEMTEXT => Some(decode_cp437(bytes)),
            CF_TEXT => Some(
                decode_utf8(bytes)
                    .ok()
                    .filter(|text| !looks_binary(text))
                    .unwrap_or_else(|| decode_windows1252(bytes)),
            ),
            _ => None,
        };

        match single_byte.map(|text| text.trim_end_matches('\0').to_string()) {
            Some(text) if !looks_binary(&text) => DecodedContent::Text(text),
            _ => self.text_or_hex(bytes),
        }
    }

    fn decode_html(&self, bytes: &[u8]) -> DecodedContent {
        let base_indent = self.limits.html_base_indent;
        match decode_html_bytes(bytes) {
            Ok(text) => DecodedContent::HtmlDocument(process_html(text, base_indent)),
            Err(e) => {
                debug!("HTML payload is not UTF-8 ({}), trying other encodings", e);
                match decode_text(bytes) {
                    Ok(decoded) => DecodedContent::HtmlDocument(process_html(&decoded.text, base_indent)),
                    Err(_) => DecodedContent::HexDump(self.hex(bytes)),
                }
            }
        }
    }

    fn decode_html_link(&self, bytes: &[u8]) -> DecodedContent {
        let anchor = decode_text(bytes)
            .ok()
            .and_then(|decoded| extract_html_anchor(&decoded.text));

        match anchor {
            Some(info) => DecodedContent::Link(info),
            None => {
                debug!("No anchor in titled hyperlink, using link heuristics");
                DecodedContent::Link(extract_link(bytes, self.limits.hex_dump_limit))
            }
        }
    }

    fn decode_json_link(&self, bytes: &[u8]) -> InspectResult<DecodedContent> {
        let text = decode_utf8(bytes)?;
        let root = build_tree(&text)?;
        let link = extract_link_info(&root);

        Ok(DecodedContent::JsonTree {
            link,
            formatted: pretty_print(&text),
            root,
        })
    }

    fn decode_rich_text(&self, bytes: &[u8]) -> DecodedContent {
        let plain = rtf_to_text(bytes)
            .map_err(|e| debug!("RTF scan failed: {}", e))
            .ok();

        DecodedContent::RichText {
            raw: self.best_effort(bytes),
            plain,
        }
    }

    /// Diagnostic report for OLE and data-object blobs
    ///
    /// Integers (small buffers only), GUID candidates, embedded strings, and
    /// a hex dump.
    fn binary_report(&self, bytes: &[u8]) -> String {
        let mut out = format!("Size: {} bytes\n", bytes.len());

        if bytes.len() <= self.limits.integer_dump_max {
            out.push_str("\nIntegers (little-endian):\n");
            for (offset, value) in decode_as_integers(bytes) {
                out.push_str(&format!("  +{:04X}: {} (0x{:08X})\n", offset, value, value));
            }
        }

        let guids = scan_for_guids(bytes);
        if !guids.is_empty() {
            out.push_str("\nGUIDs:\n");
            for hit in &guids {
                out.push_str(&format!("  +{:04X}: {}\n", hit.offset, hit.guid));
            }
        }

        let strings = extract_null_terminated_strings(bytes);
        if !strings.is_empty() {
            out.push_str("\nStrings:\n");
            for s in &strings {
                out.push_str(&format!("  {:?}\n", s));
            }
        }

        out.push_str("\nHex dump:\n");
        out.push_str(&self.hex(bytes));
        out
    }
}
