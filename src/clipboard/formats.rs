//! Clipboard format identifiers and raw representations.
//!
//! A clipboard offers the same logical content under several formats. Each
//! one reaches this crate as a [`RawRepresentation`]: an integer format ID,
//! a format name, and the bytes read from the handle (if it could be locked).

use serde::Serialize;
use std::fmt;
use std::path::Path;

// =============================================================================
// Windows Clipboard Format IDs
// =============================================================================

/// Standard Windows clipboard format: ANSI text (Windows-1252 codepage)
pub const CF_TEXT: u32 = 1;

/// Standard Windows clipboard format: GDI bitmap handle
pub const CF_BITMAP: u32 = 2;

/// Standard Windows clipboard format: Metafile picture
pub const CF_METAFILEPICT: u32 = 3;

/// Standard Windows clipboard format: Symbolic link (SYLK)
pub const CF_SYLK: u32 = 4;

/// Standard Windows clipboard format: Data Interchange Format
pub const CF_DIF: u32 = 5;

/// Standard Windows clipboard format: Tagged image file
pub const CF_TIFF: u32 = 6;

/// Standard Windows clipboard format: OEM text (DOS codepage)
pub const CF_OEMTEXT: u32 = 7;

/// Standard Windows clipboard format: Device-independent bitmap
pub const CF_DIB: u32 = 8;

/// Standard Windows clipboard format: Color palette
pub const CF_PALETTE: u32 = 9;

/// Standard Windows clipboard format: Pen data
pub const CF_PENDATA: u32 = 10;

/// Standard Windows clipboard format: RIFF audio
pub const CF_RIFF: u32 = 11;

/// Standard Windows clipboard format: Wave audio
pub const CF_WAVE: u32 = 12;

/// Standard Windows clipboard format: Unicode text (UTF-16LE)
pub const CF_UNICODETEXT: u32 = 13;

/// Standard Windows clipboard format: Enhanced metafile
pub const CF_ENHMETAFILE: u32 = 14;

/// Standard Windows clipboard format: File drop list
pub const CF_HDROP: u32 = 15;

/// Standard Windows clipboard format: Locale identifier for CF_TEXT
pub const CF_LOCALE: u32 = 16;

/// Standard Windows clipboard format: DIBV5 (124-byte header, alpha)
pub const CF_DIBV5: u32 = 17;

/// First ID past the standard formats
pub const CF_MAX: u32 = 18;

/// Owner-display format
pub const CF_OWNERDISPLAY: u32 = 0x0080;

/// Private text display format
pub const CF_DSPTEXT: u32 = 0x0081;

/// Private bitmap display format
pub const CF_DSPBITMAP: u32 = 0x0082;

/// Private metafile display format
pub const CF_DSPMETAFILEPICT: u32 = 0x0083;

/// Private enhanced metafile display format
pub const CF_DSPENHMETAFILE: u32 = 0x008E;

/// Format IDs that always carry image data
pub const IMAGE_FORMAT_IDS: &[u32] = &[CF_BITMAP, CF_TIFF, CF_DIB, CF_DIBV5];

// =============================================================================
// Registered Format Names
// =============================================================================

/// Registered format name: hyperlink with a display title
pub const TITLED_HYPERLINK_FORMAT: &str = "TitledHyperlink";

/// Registered format name: JSON link preview (browser copy-link)
pub const LINK_PREVIEW_FORMAT: &str = "Link Preview Format";

/// Name of a standard (predefined) clipboard format
pub fn standard_format_name(format_id: u32) -> Option<&'static str> {
    let name = match format_id {
        CF_TEXT => "CF_TEXT",
        CF_BITMAP => "CF_BITMAP",
        CF_METAFILEPICT => "CF_METAFILEPICT",
        CF_SYLK => "CF_SYLK",
        CF_DIF => "CF_DIF",
        CF_TIFF => "CF_TIFF",
        CF_OEMTEXT => "CF_OEMTEXT",
        CF_DIB => "CF_DIB",
        CF_PALETTE => "CF_PALETTE",
        CF_PENDATA => "CF_PENDATA",
        CF_RIFF => "CF_RIFF",
        CF_WAVE => "CF_WAVE",
        CF_UNICODETEXT => "CF_UNICODETEXT",
        CF_ENHMETAFILE => "CF_ENHMETAFILE",
        CF_HDROP => "CF_HDROP",
        CF_LOCALE => "CF_LOCALE",
        CF_DIBV5 => "CF_DIBV5",
        CF_OWNERDISPLAY => "CF_OWNERDISPLAY",
        CF_DSPTEXT => "CF_DSPTEXT",
        CF_DSPBITMAP => "CF_DSPBITMAP",
        CF_DSPMETAFILEPICT => "CF_DSPMETAFILEPICT",
        CF_DSPENHMETAFILE => "CF_DSPENHMETAFILE",
        _ => return None,
    };
    Some(name)
}

/// Resolve the display name for a format ID
///
/// Standard formats use their `CF_*` name. Registered formats use the name
/// the acquisition layer looked up, if any.
pub fn resolve_format_name(format_id: u32, registered_name: Option<&str>) -> String {
    if let Some(name) = standard_format_name(format_id) {
        return name.to_string();
    }
    if format_id < CF_MAX {
        return format!("Unknown Format ({})", format_id);
    }
    match registered_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Custom Format ({})", format_id),
    }
}

// =============================================================================
// Raw Representation
// =============================================================================

/// One typed byte payload offered by the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRepresentation {
    /// Clipboard format ID
    pub format_id: u32,
    /// Format name (standard or registered)
    pub format_name: String,
    /// Size reported by the source handle
    pub size_bytes: u32,
    /// Bytes read from the handle, `None` when the handle could not be locked
    pub bytes: Option<Vec<u8>>,
}

impl RawRepresentation {
    /// Create a representation carrying bytes
    pub fn new(format_id: u32, format_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            format_id,
            format_name: format_name.into(),
            size_bytes: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
            bytes: Some(bytes),
        }
    }

    /// Create a representation whose handle could not be read
    pub fn absent(format_id: u32, format_name: impl Into<String>, size_bytes: u32) -> Self {
        Self {
            format_id,
            format_name: format_name.into(),
            size_bytes,
            bytes: None,
        }
    }

    /// Read a representation's bytes from a file
    pub fn from_file(
        format_id: u32,
        format_name: Option<&str>,
        path: impl AsRef<Path>,
    ) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(
            format_id,
            resolve_format_name(format_id, format_name),
            bytes,
        ))
    }

    /// Payload bytes, or `None` for the "no data" case (absent or empty)
    pub fn payload(&self) -> Option<&[u8]> {
        self.bytes.as_deref().filter(|b| !b.is_empty())
    }
}

// =============================================================================
// Format Kind
// =============================================================================

/// Classification assigned to a representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatKind {
    /// 8-bit text (CF_TEXT, CF_OEMTEXT, text-like names)
    PlainText,
    /// UTF-16LE text (CF_UNICODETEXT)
    UnicodeText,
    /// HTML clipboard payload
    Html,
    /// Hyperlink with title
    HtmlLink,
    /// JSON link preview
    JsonLink,
    /// Free-form or binary link payload
    Link,
    /// Rich Text Format
    RichText,
    /// Bitmap or encoded image
    Image,
    /// OLE private data blob
    OleData,
    /// COM data object blob
    DataObject,
    /// Locale identifier
    Locale,
    /// Anything else
    Generic,
}

impl FormatKind {
    /// Every kind, in classification precedence order
    pub const ALL: [FormatKind; 12] = [
        FormatKind::Image,
        FormatKind::HtmlLink,
        FormatKind::JsonLink,
        FormatKind::Html,
        FormatKind::RichText,
        FormatKind::UnicodeText,
        FormatKind::DataObject,
        FormatKind::OleData,
        FormatKind::Locale,
        FormatKind::Link,
        FormatKind::PlainText,
        FormatKind::Generic,
    ];

    /// Short display label
    pub fn label(self) -> &'static str {
        match self {
            Self::PlainText => "Plain Text",
            Self::UnicodeText => "Unicode Text",
            Self::Html => "HTML",
            Self::HtmlLink => "HTML Link",
            Self::JsonLink => "JSON Link",
            Self::Link => "Link",
            Self::RichText => "Rich Text",
            Self::Image => "Image",
            Self::OleData => "OLE Data",
            Self::DataObject => "Data Object",
            Self::Locale => "Locale",
            Self::Generic => "Generic",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Registered Format IDs
// =============================================================================

/// Session-specific IDs of registered formats the classifier keys on
///
/// Registered IDs are assigned at runtime by the OS, so they are optional.
/// When an ID is unknown the registered name is matched instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatRegistry {
    /// ID of the titled-hyperlink format
    pub titled_hyperlink_id: Option<u32>,
    /// ID of the link-preview format
    pub link_preview_id: Option<u32>,
    /// Additional IDs treated as images (e.g. registered "PNG")
    pub extra_image_ids: Vec<u32>,
}

impl FormatRegistry {
    /// Registry with no session-specific IDs
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the ID always carries image data
    pub fn is_image_id(&self, format_id: u32) -> bool {
        IMAGE_FORMAT_IDS.contains(&format_id) || self.extra_image_ids.contains(&format_id)
    }

    /// Whether the representation is the titled-hyperlink format
    pub fn is_titled_hyperlink(&self, format_id: u32, format_name: &str) -> bool {
        self.titled_hyperlink_id == Some(format_id)
            || format_name.eq_ignore_ascii_case(TITLED_HYPERLINK_FORMAT)
    }

    /// Whether the representation is the link-preview format
    pub fn is_link_preview(&self, format_id: u32, format_name: &str) -> bool {
        self.link_preview_id == Some(format_id)
            || format_name.eq_ignore_ascii_case(LINK_PREVIEW_FORMAT)
    }
}
