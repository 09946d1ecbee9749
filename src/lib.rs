//! # clipboard-inspector
//!
//! Classifies the representations a clipboard offers and decodes each one
//! into a faithful, human-readable form.
//!
//! The crate is the decoding core only. Acquiring representations from a
//! live clipboard and displaying the result are left to collaborators; the
//! seam on the input side is [`clipboard::RepresentationSource`].
//!
//! # Architecture
//!
//! ```text
//! clipboard-inspector
//!   ├─> clipboard   (formats, classifier, Inspector, sources)
//!   ├─> codec       (hex dump, text encodings, locale/GUID scans, images, RTF)
//!   ├─> html        (fragment extraction, entity decoding, beautifier)
//!   ├─> json        (display tree, link discovery, pretty printer)
//!   └─> link        (URL/title extraction)
//! ```
//!
//! # Example
//!
//! ```rust
//! use clipboard_inspector::clipboard::{FormatKind, Inspector, RawRepresentation};
//!
//! let rep = RawRepresentation::new(16, "CF_LOCALE", vec![0x09, 0x04, 0x00, 0x00]);
//! let inspection = Inspector::default().inspect(&rep);
//!
//! assert_eq!(inspection.kind, FormatKind::Locale);
//! assert!(inspection.content.render().contains("en-US"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Clipboard representations, classification and the decoding pipeline
pub mod clipboard;

/// Byte-level decoders
pub mod codec;

/// Configuration
pub mod config;

/// HTML clipboard payloads
pub mod html;

/// JSON link-preview payloads
pub mod json;

/// Link extraction
pub mod link;

/// Utility functions
pub mod utils;
