//! Byte-level decoders
//!
//! Leaf transforms over one representation's bytes:
//!
//! - [`hexdump`] - fixed-width hex + ASCII rendering
//! - [`text`] - best-effort text decoding and NUL-terminated string scanning
//! - [`codepage`] - Windows-1252 and CP437 single-byte tables
//! - [`binary`] - locale IDs, GUID scanning, integer dumps
//! - [`image`] - DIB → bitmap file synthesis and image decoding
//! - [`rtf`] - plain-text projection of RTF
//!
//! Every function here is pure and allocation-only.

pub mod binary;
pub mod codepage;
pub mod hexdump;
pub mod image;
pub mod rtf;
pub mod text;

pub use binary::{decode_as_integers, decode_locale, locale_name, scan_for_guids, GuidHit};
pub use hexdump::{hex_dump, hex_dump_with_limit, HEX_DUMP_LIMIT};
pub use image::{decode_image, dib_to_bitmap, DecodedImage};
pub use rtf::rtf_to_text;
pub use text::{
    decode_best_effort, decode_text, extract_null_terminated_strings, looks_binary, DecodedText,
    TextEncoding,
};
