//! Hex dump rendering
//!
//! ```text
//! 00000000: 48 65 6C 6C 6F 2C 20 77 6F 72 6C 64 21 00 00 00 | Hello, world!...
//! ```

use std::fmt::Write;

/// Default number of bytes rendered before truncating
pub const HEX_DUMP_LIMIT: usize = 4096;

const BYTES_PER_LINE: usize = 16;

/// Render up to [`HEX_DUMP_LIMIT`] bytes as `OFFSET: XX XX ... | ASCII`
pub fn hex_dump(bytes: &[u8]) -> String {
    hex_dump_with_limit(bytes, HEX_DUMP_LIMIT)
}

/// Render up to `limit` bytes, appending a notice for the remainder
pub fn hex_dump_with_limit(bytes: &[u8], limit: usize) -> String {
    let shown = &bytes[..bytes.len().min(limit)];
    let line_count = shown.len().div_ceil(BYTES_PER_LINE);
    let mut out = String::with_capacity(line_count * 78 + 64);

    for (line, chunk) in shown.chunks(BYTES_PER_LINE).enumerate() {
        if line > 0 {
            out.push('\n');
        }
        write!(out, "{:08X}: ", line * BYTES_PER_LINE).ok();

        for i in 0..BYTES_PER_LINE {
            match chunk.get(i) {
                Some(b) => write!(out, "{:02X} ", b).ok(),
                None => write!(out, "   ").ok(),
            };
        }

        out.push_str("| ");
        out.extend(chunk.iter().map(|&b| {
            if (0x20..=0x7E).contains(&b) {
                b as char
            } else {
                '.'
            }
        }));
    }

    if bytes.len() > shown.len() {
        write!(
            out,
            "\n... {} more bytes not shown ({} bytes total)",
            bytes.len() - shown.len(),
            bytes.len()
        )
        .ok();
    }

    out
}
