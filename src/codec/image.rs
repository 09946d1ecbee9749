//! Clipboard image conversion
//!
//! `CF_DIB` / `CF_DIBV5` payloads are bitmap files without the 14-byte file
//! header. [`dib_to_bitmap`] synthesizes that header so a regular image
//! decoder can read the result; [`decode_image`] tries the synthesized
//! bitmap first and the raw bytes second.

use bytes::{BufMut, BytesMut};
use serde::Serialize;
use tracing::debug;

use crate::clipboard::error::InspectResult;

/// Size of the BITMAPFILEHEADER
pub const BITMAP_FILE_HEADER_LEN: usize = 14;

/// BITMAPINFOHEADER size assumed when the payload is too short to say
const DEFAULT_DIB_HEADER_LEN: u32 = 40;

/// Prepend a bitmap file header to a DIB payload
///
/// File size is the payload length plus 14; the pixel offset is 14 plus the
/// DIB header size stored in the first four payload bytes. The header size
/// is taken on trust, so a malformed DIB yields a bitmap whose pixel offset
/// points past the data.
pub fn dib_to_bitmap(dib: &[u8]) -> Vec<u8> {
    let header_len = dib
        .get(..4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .unwrap_or(DEFAULT_DIB_HEADER_LEN);

    let file_size = (dib.len() as u32).wrapping_add(BITMAP_FILE_HEADER_LEN as u32);
    let pixel_offset = header_len.wrapping_add(BITMAP_FILE_HEADER_LEN as u32);

    let mut bmp = BytesMut::with_capacity(BITMAP_FILE_HEADER_LEN + dib.len());

    // BITMAPFILEHEADER
    bmp.put_slice(b"BM");
    bmp.put_u32_le(file_size);
    bmp.put_u16_le(0);
    bmp.put_u16_le(0);
    bmp.put_u32_le(pixel_offset);

    bmp.put_slice(dib);

    bmp.to_vec()
}

/// Image ready for a display collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedImage {
    /// Self-contained image file bytes (synthesized bitmap or the raw payload)
    #[serde(skip)]
    pub data: Vec<u8>,
    /// Container format the decoder recognized, e.g. `Bmp` or `Png`
    pub encoding: String,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Decode an image representation
///
/// Tries the payload as a DIB (with a synthesized header), then as an
/// already self-contained image file.
pub fn decode_image(bytes: &[u8]) -> InspectResult<DecodedImage> {
    try_decode(dib_to_bitmap(bytes)).or_else(|e| {
        debug!("Not a DIB ({}), trying raw image bytes", e);
        try_decode(bytes.to_vec())
    })
}

fn try_decode(data: Vec<u8>) -> InspectResult<DecodedImage> {
    let format = image::guess_format(&data)?;
    let image = image::load_from_memory_with_format(&data, format)?;

    Ok(DecodedImage {
        encoding: format!("{:?}", format),
        width: image.width(),
        height: image.height(),
        data,
    })
}

impl DecodedImage {
    /// One-line summary
    pub fn describe(&self) -> String {
        format!(
            "{} image, {}x{} pixels, {} bytes",
            self.encoding,
            self.width,
            self.height,
            self.data.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::error::InspectError;

    /// 2x1 24-bit bottom-up DIB: BITMAPINFOHEADER + one padded row
    fn tiny_dib() -> Vec<u8> {
        let mut dib = Vec::new();
        dib.extend_from_slice(&40u32.to_le_bytes());
        dib.extend_from_slice(&2i32.to_le_bytes());
        dib.extend_from_slice(&1i32.to_le_bytes());
        dib.extend_from_slice(&1u16.to_le_bytes());
        dib.extend_from_slice(&24u16.to_le_bytes());
        dib.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
        dib.extend_from_slice(&8u32.to_le_bytes());
        dib.extend_from_slice(&2835i32.to_le_bytes());
        dib.extend_from_slice(&2835i32.to_le_bytes());
        dib.extend_from_slice(&0u32.to_le_bytes());
        dib.extend_from_slice(&0u32.to_le_bytes());
        // Blue, red, row padding
        dib.extend_from_slice(&[0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00]);
        dib
    }

    #[test]
    fn test_header_fields() {
        let dib = tiny_dib();
        let bmp = dib_to_bitmap(&dib);
        assert_eq!(bmp.len(), dib.len() + 14);
        assert_eq!(&bmp[..2], b"BM");
        assert_eq!(u32::from_le_bytes([bmp[2], bmp[3], bmp[4], bmp[5]]), (dib.len() + 14) as u32);
        assert_eq!(&bmp[6..10], &[0, 0, 0, 0]);
        assert_eq!(u32::from_le_bytes([bmp[10], bmp[11], bmp[12], bmp[13]]), 54);
        assert_eq!(&bmp[14..], &dib[..]);
    }

    #[test]
    fn test_short_payload_defaults_header_len() {
        let bmp = dib_to_bitmap(&[1, 2]);
        assert_eq!(bmp.len(), 16);
        assert_eq!(u32::from_le_bytes([bmp[10], bmp[11], bmp[12], bmp[13]]), 54);
    }

    #[test]
    fn test_v5_header_offset() {
        let mut dib = 124u32.to_le_bytes().to_vec();
        dib.resize(130, 0);
        let bmp = dib_to_bitmap(&dib);
        assert_eq!(u32::from_le_bytes([bmp[10], bmp[11], bmp[12], bmp[13]]), 138);
    }

    #[test]
    fn test_decode_dib() {
        let image = decode_image(&tiny_dib()).unwrap();
        assert_eq!(image.encoding, "Bmp");
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(&image.data[..2], b"BM");
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, InspectError::ImageDecode(_)));
    }
}
