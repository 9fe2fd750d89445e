use crate::bytes;
#[cfg(feature = "serde")]
use crate::error::Error;
use crate::error::Result;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// The signature that all PNG files start with.
pub const PNG_SIGNATURE: &[u8] =
    &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

// The length field (always 13) and type tag of the IHDR chunk, which must
// come immediately after the signature.
const IHDR_PREFIX: &[u8] = &[0x00, 0x00, 0x00, 0x0d, b'I', b'H', b'D', b'R'];

// Byte positions of the IHDR fields we look at.
const WIDTH_OFFSET: usize = 16;
const HEIGHT_OFFSET: usize = 20;
const BIT_DEPTH_OFFSET: usize = 24;
const COLOR_TYPE_OFFSET: usize = 25;

// The number of leading bytes needed to read every field above.
const MIN_HEADER_LEN: usize = COLOR_TYPE_OFFSET + 1;

//===========================================================================//

/// The geometry of a PNG image, read from its IHDR chunk without decoding any
/// pixel data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPngHeader"))]
pub struct PngHeader {
    width: u32,
    height: u32,
    bits_per_channel: u8,
    color_type: u8,
}

// The unchecked field layout of `PngHeader`, validated on deserialization.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPngHeader {
    width: u32,
    height: u32,
    bits_per_channel: u8,
    color_type: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPngHeader> for PngHeader {
    type Error = Error;

    fn try_from(raw: RawPngHeader) -> Result<PngHeader> {
        PngHeader::new(
            raw.width,
            raw.height,
            raw.bits_per_channel,
            raw.color_type,
        )
    }
}

impl PngHeader {
    /// Returns true if `data` starts with the PNG signature.
    pub fn is_png(data: &[u8]) -> bool {
        data.starts_with(PNG_SIGNATURE)
    }

    /// Creates a header from its IHDR fields.  Returns an error if
    /// `color_type` is not one that PNG defines.
    pub fn new(
        width: u32,
        height: u32,
        bits_per_channel: u8,
        color_type: u8,
    ) -> Result<PngHeader> {
        if png::ColorType::from_u8(color_type).is_none() {
            invalid_format!("Unknown PNG colour type ({})", color_type);
        }
        Ok(PngHeader { width, height, bits_per_channel, color_type })
    }

    /// Parses the header of a PNG file.  Only the leading bytes of `data` are
    /// examined; anything after the IHDR fields is ignored.  Returns an error
    /// if the signature or IHDR chunk is missing, if `data` is too short, or
    /// if the colour type is not one that PNG defines.
    pub fn parse(data: &[u8]) -> Result<PngHeader> {
        if !PngHeader::is_png(data) {
            invalid_format!("Missing PNG signature");
        }
        if data.len() < MIN_HEADER_LEN {
            invalid_format!(
                "Truncated PNG header (was {} bytes, but must be at least {})",
                data.len(),
                MIN_HEADER_LEN
            );
        }
        if &data[PNG_SIGNATURE.len()..WIDTH_OFFSET] != IHDR_PREFIX {
            invalid_format!("PNG data does not start with an IHDR chunk");
        }
        let width = bytes::read_be(&data[WIDTH_OFFSET..HEIGHT_OFFSET]) as u32;
        let height =
            bytes::read_be(&data[HEIGHT_OFFSET..BIT_DEPTH_OFFSET]) as u32;
        PngHeader::new(
            width,
            height,
            data[BIT_DEPTH_OFFSET],
            data[COLOR_TYPE_OFFSET],
        )
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of bits per sample, as stored in the IHDR chunk.
    pub fn bits_per_channel(&self) -> u8 {
        self.bits_per_channel
    }

    /// Returns the raw colour type byte (one of 0, 2, 3, 4 or 6).
    pub fn color_type_byte(&self) -> u8 {
        self.color_type
    }

    /// Returns the colour type of the image.
    pub fn color_type(&self) -> png::ColorType {
        // Every constructor rejects bytes that don't map to a colour type.
        png::ColorType::from_u8(self.color_type)
            .unwrap_or(png::ColorType::Grayscale)
    }

    /// Returns the bit depth, or `None` if the IHDR chunk holds a value that
    /// PNG doesn't allow.
    pub fn bit_depth(&self) -> Option<png::BitDepth> {
        png::BitDepth::from_u8(self.bits_per_channel)
    }

    /// Returns the number of channels per pixel for the colour type.
    pub fn channels(&self) -> u32 {
        self.color_type().samples() as u32
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u32 {
        (self.bits_per_channel as u32) * self.channels()
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::PngHeader;
    use crate::error::ErrorKind;

    fn header(width: u32, height: u32, depth: u8, color_type: u8) -> Vec<u8> {
        let mut data = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[depth, color_type, 0, 0, 0]);
        data.extend_from_slice(&[0, 0, 0, 0]); // CRC, not checked
        data
    }

    #[test]
    fn parse_rgba_header() {
        let info = PngHeader::parse(&header(32, 16, 8, 6)).unwrap();
        assert_eq!(info.width(), 32);
        assert_eq!(info.height(), 16);
        assert_eq!(info.bits_per_channel(), 8);
        assert_eq!(info.color_type(), png::ColorType::Rgba);
        assert_eq!(info.bits_per_pixel(), 32);
    }

    #[test]
    fn dimensions_are_big_endian() {
        let info = PngHeader::parse(&header(256, 0x0001_0203, 8, 0)).unwrap();
        assert_eq!(info.width(), 256);
        assert_eq!(info.height(), 0x0001_0203);
    }

    #[test]
    fn bits_per_pixel_for_each_color_type() {
        let cases =
            [(0, 8, 8), (2, 8, 24), (3, 4, 4), (4, 16, 32), (6, 16, 64)];
        for &(color_type, depth, bpp) in cases.iter() {
            let info =
                PngHeader::parse(&header(1, 1, depth, color_type)).unwrap();
            assert_eq!(info.bits_per_pixel(), bpp, "type {}", color_type);
        }
    }

    #[test]
    fn reject_unknown_color_type() {
        for &color_type in &[1, 5, 7, 255] {
            let error =
                PngHeader::parse(&header(1, 1, 8, color_type)).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        }
    }

    #[test]
    fn new_validates_color_type() {
        let info = PngHeader::new(300, 20, 16, 4).unwrap();
        assert_eq!(info.color_type(), png::ColorType::GrayscaleAlpha);
        assert_eq!(info.bits_per_pixel(), 32);
        for &color_type in &[1, 5, 7, 255] {
            let error = PngHeader::new(1, 1, 8, color_type).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates_color_type() {
        let raw = super::RawPngHeader {
            width: 16,
            height: 16,
            bits_per_channel: 8,
            color_type: 5,
        };
        let error = PngHeader::try_from(raw).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn reject_missing_signature() {
        let mut data = header(1, 1, 8, 6);
        data[1] = b'Q';
        let error = PngHeader::parse(&data).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        assert!(!PngHeader::is_png(&data));
    }

    #[test]
    fn reject_missing_ihdr() {
        let mut data = header(1, 1, 8, 6);
        data[12..16].copy_from_slice(b"IDAT");
        let error = PngHeader::parse(&data).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn reject_truncated_header() {
        let data = header(1, 1, 8, 6);
        for len in [0, 8, 16, 25].iter() {
            let error = PngHeader::parse(&data[..*len]).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        }
        assert!(PngHeader::parse(&data[..26]).is_ok());
    }
}

//===========================================================================//
