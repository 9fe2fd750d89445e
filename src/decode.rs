use crate::blob::{Blob, ImageSource};
use crate::error::Result;
use crate::icondir::IconDir;
use crate::pngheader::PngHeader;
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// A PNG image extracted from an ICO file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct DecodedImage {
    width: u32,
    height: u32,
    bits_per_pixel: u32,
    data: Vec<u8>,
}

impl DecodedImage {
    /// Returns the width of the image, in pixels, as read from its PNG
    /// header.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels, as read from its PNG
    /// header.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    /// Returns the raw PNG data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Unwraps the raw PNG data.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Wraps the PNG data in a blob tagged `image/png`.
    pub fn into_blob(self) -> Blob {
        Blob::png(self.data)
    }
}

//===========================================================================//

/// Unpacks every PNG image from an ICO file, in directory order.  Widths and
/// heights come from each image's PNG header rather than the directory,
/// which stores 256 and up as zero.
///
/// Returns an error if the ICO signature is wrong, if the directory or any
/// image runs past the end of `data`, or if any image is not a valid PNG.
/// Nothing is returned on error.
///
/// The count comes from the 2-byte header field alone, so a file written
/// from exactly 65536 images (whose count wraps to zero) decodes to an empty
/// list.
pub fn decode(data: &[u8]) -> Result<Vec<DecodedImage>> {
    let icondir = IconDir::read(data)?;
    let mut images = Vec::<DecodedImage>::with_capacity(icondir.len());
    for (index, entry) in icondir.entries().iter().enumerate() {
        let start = entry.data_offset() as usize;
        let end = match start.checked_add(entry.data_size() as usize) {
            Some(end) if end <= data.len() => end,
            _ => invalid_format!(
                "Image {} data ({} bytes at offset {}) runs past end of \
                 file ({} bytes)",
                index,
                entry.data_size(),
                entry.data_offset(),
                data.len()
            ),
        };
        let payload = &data[start..end];
        let header = PngHeader::parse(payload)?;
        trace!(
            "Entry {}: {}x{} at {} bpp, {} bytes at offset {}",
            index,
            header.width(),
            header.height(),
            header.bits_per_pixel(),
            entry.data_size(),
            entry.data_offset()
        );
        images.push(DecodedImage {
            width: header.width(),
            height: header.height(),
            bits_per_pixel: header.bits_per_pixel(),
            data: payload.to_vec(),
        });
    }
    debug!("Decoded {} images from {} bytes", images.len(), data.len());
    Ok(images)
}

/// Reads `source` into memory and unpacks it as [`decode`] does.
pub fn decode_source<S: ImageSource + ?Sized>(
    source: &S,
) -> Result<Vec<DecodedImage>> {
    let data = source.read_bytes()?;
    decode(&data)
}

//===========================================================================//


//===========================================================================//
