use crate::blob::{Blob, ImageSource, ICON_MIME};
use crate::bytes;
use crate::error::{Error, Result};
use crate::icondir::{initial_data_offset, IconDirEntry, ICON_TYPE};
use crate::pngheader::PngHeader;
use byteorder::{LittleEndian, WriteBytesExt};
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::Write;

//===========================================================================//

/// The most images that one ICO file may hold.
pub const MAX_IMAGES: usize = 65536;

/// The largest width/height allowed when dimension limiting is on.
pub const MAX_DIMENSION: u32 = 256;

//===========================================================================//

/// Settings for building an ICO file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct EncodeOptions {
    limit_dimensions: bool,
    mime: String,
}

impl EncodeOptions {
    /// Creates the default options: images larger than 256x256 are rejected
    /// and the output is tagged `image/x-icon`.
    pub fn new() -> EncodeOptions {
        EncodeOptions { limit_dimensions: true, mime: ICON_MIME.to_string() }
    }

    /// Sets whether images wider or taller than 256 pixels are rejected.
    pub fn limit_dimensions(mut self, limit: bool) -> EncodeOptions {
        self.limit_dimensions = limit;
        self
    }

    /// Sets the MIME type of the output blob.
    pub fn mime<S: Into<String>>(mut self, mime: S) -> EncodeOptions {
        self.mime = mime.into();
        self
    }

    /// Returns true if images larger than 256x256 are rejected.
    pub fn limits_dimensions(&self) -> bool {
        self.limit_dimensions
    }

    /// Returns the MIME type of the output blob.
    pub fn mime_type(&self) -> &str {
        &self.mime
    }
}

impl Default for EncodeOptions {
    fn default() -> EncodeOptions {
        EncodeOptions::new()
    }
}

//===========================================================================//

/// Packs PNG images into an ICO file, in the order given.  If
/// `enforce_size_limit` is true, any image wider or taller than 256 pixels is
/// rejected; otherwise such images are stored with a directory width/height
/// of zero.
///
/// Returns an error if there are more than 65536 images, if any image is not
/// a PNG, or if an image is too large.  Nothing is returned on error.
///
/// The image count is a 2-byte field, so a full set of exactly 65536 images
/// is written with a count of zero, and [`decode`](crate::decode) reads such
/// a file back as an empty list.
pub fn encode<B: AsRef<[u8]>>(
    images: &[B],
    enforce_size_limit: bool,
) -> Result<Vec<u8>> {
    if images.len() > MAX_IMAGES {
        return Err(Error::TooManyImages {
            count: images.len(),
            max: MAX_IMAGES,
        });
    }
    let mut data_offset = initial_data_offset(images.len());
    let mut entries = Vec::<IconDirEntry>::with_capacity(images.len());
    for (index, image) in images.iter().enumerate() {
        let image = image.as_ref();
        let header = PngHeader::parse(image)?;
        if enforce_size_limit
            && (header.width() > MAX_DIMENSION
                || header.height() > MAX_DIMENSION)
        {
            return Err(Error::ImageTooLarge {
                index,
                width: header.width(),
                height: header.height(),
                max: MAX_DIMENSION,
            });
        }
        let entry = IconDirEntry::new(
            header.width(),
            header.height(),
            header.bits_per_pixel() as u16,
            image.len() as u32,
            data_offset as u32,
        );
        trace!(
            "Entry {}: {}x{} at {} bpp, {} bytes at offset {}",
            index,
            header.width(),
            header.height(),
            header.bits_per_pixel(),
            entry.data_size(),
            entry.data_offset()
        );
        entries.push(entry);
        data_offset += image.len();
    }

    let mut output = Vec::<u8>::with_capacity(data_offset);
    output.write_u16::<LittleEndian>(0)?; // reserved
    output.write_u16::<LittleEndian>(ICON_TYPE)?;
    // A full set of 65536 images wraps the count to zero.
    output.write_all(&bytes::encode_int(images.len() as u64, 2))?;
    for entry in entries.iter() {
        entry.write(&mut output)?;
    }
    for image in images.iter() {
        output.write_all(image.as_ref())?;
    }
    debug!("Encoded {} images into {} bytes", images.len(), output.len());
    Ok(output)
}

/// Like [`encode`], but with settings from `options`, returning the result
/// tagged with the configured MIME type.
pub fn encode_with<B: AsRef<[u8]>>(
    images: &[B],
    options: &EncodeOptions,
) -> Result<Blob> {
    let data = encode(images, options.limits_dimensions())?;
    Ok(Blob::new(data, options.mime_type()))
}

/// Reads each source into memory, in order, then packs them as [`encode`]
/// does.  The first source that fails to read aborts the whole operation.
pub fn encode_sources<S: ImageSource>(
    sources: &[S],
    options: &EncodeOptions,
) -> Result<Blob> {
    if sources.len() > MAX_IMAGES {
        return Err(Error::TooManyImages {
            count: sources.len(),
            max: MAX_IMAGES,
        });
    }
    let images = sources
        .iter()
        .map(|source| source.read_bytes())
        .collect::<std::io::Result<Vec<Vec<u8>>>>()?;
    encode_with(&images, options)
}

//===========================================================================//


//===========================================================================//
