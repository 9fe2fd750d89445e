use crate::bytes;
use crate::error::Result;
use byteorder::{LittleEndian, WriteBytesExt};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

//===========================================================================//

/// The size of the ICONDIR header at the start of an ICO file, in bytes.
pub const FILE_HEADER_LEN: usize = 6;

/// The size of each ICONDIRENTRY record, in bytes.
pub const DIR_ENTRY_LEN: usize = 16;

/// The ICONDIR resource type for icons.
pub const ICON_TYPE: u16 = 1;

// The reserved field followed by the icon resource type, little-endian.
pub(crate) const ICO_SIGNATURE: &[u8] = &[0x00, 0x00, 0x01, 0x00];

/// Returns the byte offset at which image data starts in an ICO file holding
/// `num_images` images.
pub fn initial_data_offset(num_images: usize) -> usize {
    FILE_HEADER_LEN + DIR_ENTRY_LEN * num_images
}

//===========================================================================//

/// One ICONDIRENTRY record, describing where a single image lives in an ICO
/// file.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDirEntry {
    width_byte: u8,
    height_byte: u8,
    num_colors: u8,
    reserved: u8,
    color_planes: u16,
    bits_per_pixel: u16,
    data_size: u32,
    data_offset: u32,
}

impl IconDirEntry {
    /// Creates an entry for a PNG image with the given geometry.  A width or
    /// height of 256 or more is stored as zero.
    pub fn new(
        width: u32,
        height: u32,
        bits_per_pixel: u16,
        data_size: u32,
        data_offset: u32,
    ) -> IconDirEntry {
        IconDirEntry {
            width_byte: dimension_byte(width),
            height_byte: dimension_byte(height),
            num_colors: 0,
            reserved: 0,
            color_planes: 1,
            bits_per_pixel,
            data_size,
            data_offset,
        }
    }

    /// Parses one record from the first 16 bytes of `data`.  Returns an error
    /// if `data` is shorter than that.
    pub fn read(data: &[u8]) -> Result<IconDirEntry> {
        if data.len() < DIR_ENTRY_LEN {
            invalid_format!(
                "Truncated ICONDIRENTRY (was {} bytes, but must be {})",
                data.len(),
                DIR_ENTRY_LEN
            );
        }
        Ok(IconDirEntry {
            width_byte: data[0],
            height_byte: data[1],
            num_colors: data[2],
            reserved: data[3],
            color_planes: bytes::read_le(&data[4..6]) as u16,
            bits_per_pixel: bytes::read_le(&data[6..8]) as u16,
            data_size: bytes::read_le(&data[8..12]) as u32,
            data_offset: bytes::read_le(&data[12..16]) as u32,
        })
    }

    /// Writes this record as 16 little-endian bytes.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.width_byte)?;
        writer.write_u8(self.height_byte)?;
        writer.write_u8(self.num_colors)?;
        writer.write_u8(self.reserved)?;
        writer.write_u16::<LittleEndian>(self.color_planes)?;
        writer.write_u16::<LittleEndian>(self.bits_per_pixel)?;
        writer.write_u32::<LittleEndian>(self.data_size)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        Ok(())
    }

    /// Returns the width stored in the directory, in pixels.  The directory
    /// can only hold widths up to 256, so for larger images the PNG header is
    /// the only reliable source.
    pub fn width(&self) -> u32 {
        sentinel_dimension(self.width_byte)
    }

    /// Returns the height stored in the directory, in pixels.  See
    /// [`IconDirEntry::width`].
    pub fn height(&self) -> u32 {
        sentinel_dimension(self.height_byte)
    }

    /// Returns the raw width byte (zero for 256 and larger).
    pub fn width_byte(&self) -> u8 {
        self.width_byte
    }

    /// Returns the raw height byte (zero for 256 and larger).
    pub fn height_byte(&self) -> u8 {
        self.height_byte
    }

    /// Returns the palette size field (zero for PNG images).
    pub fn num_colors(&self) -> u8 {
        self.num_colors
    }

    /// Returns the color plane count field.
    pub fn color_planes(&self) -> u16 {
        self.color_planes
    }

    /// Returns the bits-per-pixel (color depth) stored in the directory.
    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Returns the length of the image data, in bytes.
    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Returns the offset of the image data from the start of the file.
    pub fn data_offset(&self) -> u32 {
        self.data_offset
    }
}

// A width/height byte of zero indicates a size of 256 or more.
fn dimension_byte(dimension: u32) -> u8 {
    if dimension > 255 {
        0
    } else {
        dimension as u8
    }
}

fn sentinel_dimension(byte: u8) -> u32 {
    if byte == 0 {
        256
    } else {
        byte as u32
    }
}

//===========================================================================//

/// The header and directory of an ICO file, without the image data.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconDir {
    entries: Vec<IconDirEntry>,
}

impl IconDir {
    /// Parses the header and directory of an ICO file.  Returns an error if
    /// the signature is wrong or the directory runs past the end of `data`.
    /// The image data itself is not examined.
    pub fn read(data: &[u8]) -> Result<IconDir> {
        if !data.starts_with(ICO_SIGNATURE) {
            invalid_format!("Missing ICO signature");
        }
        if data.len() < FILE_HEADER_LEN {
            invalid_format!(
                "Truncated ICONDIR (was {} bytes, but must be {})",
                data.len(),
                FILE_HEADER_LEN
            );
        }
        let num_entries = bytes::read_le(&data[4..6]) as usize;
        let dir_end = initial_data_offset(num_entries);
        if data.len() < dir_end {
            invalid_format!(
                "Truncated directory (has room for {} of {} entries)",
                (data.len() - FILE_HEADER_LEN) / DIR_ENTRY_LEN,
                num_entries
            );
        }
        let entries = data[FILE_HEADER_LEN..dir_end]
            .chunks_exact(DIR_ENTRY_LEN)
            .map(IconDirEntry::read)
            .collect::<Result<Vec<IconDirEntry>>>()?;
        Ok(IconDir { entries })
    }

    /// Returns the entries in this directory, in file order.
    pub fn entries(&self) -> &[IconDirEntry] {
        &self.entries
    }

    /// Returns the number of images in the directory.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the directory holds no images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{initial_data_offset, IconDir, IconDirEntry};
    use crate::error::ErrorKind;

    #[test]
    fn read_empty_icon_set() {
        let input = b"\x00\x00\x01\x00\x00\x00";
        let icondir = IconDir::read(input).unwrap();
        assert!(icondir.is_empty());
    }

    #[test]
    fn reject_cursor_set() {
        let input = b"\x00\x00\x02\x00\x00\x00";
        let error = IconDir::read(input).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn reject_zero_signature() {
        let error = IconDir::read(b"\x00\x00\x00\x00\x00\x00").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
        let error = IconDir::read(b"\x00\x00").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn reject_truncated_directory() {
        let input: &[u8] = b"\
            \x00\x00\x01\x00\x02\x00\
            \x20\x20\x00\x00\x01\x00\x20\x00\
            \x10\x00\x00\x00\x26\x00\x00\x00";
        let error = IconDir::read(input).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn read_directory_entry() {
        let input: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \x00\x10\x00\x00\x01\x00\x20\x00\
            \x34\x12\x00\x00\x16\x00\x00\x00";
        let icondir = IconDir::read(input).unwrap();
        assert_eq!(icondir.len(), 1);
        let entry = &icondir.entries()[0];
        assert_eq!(entry.width_byte(), 0);
        assert_eq!(entry.width(), 256);
        assert_eq!(entry.height(), 16);
        assert_eq!(entry.color_planes(), 1);
        assert_eq!(entry.bits_per_pixel(), 32);
        assert_eq!(entry.data_size(), 0x1234);
        assert_eq!(entry.data_offset(), 22);
    }

    #[test]
    fn write_directory_entry() {
        let entry = IconDirEntry::new(32, 300, 24, 0x0102_0304, 38);
        let mut output = Vec::<u8>::new();
        entry.write(&mut output).unwrap();
        let expected: &[u8] = b"\
            \x20\x00\x00\x00\x01\x00\x18\x00\
            \x04\x03\x02\x01\x26\x00\x00\x00";
        assert_eq!(output.as_slice(), expected);
        assert_eq!(IconDirEntry::read(&output).unwrap(), entry);
    }

    #[test]
    fn dimension_256_is_zero() {
        let entry = IconDirEntry::new(256, 255, 32, 0, 0);
        assert_eq!(entry.width_byte(), 0);
        assert_eq!(entry.height_byte(), 255);
    }

    #[test]
    fn data_offsets() {
        assert_eq!(initial_data_offset(0), 6);
        assert_eq!(initial_data_offset(2), 38);
    }
}

//===========================================================================//
