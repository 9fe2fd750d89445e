//! Fixed-width integer packing.
//!
//! ICO header fields are little-endian while PNG's IHDR fields are
//! big-endian, so there is one named reader for each byte order.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

//===========================================================================//

/// The widest integer, in bytes, that fits in a `u64`.  Wider encodings are
/// padded with zero bytes, and wider inputs to the readers keep only their
/// low-order [`MAX_WIDTH`] bytes.
pub const MAX_WIDTH: usize = 8;

//===========================================================================//

/// Packs `value` into `width` little-endian bytes: byte `i` of the result is
/// `(value >> (8 * i)) & 0xff`.  Bits that don't fit in `width` bytes are
/// dropped, and bytes past the eighth are zero.  A width of zero gives an
/// empty vector.
pub fn encode_int(value: u64, width: usize) -> Vec<u8> {
    let mut buffer = vec![0u8; width];
    let packed = width.min(MAX_WIDTH);
    if packed > 0 {
        LittleEndian::write_uint(
            &mut buffer[..packed],
            mask(value, packed),
            packed,
        );
    }
    buffer
}

/// Unpacks bytes produced by [`encode_int`], so that
/// `decode_int(&encode_int(v, w)) == v` whenever `v` fits in `w` bytes.
/// This is a little-endian read; the big-endian sum of
/// `bytes[i] * 256^(n-1-i)` is [`read_be`].  Big-endian data (such as PNG's
/// IHDR fields) must be reversed first, or read with [`read_be`] instead.
pub fn decode_int(bytes: &[u8]) -> u64 {
    read_le(bytes)
}

/// Reads a little-endian integer of `bytes.len()` bytes.  An empty slice
/// reads as zero.  Only the first [`MAX_WIDTH`] bytes (the low-order ones)
/// contribute to the result.
pub fn read_le(bytes: &[u8]) -> u64 {
    let low = &bytes[..bytes.len().min(MAX_WIDTH)];
    if low.is_empty() {
        return 0;
    }
    LittleEndian::read_uint(low, low.len())
}

/// Reads a big-endian integer of `bytes.len()` bytes.  An empty slice reads
/// as zero.  Only the last [`MAX_WIDTH`] bytes (the low-order ones)
/// contribute to the result.
pub fn read_be(bytes: &[u8]) -> u64 {
    let low = &bytes[bytes.len().saturating_sub(MAX_WIDTH)..];
    if low.is_empty() {
        return 0;
    }
    BigEndian::read_uint(low, low.len())
}

fn mask(value: u64, width: usize) -> u64 {
    if width >= MAX_WIDTH {
        value
    } else {
        value & ((1u64 << (8 * width)) - 1)
    }
}

//===========================================================================//


//===========================================================================//
