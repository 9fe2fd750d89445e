//! A library for packing PNG images into ICO files and unpacking them again.
//!
//! Only PNG-encoded icon images are supported.  Pixel data is never decoded;
//! the geometry of each image is read from its PNG header.
//!
//! # Example
//!
//! ```no_run
//! let first = std::fs::read("icon16.png").unwrap();
//! let second = std::fs::read("icon32.png").unwrap();
//! let ico = pngico::encode(&[first, second], true).unwrap();
//! for image in pngico::decode(&ico).unwrap() {
//!     println!("{}x{} at {} bpp", image.width(), image.height(),
//!              image.bits_per_pixel());
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
mod macros;

mod blob;
pub mod bytes;
mod decode;
mod encode;
mod error;
mod icondir;
mod pngheader;

pub use crate::blob::{Blob, ImageSource, ICON_MIME, PNG_MIME};
pub use crate::decode::{decode, decode_source, DecodedImage};
pub use crate::encode::{
    encode, encode_sources, encode_with, EncodeOptions, MAX_DIMENSION,
    MAX_IMAGES,
};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::icondir::{
    initial_data_offset, IconDir, IconDirEntry, DIR_ENTRY_LEN,
    FILE_HEADER_LEN, ICON_TYPE,
};
pub use crate::pngheader::{PngHeader, PNG_SIGNATURE};

//===========================================================================//
