//! The boundary between this crate and wherever image bytes come from or go
//! to.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

//===========================================================================//

/// The MIME type of ICO files.
pub const ICON_MIME: &str = "image/x-icon";

/// The MIME type of PNG files.
pub const PNG_MIME: &str = "image/png";

//===========================================================================//

/// Anything that can supply the complete bytes of an image.  Reading the same
/// source twice must give the same bytes.
pub trait ImageSource {
    /// Reads the whole image into memory.
    fn read_bytes(&self) -> io::Result<Vec<u8>>;
}

impl ImageSource for [u8] {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl ImageSource for Vec<u8> {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.clone())
    }
}

impl ImageSource for Path {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(self)
    }
}

impl ImageSource for PathBuf {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        fs::read(self)
    }
}

impl ImageSource for Blob {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        Ok(self.data.clone())
    }
}

impl<'a, T: ImageSource + ?Sized> ImageSource for &'a T {
    fn read_bytes(&self) -> io::Result<Vec<u8>> {
        (**self).read_bytes()
    }
}

//===========================================================================//

/// A byte buffer tagged with a MIME type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Blob {
    data: Vec<u8>,
    mime: String,
}

impl Blob {
    /// Wraps `data` with the given MIME type.
    pub fn new<S: Into<String>>(data: Vec<u8>, mime: S) -> Blob {
        Blob { data, mime: mime.into() }
    }

    /// Wraps PNG data.
    pub fn png(data: Vec<u8>) -> Blob {
        Blob::new(data, PNG_MIME)
    }

    /// Wraps ICO data.
    pub fn icon(data: Vec<u8>) -> Blob {
        Blob::new(data, ICON_MIME)
    }

    /// Returns the wrapped bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Unwraps the bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Returns the number of bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

//===========================================================================//


//===========================================================================//
