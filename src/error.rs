//! Error types returned by the ICO encoder and decoder.

use std::io;
use thiserror::Error;

//===========================================================================//

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// An error produced while encoding or decoding an ICO file.
#[derive(Error, Debug)]
pub enum Error {
    /// The input bytes are not a valid PNG or ICO file (bad signature, bad
    /// IHDR marker, unknown PNG colour type, or a truncated buffer).
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// More images were given than an ICO file can hold.
    #[error("Too many images (was {count}, but max is {max})")]
    TooManyImages {
        /// The number of images that were given.
        count: usize,
        /// The largest number of images allowed.
        max: usize,
    },

    /// An image exceeds the ICO dimension limit while size limiting is on.
    #[error(
        "Image {index} is too large \
         (was {width}x{height}, but max is {max}x{max})"
    )]
    ImageTooLarge {
        /// The position of the offending image in the input.
        index: usize,
        /// The image's width, in pixels.
        width: u32,
        /// The image's height, in pixels.
        height: u32,
        /// The largest width/height allowed.
        max: u32,
    },

    /// Reading an image source failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// The kind of an [`Error`], without its details.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    /// See [`Error::InvalidFormat`].
    InvalidFormat,
    /// See [`Error::TooManyImages`].
    TooManyImages,
    /// See [`Error::ImageTooLarge`].
    ImageTooLarge,
    /// See [`Error::Io`].
    Io,
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Error::TooManyImages { .. } => ErrorKind::TooManyImages,
            Error::ImageTooLarge { .. } => ErrorKind::ImageTooLarge,
            Error::Io(_) => ErrorKind::Io,
        }
    }
}

//===========================================================================//


//===========================================================================//
