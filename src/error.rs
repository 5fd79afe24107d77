//! Error types for rasterization and ICO encoding.

use std::io;
use thiserror::Error;

//===========================================================================//

/// Result type alias for icon operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rasterizing an SVG or packing an ICO file.
#[derive(Debug, Error)]
pub enum Error {
    /// The SVG source could not be loaded, parsed, or rendered.
    #[error("render failed: {0}")]
    Render(String),

    /// An image violates the squareness or buffer-length invariants.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// The directory entry count does not fit in its 16-bit field.
    #[error("too many icon entries (was {0}, but max is 65535)")]
    TooManyEntries(usize),

    /// No images were supplied; a zero-entry ICO file is never written.
    #[error("no images to encode")]
    NoEntries,

    /// The same pixel size was requested more than once.
    #[error("duplicate icon size ({0})")]
    DuplicateSize(u32),

    /// An ICO file being read does not conform to the format.
    #[error("malformed ICO data: {0}")]
    InvalidData(String),

    /// PNG decoding failed.
    #[error("malformed PNG data: {0}")]
    PngDecode(#[from] png::DecodingError),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] png::EncodingError),

    /// An underlying I/O operation failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

//===========================================================================//
