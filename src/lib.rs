//! A library for rendering an SVG icon at multiple pixel sizes and packing
//! the results into a single multi-resolution ICO file.
//!
//! The ICO files written here always use PNG-compressed, 32-bit RGBA entries
//! (the flavor supported since Windows Vista); legacy uncompressed BMP
//! entries are never produced.
//!
//! # Example
//!
//! ```no_run
//! let rasterizer = svg2ico::SvgRasterizer::from_path("favicon.svg")?;
//! let icondir = svg2ico::build_icon(&rasterizer, &[16, 32, 48])?;
//! std::fs::write("favicon.ico", icondir.to_bytes()?)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]

mod error;
mod icondir;
mod image;
mod rasterize;

pub use crate::error::{Error, Result};
pub use crate::icondir::{IconDir, IconEntry};
pub use crate::image::RasterImage;
pub use crate::rasterize::{build_icon, Rasterizer, SvgRasterizer};

//===========================================================================//
