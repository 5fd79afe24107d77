use crate::error::{Error, Result};
use std::io::{Read, Write};

//===========================================================================//

// Size limits for icon images.  The directory's width/height fields are a
// single byte each (with zero meaning 256), but the PNG data carries the real
// dimensions, so anything that fits in 16 bits is accepted.
const MIN_DIMENSION: u32 = 1;
const MAX_DIMENSION: u32 = 0xffff;

//===========================================================================//

/// A square RGBA bitmap produced by a rasterizer, ready to be packed into an
/// icon file.
#[derive(Clone)]
pub struct RasterImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl RasterImage {
    /// Creates a new image with the given dimensions and RGBA data.  The
    /// data must be in row-major order from top to bottom, with straight
    /// (non-premultiplied) alpha.  Returns an error if the image is not
    /// square, if the dimensions are out of range, or if `rgba_data` does not
    /// have exactly `4 * width * height` bytes.
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> Result<RasterImage> {
        if width != height {
            return Err(Error::InvalidImage(format!(
                "icon images must be square (was {}x{})",
                width, height
            )));
        }
        if width < MIN_DIMENSION || width > MAX_DIMENSION {
            return Err(Error::InvalidImage(format!(
                "invalid size (was {}, but must be between {} and {})",
                width, MIN_DIMENSION, MAX_DIMENSION
            )));
        }
        let expected_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_len {
            return Err(Error::InvalidImage(format!(
                "invalid data length (was {}, but must be {} for {}x{})",
                rgba_data.len(),
                expected_len,
                width,
                height
            )));
        }
        Ok(RasterImage { width, height, rgba_data })
    }

    /// Decodes an image from PNG data.  Returns an error if the PNG is
    /// malformed, uses an unsupported color type, or is not square.
    pub fn read_png<R: Read>(reader: R) -> Result<RasterImage> {
        let decoder = png::Decoder::new(reader);
        let mut png_reader = decoder.read_info()?;
        if png_reader.info().bit_depth != png::BitDepth::Eight {
            return Err(Error::InvalidData(format!(
                "unsupported PNG bit depth: {:?}",
                png_reader.info().bit_depth
            )));
        }
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        png_reader.next_frame(&mut buffer)?;
        let info = png_reader.info();
        let rgba_data = match info.color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => buffer
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
                .collect(),
            png::ColorType::Grayscale => buffer
                .iter()
                .flat_map(|&gray| [gray, gray, gray, u8::MAX])
                .collect(),
            png::ColorType::GrayscaleAlpha => buffer
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
            png::ColorType::Indexed => {
                return Err(Error::InvalidData(
                    "unsupported PNG color type: Indexed".to_string(),
                ));
            }
        };
        RasterImage::from_rgba(info.width, info.height, rgba_data)
    }

    /// Encodes the image as an 8-bit-per-channel RGBA PNG (32 bits per
    /// pixel).  The alpha channel is always written, even if fully opaque, so
    /// that every entry in a container has the same format.
    pub fn write_png<W: Write>(&self, writer: W) -> Result<()> {
        let mut encoder = png::Encoder::new(writer, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut png_writer = encoder.write_header()?;
        png_writer.write_image_data(&self.rgba_data)?;
        Ok(())
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.  Always equal to the
    /// width.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this image, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}

//===========================================================================//


//===========================================================================//
