//! SVG rasterization and the render-then-pack pipeline.

use crate::error::{Error, Result};
use crate::icondir::{IconDir, IconEntry};
use crate::image::RasterImage;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use resvg::{tiny_skia, usvg};
use std::fs;
use std::path::Path;
use std::sync::Arc;

//===========================================================================//

// Render at 4x the target size, then downscale with a Lanczos filter.  Small
// sizes (16, 32) come out noticeably crisper than a direct render.
const SUPERSAMPLE: u32 = 4;

//===========================================================================//

/// Renders a vector source at requested square pixel sizes.
pub trait Rasterizer {
    /// Produces a `size`x`size` RGBA image with the transparent background
    /// preserved (no compositing).
    fn rasterize(&self, size: u32) -> Result<RasterImage>;
}

//===========================================================================//

/// A [`Rasterizer`] backed by resvg.  The SVG is parsed once up front; each
/// [`rasterize`](Rasterizer::rasterize) call renders supersampled and
/// downscales to the target size.
pub struct SvgRasterizer {
    tree: usvg::Tree,
}

impl SvgRasterizer {
    /// Loads and parses an SVG file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SvgRasterizer> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|err| {
            Error::Render(format!(
                "failed to read {}: {}",
                path.display(),
                err
            ))
        })?;
        SvgRasterizer::from_data(&data)
    }

    /// Parses in-memory SVG data.  System fonts are loaded so that text
    /// elements render correctly.
    pub fn from_data(data: &[u8]) -> Result<SvgRasterizer> {
        let mut options = usvg::Options::default();
        Arc::make_mut(&mut options.fontdb).load_system_fonts();
        let tree = usvg::Tree::from_data(data, &options).map_err(|err| {
            Error::Render(format!("failed to parse SVG: {}", err))
        })?;
        Ok(SvgRasterizer { tree })
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(&self, size: u32) -> Result<RasterImage> {
        if size < 1 || size > 0xffff {
            return Err(Error::InvalidImage(format!(
                "invalid size (was {}, but must be between 1 and 65535)",
                size
            )));
        }
        let render_size = size * SUPERSAMPLE;
        let mut pixmap = tiny_skia::Pixmap::new(render_size, render_size)
            .ok_or_else(|| {
                Error::Render(format!(
                    "failed to allocate a {0}x{0} surface",
                    render_size
                ))
            })?;
        let svg_size = self.tree.size();
        let transform = tiny_skia::Transform::from_scale(
            render_size as f32 / svg_size.width(),
            render_size as f32 / svg_size.height(),
        );
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        // The pixmap holds premultiplied alpha; icon entries want straight
        // RGBA.
        let num_bytes = (render_size as usize) * (render_size as usize) * 4;
        let mut rgba = Vec::<u8>::with_capacity(num_bytes);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            rgba.extend_from_slice(&[
                color.red(),
                color.green(),
                color.blue(),
                color.alpha(),
            ]);
        }
        log::debug!(
            "rendered {}x{} at {}x supersampling",
            size,
            size,
            SUPERSAMPLE
        );

        let supersampled = RgbaImage::from_raw(render_size, render_size, rgba)
            .ok_or_else(|| {
                Error::Render(
                    "supersampled buffer has the wrong length".to_string(),
                )
            })?;
        let scaled =
            imageops::resize(&supersampled, size, size, FilterType::Lanczos3);
        RasterImage::from_rgba(size, size, scaled.into_raw())
    }
}

//===========================================================================//

/// Rasterizes each size in order and packs the results into an [`IconDir`].
///
/// Sizes must be non-empty and distinct.  The pipeline is all-or-nothing:
/// the first rasterization or encoding failure aborts the whole build, so a
/// partially filled container is never returned.
pub fn build_icon<R: Rasterizer>(
    rasterizer: &R,
    sizes: &[u32],
) -> Result<IconDir> {
    if sizes.is_empty() {
        return Err(Error::NoEntries);
    }
    for (index, &size) in sizes.iter().enumerate() {
        if sizes[..index].contains(&size) {
            return Err(Error::DuplicateSize(size));
        }
    }
    let mut icondir = IconDir::new();
    for &size in sizes.iter() {
        let image = rasterizer.rasterize(size)?;
        icondir.add_entry(IconEntry::encode(&image)?);
    }
    Ok(icondir)
}

//===========================================================================//


//===========================================================================//
