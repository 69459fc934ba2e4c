//! Reduced-resolution copies for overlay display.
//!
//! Detector frames are often several thousand pixels on a side, which is
//! more than a browser canvas needs to show where the mask falls. A preview
//! scales a grid so its longest edge is at most `max_edge` pixels.
//!
//! Nearest-neighbour sampling is used throughout so that mask previews stay
//! strictly binary and intensity previews never invent values.

use image::ImageBuffer;

use crate::grid::PixelGrid;
use crate::MaskError;

/// Default longest edge of a preview, in pixels.
pub const DEFAULT_PREVIEW_EDGE: u32 = 1500;

/// Downsampled intensity and aligned mask, ready to overlay.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Preview {
    /// Intensity with the current shift applied, if loaded.
    pub intensity: Option<PixelGrid>,
    /// Mask after alignment, if loaded.
    pub mask: Option<PixelGrid>,
}

/// Dimensions of a preview, reported alongside the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSize {
    pub width: u32,
    pub height: u32,
}

/// Downsample a grid so that its longest edge is at most `max_edge`.
///
/// Grids that already fit are returned as an unchanged copy; nothing is
/// ever upscaled.
///
/// # Arguments
///
/// * `grid` - The source grid
/// * `max_edge` - Maximum length of the longest edge in pixels
///
/// # Errors
///
/// Returns `MaskError::InvalidPreviewEdge` if `max_edge` is zero.
///
/// # Example
///
/// ```ignore
/// let frame = PixelGrid::filled(3000, 2000, 0.0)?;
/// let small = downsample(&frame, 1500)?;
/// assert_eq!(small.dims(), Dims::new(1500, 1000));
/// ```
pub fn downsample(grid: &PixelGrid, max_edge: u32) -> Result<PixelGrid, MaskError> {
    if max_edge == 0 {
        return Err(MaskError::InvalidPreviewEdge);
    }

    let edge = max_edge as usize;
    if grid.rows() <= edge && grid.cols() <= edge {
        return Ok(grid.clone());
    }

    // Dimensions beyond u32 cannot go through an image buffer
    let Some(buffer) = grid.to_luma32f() else {
        log::warn!("Grid {} too large to downsample", grid.dims());
        return Ok(grid.clone());
    };

    let size = fit_size(buffer.width(), buffer.height(), max_edge);
    let (src_w, src_h) = buffer.dimensions();

    // imageops::resize clamps float samples to 0..=1, so pick the nearest
    // source pixel directly instead
    let resized = ImageBuffer::from_fn(size.width, size.height, |x, y| {
        let sx = nearest_source(x, size.width, src_w);
        let sy = nearest_source(y, size.height, src_h);
        *buffer.get_pixel(sx, sy)
    });

    log::debug!(
        "Downsampled {} preview to {}x{}",
        grid.dims(),
        size.height,
        size.width
    );
    Ok(PixelGrid::from_luma32f(resized))
}

/// Map a destination coordinate to the source pixel whose centre is nearest.
#[inline]
fn nearest_source(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    let centre = (dst as f64 + 0.5) * src_len as f64 / dst_len as f64;
    (centre as u32).min(src_len - 1)
}

/// Calculate a size fitting within `max_edge` while preserving aspect ratio.
pub fn fit_size(width: u32, height: u32, max_edge: u32) -> PreviewSize {
    if width == 0 || height == 0 {
        return PreviewSize {
            width: 0,
            height: 0,
        };
    }
    if width <= max_edge && height <= max_edge {
        return PreviewSize { width, height };
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        let new_height = (max_edge as f64 / ratio).round() as u32;
        PreviewSize {
            width: max_edge,
            height: new_height.max(1),
        }
    } else {
        let new_width = (max_edge as f64 * ratio).round() as u32;
        PreviewSize {
            width: new_width.max(1),
            height: max_edge,
        }
    }
}
