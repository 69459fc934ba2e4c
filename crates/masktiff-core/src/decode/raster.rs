//! Decoding of other raster formats through the `image` crate.
//!
//! Masks are sometimes exported as 8- or 16-bit grayscale PNGs. Sample
//! values are kept verbatim, so a mask stored with 0/1 levels stays 0/1.

use image::DynamicImage;

use super::DecodeError;
use crate::grid::{Dims, PixelGrid};

/// Decode a grayscale raster image into a grid of raw luma values.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedLayout` for colour images, whose
/// conversion to a mask would be a guess.
pub fn decode_raster(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    let img =
        image::load_from_memory(bytes).map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let (width, height) = (img.width() as usize, img.height() as usize);
    let values: Vec<f64> = match img {
        DynamicImage::ImageLuma8(buf) => buf.into_raw().into_iter().map(f64::from).collect(),
        DynamicImage::ImageLuma16(buf) => buf.into_raw().into_iter().map(f64::from).collect(),
        DynamicImage::ImageLumaA8(buf) => buf.pixels().map(|p| f64::from(p[0])).collect(),
        DynamicImage::ImageLumaA16(buf) => buf.pixels().map(|p| f64::from(p[0])).collect(),
        other => {
            return Err(DecodeError::UnsupportedLayout(format!(
                "{:?}",
                other.color()
            )))
        }
    };

    Ok(PixelGrid::from_raw(Dims::new(height, width), values))
}
