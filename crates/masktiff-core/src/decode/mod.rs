//! Image decoding for MaskTiff.
//!
//! This module turns file bytes into [`PixelGrid`]s:
//! - TIFF detector frames (any single-channel sample format)
//! - Fit2D `.mask` files (bit-packed binary masks)
//! - Grayscale PNG masks, through the `image` crate
//!
//! # Architecture
//!
//! All decoders work on in-memory bytes; reading files is left to the
//! caller, which may be a browser `File` or a native path.
//!
//! # Examples
//!
//! ```ignore
//! use masktiff_core::decode::decode_image;
//!
//! let bytes = std::fs::read("frame_0001.tif").unwrap();
//! let grid = decode_image(&bytes).unwrap();
//! println!("Decoded {} grid", grid.dims());
//! ```

mod fit2d;
mod raster;
mod tiff;
mod types;

pub use self::fit2d::decode_fit2d_mask;
pub use self::raster::decode_raster;
pub use self::tiff::decode_tiff;
pub use self::types::{DecodeError, SourceFormat};

use crate::grid::PixelGrid;

/// Decode any supported image, choosing the decoder from the leading bytes.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the container is not recognised,
/// or whatever the selected decoder reports.
pub fn decode_image(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    let format = SourceFormat::detect(bytes).ok_or(DecodeError::InvalidFormat)?;
    log::debug!("Decoding {} bytes as {:?}", bytes.len(), format);

    match format {
        SourceFormat::Fit2dMask => decode_fit2d_mask(bytes),
        SourceFormat::Tiff => decode_tiff(bytes),
        SourceFormat::Raster => decode_raster(bytes),
    }
}
