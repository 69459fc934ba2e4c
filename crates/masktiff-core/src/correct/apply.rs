//! Corrected image production.
//!
//! The corrected image is what gets handed to the TIFF writer. It is derived
//! fresh on every call and never stored.

use super::{ensure_same_dims, is_masked, SENTINEL};
use crate::grid::PixelGrid;
use crate::MaskError;

/// Shift all intensities and overwrite masked pixels with the sentinel.
///
/// # Arguments
/// * `intensity` - Diffraction intensities (left untouched)
/// * `aligned_mask` - Mask already aligned to the intensity grid
/// * `intensity_shift` - Offset added to every unmasked intensity
///
/// # Algorithm
/// For each pixel:
/// 1. If the mask value is exactly `1`, output `-1`
/// 2. Otherwise output `intensity + intensity_shift`
///
/// The result is not idempotent: feeding it back in with the same mask keeps
/// the masked pixels at `-1` but adds the shift to the unmasked ones again.
///
/// # Errors
/// Returns `MaskError::DimensionMismatch` if the grids differ in shape.
///
/// # Example
/// ```ignore
/// let intensity = PixelGrid::filled(2, 2, 5.0)?;
/// let mask = PixelGrid::from_rows(&[[1.0, 0.0], [0.0, 1.0]])?;
/// let corrected = compute_corrected_image(&intensity, &mask, 0.0)?;
/// assert_eq!(corrected.values(), &[-1.0, 5.0, 5.0, -1.0]);
/// ```
pub fn compute_corrected_image(
    intensity: &PixelGrid,
    aligned_mask: &PixelGrid,
    intensity_shift: f64,
) -> Result<PixelGrid, MaskError> {
    ensure_same_dims(intensity, aligned_mask)?;

    let values = intensity
        .values()
        .iter()
        .zip(aligned_mask.values())
        .map(|(&value, &mask_value)| {
            if is_masked(mask_value) {
                SENTINEL
            } else {
                value + intensity_shift
            }
        })
        .collect();

    Ok(PixelGrid::from_raw(intensity.dims(), values))
}
