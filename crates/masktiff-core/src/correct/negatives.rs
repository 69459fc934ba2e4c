//! Detection of negative intensities outside the mask.

use serde::{Deserialize, Serialize};

use super::{ensure_same_dims, is_masked};
use crate::grid::PixelGrid;
use crate::MaskError;

/// Advisory raised when shifted, unmasked intensities dip below zero.
///
/// This is a recommendation, not an error: the corrected image can still be
/// computed and exported with the current shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeIntensityAdvisory {
    /// Smallest intensity shift that makes every unmasked pixel non-negative.
    pub recommended_shift: f64,
    /// Minimum shifted intensity over the unmasked pixels.
    pub minimum: f64,
    /// Number of unmasked pixels that are negative after the shift.
    pub negative_pixels: usize,
}

/// Look for negative intensities in the unmasked region after shifting.
///
/// # Arguments
///
/// * `intensity` - Diffraction intensities
/// * `aligned_mask` - Mask already aligned to the intensity grid
/// * `intensity_shift` - Offset added to every intensity
///
/// # Returns
///
/// `Ok(None)` when every unmasked pixel is non-negative, including the
/// vacuous case where the mask covers every pixel. Otherwise an advisory with
/// `recommended_shift = intensity_shift - minimum`.
///
/// NaN intensities are ignored when taking the minimum.
///
/// # Errors
///
/// Returns `MaskError::DimensionMismatch` if the grids differ in shape.
pub fn detect_unmasked_negatives(
    intensity: &PixelGrid,
    aligned_mask: &PixelGrid,
    intensity_shift: f64,
) -> Result<Option<NegativeIntensityAdvisory>, MaskError> {
    ensure_same_dims(intensity, aligned_mask)?;

    let mut minimum: Option<f64> = None;
    let mut negative_pixels = 0usize;

    for (&value, &mask_value) in intensity.values().iter().zip(aligned_mask.values()) {
        if is_masked(mask_value) {
            continue;
        }
        let shifted = value + intensity_shift;
        if shifted.is_nan() {
            continue;
        }
        if shifted < 0.0 {
            negative_pixels += 1;
        }
        minimum = Some(minimum.map_or(shifted, |m| m.min(shifted)));
    }

    match minimum {
        Some(minimum) if minimum < 0.0 => {
            let advisory = NegativeIntensityAdvisory {
                recommended_shift: intensity_shift - minimum,
                minimum,
                negative_pixels,
            };
            log::warn!(
                "Negative intensities in un-masked data ({} pixels, minimum {:.1}). \
                 Minimum intensity shift to avoid this: {:.1}",
                advisory.negative_pixels,
                advisory.minimum,
                advisory.recommended_shift
            );
            Ok(Some(advisory))
        }
        _ => Ok(None),
    }
}
