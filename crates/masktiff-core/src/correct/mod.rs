//! Sentinel substitution for masked pixels.
//!
//! MAUD skips any pixel whose intensity is exactly `-1`. Producing an image
//! for it therefore takes two steps on top of the aligned mask:
//!
//! - **Validation**: after the intensity shift, no unmasked pixel may be
//!   negative, or MAUD would refine against nonsense. Violations produce an
//!   advisory with the smallest shift that fixes them.
//! - **Correction**: add the shift everywhere, then overwrite every masked
//!   pixel with the sentinel.
//!
//! ## Mask Semantics
//!
//! A pixel is masked only when its mask value is exactly `1.0`. Every other
//! value (0, 2, 255, NaN) counts as unmasked.

mod apply;
mod negatives;

pub use apply::compute_corrected_image;
pub use negatives::{detect_unmasked_negatives, NegativeIntensityAdvisory};

use crate::grid::PixelGrid;
use crate::MaskError;

/// Intensity written to masked pixels.
pub const SENTINEL: f64 = -1.0;

/// Mask value marking a pixel as excluded.
pub const MASKED: f64 = 1.0;

/// Check if a mask sample excludes its pixel.
#[inline]
pub fn is_masked(mask_value: f64) -> bool {
    mask_value == MASKED
}

/// Fail with `DimensionMismatch` unless both grids cover the same pixels.
pub(crate) fn ensure_same_dims(intensity: &PixelGrid, mask: &PixelGrid) -> Result<(), MaskError> {
    if intensity.dims() != mask.dims() {
        return Err(MaskError::DimensionMismatch {
            intensity: intensity.dims(),
            mask: mask.dims(),
        });
    }
    Ok(())
}
