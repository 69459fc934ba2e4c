//! Correction WASM bindings.
//!
//! This module exposes the negative-intensity check and the sentinel
//! substitution to JavaScript. Both expect a mask that has already been
//! aligned with [`crate::align_mask`].
//!
//! # Functions
//!
//! - [`detect_unmasked_negatives`] - Suggest a shift that lifts unmasked pixels to zero
//! - [`compute_corrected_image`] - Shift intensities and write `-1` under the mask
//!
//! # Example
//!
//! ```typescript
//! const aligned = align_mask(mask, settings);
//! const suggested = detect_unmasked_negatives(intensity, aligned, settings.intensity_shift);
//! if (suggested !== undefined) {
//!   console.warn(`Negative intensities remain; try a shift of ${suggested}`);
//! }
//! const corrected = compute_corrected_image(intensity, aligned, settings.intensity_shift);
//! ```

use crate::types::JsPixelGrid;
use masktiff_core::correct;
use wasm_bindgen::prelude::*;

/// Check for negative intensities outside the mask.
///
/// # Returns
///
/// The recommended intensity shift, or `undefined` when no unmasked pixel is
/// negative after applying `shift`.
///
/// # Errors
///
/// Returns an error if the intensity and aligned mask differ in size.
#[wasm_bindgen]
pub fn detect_unmasked_negatives(
    intensity: &JsPixelGrid,
    aligned_mask: &JsPixelGrid,
    shift: f64,
) -> Result<Option<f64>, JsValue> {
    correct::detect_unmasked_negatives(intensity.grid(), aligned_mask.grid(), shift)
        .map(|advisory| advisory.map(|a| a.recommended_shift))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Add `shift` to every intensity and replace masked pixels with `-1`.
///
/// Returns a new grid; neither input is modified.
///
/// # Errors
///
/// Returns an error if the intensity and aligned mask differ in size.
#[wasm_bindgen]
pub fn compute_corrected_image(
    intensity: &JsPixelGrid,
    aligned_mask: &JsPixelGrid,
    shift: f64,
) -> Result<JsPixelGrid, JsValue> {
    correct::compute_corrected_image(intensity.grid(), aligned_mask.grid(), shift)
        .map(JsPixelGrid::from_grid)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Tests for correction bindings.
///
/// Only successful calls run natively; error paths construct a `JsValue`
/// and are covered by `wasm_tests`.
#[cfg(test)]
mod tests {
    use super::*;
    use masktiff_core::PixelGrid;

    fn grid(rows: &[&[f64]]) -> JsPixelGrid {
        JsPixelGrid::from_grid(PixelGrid::from_rows(rows).unwrap())
    }

    #[test]
    fn test_detect_returns_recommended_shift() {
        let intensity = grid(&[&[-3.0, 10.0], &[10.0, 10.0]]);
        let mask = grid(&[&[0.0, 0.0], &[0.0, 0.0]]);

        assert_eq!(
            detect_unmasked_negatives(&intensity, &mask, 0.0).ok(),
            Some(Some(3.0))
        );
        assert_eq!(
            detect_unmasked_negatives(&intensity, &mask, 3.0).ok(),
            Some(None)
        );
    }

    #[test]
    fn test_compute_corrected_image() {
        let intensity = grid(&[&[5.0, 5.0], &[5.0, 5.0]]);
        let mask = grid(&[&[1.0, 0.0], &[0.0, 1.0]]);

        let corrected = compute_corrected_image(&intensity, &mask, 0.0).ok().unwrap();
        assert_eq!(corrected.values(), vec![-1.0, 5.0, 5.0, -1.0]);
    }
}
