//! Session WASM bindings.
//!
//! A `JsMaskSession` keeps the loaded intensity image and mask in WASM memory
//! so the front-end only ships settings and small previews across the
//! boundary while the user lines the mask up.

use crate::settings::JsMaskSettings;
use crate::types::JsPixelGrid;
use masktiff_core::encode::TiffSampleFormat;
use masktiff_core::preview::DEFAULT_PREVIEW_EDGE;
use masktiff_core::{MaskError, MaskSession, NegativeIntensityAdvisory};
use wasm_bindgen::prelude::*;

fn to_js_error(e: MaskError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn recommended(advisory: Option<NegativeIntensityAdvisory>) -> Option<f64> {
    advisory.map(|a| a.recommended_shift)
}

/// Intensity image, mask and settings held across edits.
///
/// Methods that may surface a negative-intensity advisory return the
/// recommended shift, or `undefined` when there is nothing to report.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsMaskSession {
    inner: MaskSession,
}

#[wasm_bindgen]
impl JsMaskSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: MaskSession::new(),
        }
    }

    /// Load the intensity image. The grid is moved into the session.
    pub fn load_intensity(&mut self, grid: JsPixelGrid) -> Result<Option<f64>, JsValue> {
        self.inner
            .load_intensity(grid.into_grid())
            .map(recommended)
            .map_err(to_js_error)
    }

    /// Load the mask in its native orientation. The grid is moved into the session.
    pub fn load_mask(&mut self, grid: JsPixelGrid) -> Result<Option<f64>, JsValue> {
        self.inner
            .load_mask(grid.into_grid())
            .map(recommended)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn has_intensity(&self) -> bool {
        self.inner.intensity().is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn has_mask(&self) -> bool {
        self.inner.mask().is_some()
    }

    /// Copy of the current settings
    pub fn settings(&self) -> JsMaskSettings {
        JsMaskSettings::from_settings(self.inner.settings())
    }

    /// Replace all settings at once.
    ///
    /// Returns the advisory for the new shift, like `set_intensity_shift`.
    pub fn set_settings(&mut self, settings: &JsMaskSettings) -> Result<Option<f64>, JsValue> {
        let settings = settings.inner();
        self.inner.set_alignment(settings.alignment);
        self.inner
            .set_intensity_shift(settings.intensity_shift)
            .map(recommended)
            .map_err(to_js_error)
    }

    /// Replace rotation and flips. The intensity shift is left as it is.
    pub fn set_alignment(&mut self, settings: &JsMaskSettings) {
        self.inner.set_alignment(settings.inner().alignment);
    }

    /// Set the intensity shift and re-check for negative unmasked pixels.
    pub fn set_intensity_shift(&mut self, shift: f64) -> Result<Option<f64>, JsValue> {
        self.inner
            .set_intensity_shift(shift)
            .map(recommended)
            .map_err(to_js_error)
    }

    /// The mask after applying the current rotation and flips.
    pub fn aligned_mask(&self) -> Result<JsPixelGrid, JsValue> {
        self.inner
            .aligned_mask()
            .map(JsPixelGrid::from_grid)
            .map_err(to_js_error)
    }

    /// Check for negative unmasked intensities with the current settings.
    pub fn check_negatives(&self) -> Result<Option<f64>, JsValue> {
        self.inner
            .check_negatives()
            .map(recommended)
            .map_err(to_js_error)
    }

    pub fn corrected_image(&self) -> Result<JsPixelGrid, JsValue> {
        self.inner
            .corrected_image()
            .map(JsPixelGrid::from_grid)
            .map_err(to_js_error)
    }

    /// Corrected image as TIFF bytes (format codes as for `encode_tiff`).
    pub fn export_tiff(&self, format: u8) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export_tiff(TiffSampleFormat::from_code(format))
            .map_err(to_js_error)
    }

    /// Downsampled copies for display. `max_edge` of `undefined` uses 1500.
    pub fn preview(&self, max_edge: Option<u32>) -> Result<JsPreview, JsValue> {
        let preview = self
            .inner
            .preview(max_edge.unwrap_or(DEFAULT_PREVIEW_EDGE))
            .map_err(to_js_error)?;

        Ok(JsPreview {
            intensity: preview.intensity,
            mask: preview.mask,
        })
    }
}

/// Downsampled intensity and aligned mask.
#[wasm_bindgen]
pub struct JsPreview {
    intensity: Option<masktiff_core::PixelGrid>,
    mask: Option<masktiff_core::PixelGrid>,
}

#[wasm_bindgen]
impl JsPreview {
    /// Shifted intensity preview, or `undefined` if no intensity is loaded.
    pub fn intensity(&self) -> Option<JsPixelGrid> {
        self.intensity.clone().map(JsPixelGrid::from_grid)
    }

    /// Aligned mask preview, or `undefined` if no mask is loaded.
    pub fn mask(&self) -> Option<JsPixelGrid> {
        self.mask.clone().map(JsPixelGrid::from_grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use masktiff_core::PixelGrid;

    fn grid(rows: &[&[f64]]) -> JsPixelGrid {
        JsPixelGrid::from_grid(PixelGrid::from_rows(rows).unwrap())
    }

    #[test]
    fn test_session_workflow() {
        let mut session = JsMaskSession::new();
        assert!(!session.has_intensity());
        assert!(!session.has_mask());

        let advisory = session
            .load_intensity(grid(&[&[-3.0, 10.0], &[10.0, 10.0]]))
            .ok()
            .unwrap();
        assert_eq!(advisory, None);

        let advisory = session
            .load_mask(grid(&[&[0.0, 0.0], &[0.0, 1.0]]))
            .ok()
            .unwrap();
        assert_eq!(advisory, Some(3.0));

        assert_eq!(session.set_intensity_shift(3.0).ok(), Some(None));

        let corrected = session.corrected_image().ok().unwrap();
        assert_eq!(corrected.values(), vec![0.0, 13.0, 13.0, -1.0]);
    }

    #[test]
    fn test_settings_round_trip() {
        let mut session = JsMaskSession::new();
        let mut settings = JsMaskSettings::new();
        settings.set_rotation(2);
        settings.set_intensity_shift(1.5);

        assert_eq!(session.set_settings(&settings).ok(), Some(None));

        let current = session.settings();
        assert_eq!(current.rotation(), 2);
        assert_eq!(current.intensity_shift(), 1.5);
    }

    #[test]
    fn test_set_alignment_keeps_shift() {
        let mut session = JsMaskSession::new();
        session.load_intensity(grid(&[&[1.0, 2.0, 3.0]])).ok().unwrap();
        session.load_mask(grid(&[&[1.0], &[0.0], &[0.0]])).ok().unwrap();
        session.set_intensity_shift(0.5).ok().unwrap();

        let mut settings = JsMaskSettings::new();
        settings.set_rotation(-1);
        settings.set_intensity_shift(9.0);
        session.set_alignment(&settings);

        let current = session.settings();
        assert_eq!(current.rotation(), 3);
        assert_eq!(current.intensity_shift(), 0.5);

        // Clockwise turn puts the masked pixel at the right end
        let aligned = session.aligned_mask().ok().unwrap();
        assert_eq!(aligned.values(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_preview_default_edge() {
        let mut session = JsMaskSession::new();
        session.load_mask(grid(&[&[1.0, 0.0]])).ok().unwrap();

        let preview = session.preview(None).ok().unwrap();
        assert!(preview.intensity().is_none());
        assert_eq!(preview.mask().unwrap().values(), vec![1.0, 0.0]);
    }
}
