//! Mask settings WASM bindings.
//!
//! This module provides JavaScript bindings for the MaskSettings type,
//! allowing the alignment and intensity shift to be edited from TypeScript.

use masktiff_core::QuarterTurns;
use wasm_bindgen::prelude::*;

/// Mask settings wrapper for JavaScript
#[wasm_bindgen]
pub struct JsMaskSettings {
    inner: masktiff_core::MaskSettings,
}

#[wasm_bindgen]
impl JsMaskSettings {
    /// Create new settings: no rotation, no flips, zero shift
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: masktiff_core::MaskSettings::new(),
        }
    }

    /// Get rotation in counter-clockwise quarter turns (0-3)
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u8 {
        self.inner.alignment.rotation.count()
    }

    /// Set rotation. Any integer is accepted and taken modulo 4.
    #[wasm_bindgen(setter)]
    pub fn set_rotation(&mut self, value: i32) {
        self.inner.alignment.rotation = QuarterTurns::from_count(i64::from(value));
    }

    /// Get vertical flip
    #[wasm_bindgen(getter)]
    pub fn flip_vertical(&self) -> bool {
        self.inner.alignment.flip_vertical
    }

    /// Set vertical flip
    #[wasm_bindgen(setter)]
    pub fn set_flip_vertical(&mut self, value: bool) {
        self.inner.alignment.flip_vertical = value;
    }

    /// Get horizontal flip
    #[wasm_bindgen(getter)]
    pub fn flip_horizontal(&self) -> bool {
        self.inner.alignment.flip_horizontal
    }

    /// Set horizontal flip
    #[wasm_bindgen(setter)]
    pub fn set_flip_horizontal(&mut self, value: bool) {
        self.inner.alignment.flip_horizontal = value;
    }

    /// Get intensity shift
    #[wasm_bindgen(getter)]
    pub fn intensity_shift(&self) -> f64 {
        self.inner.intensity_shift
    }

    /// Set intensity shift
    #[wasm_bindgen(setter)]
    pub fn set_intensity_shift(&mut self, value: f64) {
        self.inner.intensity_shift = value;
    }

    /// Check if all settings are at default values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain object for storage
    pub fn to_object(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain object. Missing fields take their defaults.
    pub fn from_object(value: JsValue) -> Result<JsMaskSettings, JsValue> {
        let inner: masktiff_core::MaskSettings =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsMaskSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl JsMaskSettings {
    pub(crate) fn inner(&self) -> masktiff_core::MaskSettings {
        self.inner
    }

    pub(crate) fn from_settings(inner: masktiff_core::MaskSettings) -> Self {
        Self { inner }
    }
}
