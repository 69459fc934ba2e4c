//! Mask alignment WASM bindings.

use crate::settings::JsMaskSettings;
use crate::types::JsPixelGrid;
use masktiff_core::align;
use wasm_bindgen::prelude::*;

/// Rotate and flip a mask into the intensity image's frame.
///
/// Only the alignment part of `settings` is used; the intensity shift is
/// ignored. The input mask is left unchanged.
///
/// # Example (TypeScript)
/// ```typescript
/// const settings = new JsMaskSettings();
/// settings.rotation = 1;
/// const aligned = align_mask(mask, settings);
/// console.log(`Aligned mask is ${aligned.rows}x${aligned.cols}`);
/// ```
#[wasm_bindgen]
pub fn align_mask(mask: &JsPixelGrid, settings: &JsMaskSettings) -> JsPixelGrid {
    JsPixelGrid::from_grid(align::align_mask(mask.grid(), settings.inner().alignment))
}
