//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_tiff } from '@masktiff/wasm';
//!
//! const tiffBytes = encode_tiff(corrected, 0); // Float32
//! const blob = new Blob([tiffBytes], { type: 'image/tiff' });
//! ```

use crate::types::JsPixelGrid;
use masktiff_core::encode::{self, TiffSampleFormat};
use wasm_bindgen::prelude::*;

/// Encode a grid as a single-channel TIFF.
///
/// # Arguments
///
/// * `grid` - The grid to write, usually a corrected image
/// * `format` - Sample format: 0 = Float32, 1 = Float64, 2 = Int32 (other values: Float32)
///
/// # Errors
///
/// Returns an error if the grid is empty, or if `Int32` is requested and a
/// value does not fit.
#[wasm_bindgen]
pub fn encode_tiff(grid: &JsPixelGrid, format: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_tiff(grid.grid(), TiffSampleFormat::from_code(format))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
