//! Image decoding WASM bindings.
//!
//! This module exposes the masktiff-core decoders to JavaScript. The format
//! is detected from the leading bytes, so the same entry point handles
//! detector TIFFs, Fit2D `.mask` files and grayscale PNG masks.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@masktiff/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const grid = decode_image(bytes);
//! console.log(`Decoded ${grid.rows}x${grid.cols}`);
//! ```

use crate::types::JsPixelGrid;
use masktiff_core::decode::{self, SourceFormat};
use wasm_bindgen::prelude::*;

/// Decode an intensity image or mask from file bytes.
///
/// # Errors
///
/// Returns an error if:
/// - The format is not recognised
/// - The file is corrupted or truncated
/// - The image is not single-channel
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelGrid, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelGrid::from_grid)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether bytes look like a supported image, without decoding.
#[wasm_bindgen]
pub fn is_supported_image(bytes: &[u8]) -> bool {
    SourceFormat::detect(bytes).is_some()
}
