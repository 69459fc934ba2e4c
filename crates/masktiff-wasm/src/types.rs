//! WASM-compatible wrapper types for grid data.
//!
//! This module provides JavaScript-friendly types that wrap the core MaskTiff types,
//! handling the conversion between Rust and JavaScript data representations.

use masktiff_core::PixelGrid;
use wasm_bindgen::prelude::*;

/// A numeric pixel grid wrapper for JavaScript.
///
/// Used for intensity images, masks and corrected images alike. Values are
/// row-major `f64` and cross into JavaScript as a `Float64Array`.
///
/// # Memory Management
///
/// The samples are stored in WASM memory. When you call `values()`, a copy is
/// made to JavaScript memory. Detector frames are large, so keep grids in
/// WASM memory and pass them between bindings rather than round-tripping the
/// samples through JavaScript.
#[wasm_bindgen]
pub struct JsPixelGrid {
    inner: PixelGrid,
}

#[wasm_bindgen]
impl JsPixelGrid {
    /// Create a grid from dimensions and row-major values.
    ///
    /// # Errors
    ///
    /// Returns an error if `values.length !== rows * cols`.
    #[wasm_bindgen(constructor)]
    pub fn new(rows: u32, cols: u32, values: Vec<f64>) -> Result<JsPixelGrid, JsValue> {
        PixelGrid::new(rows as usize, cols as usize, values)
            .map(Self::from_grid)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Number of rows (image height)
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> u32 {
        self.inner.rows() as u32
    }

    /// Number of columns (image width)
    #[wasm_bindgen(getter)]
    pub fn cols(&self) -> u32 {
        self.inner.cols() as u32
    }

    /// Number of samples (rows * cols)
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Returns the samples as a Float64Array.
    ///
    /// Note: This creates a copy of the data.
    pub fn values(&self) -> Vec<f64> {
        self.inner.values().to_vec()
    }

    /// Sample at (row, col), or `undefined` when out of bounds.
    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        self.inner.get(row as usize, col as usize)
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelGrid {
    pub(crate) fn from_grid(inner: PixelGrid) -> Self {
        Self { inner }
    }

    pub(crate) fn grid(&self) -> &PixelGrid {
        &self.inner
    }

    /// Take the core grid out, e.g. when loading it into a session.
    pub(crate) fn into_grid(self) -> PixelGrid {
        self.inner
    }
}
