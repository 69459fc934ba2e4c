//! MaskTiff WASM - WebAssembly bindings for MaskTiff
//!
//! This crate provides WASM bindings to expose the masktiff-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for pixel grids
//! - `settings` - Rotation, flips and intensity shift
//! - `align` - Mask alignment
//! - `correct` - Negative-intensity check and sentinel substitution
//! - `decode` - Image decoding bindings (TIFF, Fit2D mask, PNG)
//! - `encode` - Image encoding bindings (TIFF export)
//! - `session` - Stateful session keeping both images in WASM memory
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsMaskSession } from '@masktiff/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsMaskSession();
//! session.load_intensity(decode_image(intensityBytes));
//! const suggested = session.load_mask(decode_image(maskBytes));
//! const tiff = session.export_tiff(0);
//! ```

use wasm_bindgen::prelude::*;

mod align;
mod correct;
mod decode;
mod encode;
mod session;
mod settings;
mod types;

// Re-export public types
pub use align::align_mask;
pub use correct::{compute_corrected_image, detect_unmasked_negatives};
pub use decode::{decode_image, is_supported_image};
pub use encode::encode_tiff;
pub use session::{JsMaskSession, JsPreview};
pub use settings::JsMaskSettings;
pub use types::JsPixelGrid;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Panic messages go to the browser console
    console_error_panic_hook::set_once();

    // Fails only if a logger is already installed
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }

    log::info!("MaskTiff WASM {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
