//! MaskTiff Core - Detector mask alignment and correction
//!
//! This crate provides the core functionality for MaskTiff: aligning a
//! binary detector mask to a diffraction intensity image, and writing a
//! corrected image in which masked pixels carry the `-1` sentinel that
//! Rietveld packages such as MAUD treat as "ignore this pixel".
//!
//! # Modules
//!
//! - [`align`] - Quarter-turn rotation and flips applied to the mask
//! - [`correct`] - Negative-intensity advisory and sentinel substitution
//! - [`session`] - Loaded images plus settings, recomputed on demand
//! - [`decode`] / [`encode`] - TIFF, Fit2D and PNG input, TIFF output
//! - [`preview`] - Downsampled copies for overlay display

pub mod align;
pub mod correct;
pub mod decode;
pub mod encode;
pub mod error;
pub mod grid;
pub mod preview;
pub mod session;

pub use align::{align_mask, Alignment, QuarterTurns};
pub use correct::{
    compute_corrected_image, detect_unmasked_negatives, NegativeIntensityAdvisory, SENTINEL,
};
pub use error::{InputKind, MaskError};
pub use grid::{Dims, PixelGrid};
pub use session::MaskSession;

/// Settings relating a mask to its intensity image
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MaskSettings {
    /// Orientation correction applied to the mask
    pub alignment: Alignment,
    /// Uniform offset added to every intensity before masking
    pub intensity_shift: f64,
}

impl MaskSettings {
    /// Create a new MaskSettings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_settings_default() {
        let settings = MaskSettings::default();
        assert_eq!(settings.alignment, Alignment::identity());
        assert_eq!(settings.intensity_shift, 0.0);
        assert!(settings.is_default());
    }

    #[test]
    fn test_mask_settings_is_default() {
        let mut settings = MaskSettings::new();
        assert!(settings.is_default());

        settings.intensity_shift = 3.0;
        assert!(!settings.is_default());

        settings.intensity_shift = 0.0;
        settings.alignment.flip_vertical = true;
        assert!(!settings.is_default());
    }

    #[test]
    fn test_sentinel_value() {
        assert_eq!(SENTINEL, -1.0);
    }
}
