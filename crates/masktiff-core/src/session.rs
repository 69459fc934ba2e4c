//! A working session over one intensity image and one mask.
//!
//! [`MaskSession`] owns the two loaded grids and the current
//! [`MaskSettings`]. It holds no derived data: the aligned mask, the
//! corrected image and previews are recomputed from the inputs on every
//! call, so changing a setting can never leave stale results behind.
//!
//! # Workflow
//!
//! 1. Load the intensity and mask grids (in either order)
//! 2. Adjust rotation, flips and intensity shift until the preview lines up
//! 3. Export the corrected image
//!
//! Loading an image or changing the shift re-checks for negative unmasked
//! intensities and returns the advisory, if any. While the mask does not yet
//! fit the intensity (e.g. before it has been rotated) that check is skipped.

use crate::align::{align_mask, Alignment};
use crate::correct::{compute_corrected_image, detect_unmasked_negatives, NegativeIntensityAdvisory};
use crate::encode::{encode_tiff, TiffSampleFormat};
use crate::error::InputKind;
use crate::grid::PixelGrid;
use crate::preview::{downsample, Preview};
use crate::{MaskError, MaskSettings};

/// Loaded images plus the settings that relate them.
#[derive(Debug, Clone, Default)]
pub struct MaskSession {
    intensity: Option<PixelGrid>,
    mask: Option<PixelGrid>,
    settings: MaskSettings,
}

impl MaskSession {
    /// Create an empty session with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// The loaded intensity grid, if any.
    pub fn intensity(&self) -> Option<&PixelGrid> {
        self.intensity.as_ref()
    }

    /// The loaded mask grid in its native orientation, if any.
    pub fn mask(&self) -> Option<&PixelGrid> {
        self.mask.as_ref()
    }

    pub fn settings(&self) -> MaskSettings {
        self.settings
    }

    /// Replace the intensity grid.
    ///
    /// Returns the negative-intensity advisory for the new state.
    pub fn load_intensity(
        &mut self,
        intensity: PixelGrid,
    ) -> Result<Option<NegativeIntensityAdvisory>, MaskError> {
        log::info!("Loaded intensity image {}", intensity.dims());
        self.intensity = Some(intensity);
        self.advise()
    }

    /// Replace the mask grid.
    ///
    /// Returns the negative-intensity advisory for the new state.
    pub fn load_mask(
        &mut self,
        mask: PixelGrid,
    ) -> Result<Option<NegativeIntensityAdvisory>, MaskError> {
        log::info!("Loaded mask image {}", mask.dims());
        self.mask = Some(mask);
        self.advise()
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.settings.alignment = alignment;
    }

    /// Set the intensity shift and re-check for negative unmasked pixels.
    pub fn set_intensity_shift(
        &mut self,
        shift: f64,
    ) -> Result<Option<NegativeIntensityAdvisory>, MaskError> {
        self.settings.intensity_shift = shift;
        self.advise()
    }

    pub fn set_settings(&mut self, settings: MaskSettings) {
        self.settings = settings;
    }

    /// The mask after applying the current alignment.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::MissingInput(Mask)` if no mask is loaded.
    pub fn aligned_mask(&self) -> Result<PixelGrid, MaskError> {
        let mask = self
            .mask
            .as_ref()
            .ok_or(MaskError::MissingInput(InputKind::Mask))?;
        Ok(align_mask(mask, self.settings.alignment))
    }

    /// Check the current state for negative unmasked intensities.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::MissingInput` if either image is absent and
    /// `MaskError::DimensionMismatch` if the aligned mask does not fit.
    pub fn check_negatives(&self) -> Result<Option<NegativeIntensityAdvisory>, MaskError> {
        let intensity = self.require_intensity()?;
        let aligned = self.aligned_mask()?;
        detect_unmasked_negatives(intensity, &aligned, self.settings.intensity_shift)
    }

    /// Compute the corrected image for the current state.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::MissingInput` if either image is absent and
    /// `MaskError::DimensionMismatch` if the aligned mask does not fit.
    pub fn corrected_image(&self) -> Result<PixelGrid, MaskError> {
        let intensity = self.require_intensity()?;
        let aligned = self.aligned_mask()?;
        compute_corrected_image(intensity, &aligned, self.settings.intensity_shift)
    }

    /// Compute the corrected image and encode it as a TIFF.
    pub fn export_tiff(&self, format: TiffSampleFormat) -> Result<Vec<u8>, MaskError> {
        let corrected = self.corrected_image()?;
        let bytes = encode_tiff(&corrected, format)?;
        log::info!("Exported corrected image {} as {:?}", corrected.dims(), format);
        Ok(bytes)
    }

    /// Reduced-resolution copies of the shifted intensity and aligned mask.
    ///
    /// Either side is `None` when that image has not been loaded.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::InvalidPreviewEdge` if `max_edge` is zero.
    pub fn preview(&self, max_edge: u32) -> Result<Preview, MaskError> {
        let shift = self.settings.intensity_shift;
        let intensity = self
            .intensity
            .as_ref()
            .map(|grid| downsample(&grid.map(|v| v + shift), max_edge))
            .transpose()?;
        let mask = self
            .mask
            .as_ref()
            .map(|grid| downsample(&align_mask(grid, self.settings.alignment), max_edge))
            .transpose()?;

        Ok(Preview { intensity, mask })
    }

    fn require_intensity(&self) -> Result<&PixelGrid, MaskError> {
        self.intensity
            .as_ref()
            .ok_or(MaskError::MissingInput(InputKind::Intensity))
    }

    /// Advisory check run after loads and shift edits.
    ///
    /// Missing inputs and a not-yet-aligned mask are expected here.
    fn advise(&self) -> Result<Option<NegativeIntensityAdvisory>, MaskError> {
        match self.check_negatives() {
            Err(MaskError::MissingInput(_)) => Ok(None),
            Err(MaskError::DimensionMismatch { intensity, mask }) => {
                log::debug!(
                    "Skipping negative check: intensity {} vs aligned mask {}",
                    intensity,
                    mask
                );
                Ok(None)
            }
            other => other,
        }
    }
}
