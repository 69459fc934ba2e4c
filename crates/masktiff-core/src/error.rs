//! Error types for mask processing.

use std::fmt;

use thiserror::Error;

use crate::encode::EncodeError;
use crate::grid::Dims;

/// Which of the two session inputs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// The diffraction intensity image.
    Intensity,
    /// The mask image.
    Mask,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Intensity => f.write_str("Intensity"),
            InputKind::Mask => f.write_str("Mask"),
        }
    }
}

/// Error types for mask alignment and correction.
#[derive(Debug, Error)]
pub enum MaskError {
    /// The aligned mask does not cover the intensity grid pixel for pixel.
    #[error("Dimension mismatch: intensity is {intensity} but aligned mask is {mask}")]
    DimensionMismatch { intensity: Dims, mask: Dims },

    /// An input needed by the operation has not been loaded.
    #[error("{0} data is missing. Nothing to do.")]
    MissingInput(InputKind),

    /// Value buffer length does not match rows * cols.
    #[error("Invalid grid: expected {expected} values (rows * cols), got {actual}")]
    InvalidGrid { expected: usize, actual: usize },

    /// rows * cols does not fit in `usize`.
    #[error("Grid too large: {rows}x{cols} pixels")]
    GridTooLarge { rows: usize, cols: usize },

    /// Preview size must be at least one pixel.
    #[error("Preview edge must be non-zero")]
    InvalidPreviewEdge,

    /// The corrected image could not be written out.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = MaskError::DimensionMismatch {
            intensity: Dims::new(3, 2),
            mask: Dims::new(2, 3),
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: intensity is 3x2 but aligned mask is 2x3"
        );
    }

    #[test]
    fn test_grid_too_large_display() {
        let err = MaskError::GridTooLarge { rows: 7, cols: 9 };
        assert_eq!(err.to_string(), "Grid too large: 7x9 pixels");
    }

    #[test]
    fn test_missing_input_display() {
        let err = MaskError::MissingInput(InputKind::Mask);
        assert_eq!(err.to_string(), "Mask data is missing. Nothing to do.");
    }
}
