//! Geometric alignment of a mask onto the intensity grid.
//!
//! Masks are often drawn in a different orientation than the detector image
//! they belong to. An [`Alignment`] describes how to bring the mask into the
//! image's frame using only lossless operations.
//!
//! # Transform Order
//!
//! The order is fixed and is not commutative in general:
//! 1. Rotation by a whole number of quarter turns (counter-clockwise)
//! 2. Vertical flip (reverse row order), if requested
//! 3. Horizontal flip (reverse each row), if requested
//!
//! # Coordinate System
//!
//! - Row 0 is the top of the grid, column 0 its left edge
//! - A quarter turn moves the right edge to the top

mod flip;
mod rotation;

pub use flip::{flip_horizontal, flip_vertical};
pub use rotation::rotate_quarter_turns;

use serde::{Deserialize, Serialize};

use crate::grid::{Dims, PixelGrid};

/// Rotation in whole counter-clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
#[repr(u8)]
pub enum QuarterTurns {
    /// No rotation.
    #[default]
    Zero = 0,
    /// 90° counter-clockwise.
    One = 1,
    /// 180°.
    Two = 2,
    /// 270° counter-clockwise (90° clockwise).
    Three = 3,
}

impl QuarterTurns {
    /// Normalise any turn count modulo 4. Negative counts turn clockwise.
    pub fn from_count(count: i64) -> Self {
        match count.rem_euclid(4) {
            0 => QuarterTurns::Zero,
            1 => QuarterTurns::One,
            2 => QuarterTurns::Two,
            _ => QuarterTurns::Three,
        }
    }

    /// Number of quarter turns, in `0..=3`.
    #[inline]
    pub fn count(self) -> u8 {
        self as u8
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        Self::from_count(4 - i64::from(self.count()))
    }

    /// Returns true if this rotation swaps rows and columns.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurns::One | QuarterTurns::Three)
    }
}

impl From<i64> for QuarterTurns {
    fn from(count: i64) -> Self {
        Self::from_count(count)
    }
}

impl From<QuarterTurns> for u8 {
    fn from(turns: QuarterTurns) -> Self {
        turns.count()
    }
}

/// How the raw mask is rotated and flipped before it is combined with the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Alignment {
    /// Counter-clockwise quarter turns, applied first.
    pub rotation: QuarterTurns,
    /// Reverse the row order after rotating.
    pub flip_vertical: bool,
    /// Reverse each row after rotating.
    pub flip_horizontal: bool,
}

impl Alignment {
    pub fn new(rotation: QuarterTurns, flip_vertical: bool, flip_horizontal: bool) -> Self {
        Self {
            rotation,
            flip_vertical,
            flip_horizontal,
        }
    }

    /// The alignment that leaves the mask untouched.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if applying this alignment is a no-op.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Dimensions a mask of `dims` will have after alignment.
    pub fn aligned_dims(&self, dims: Dims) -> Dims {
        if self.rotation.swaps_dimensions() {
            dims.transposed()
        } else {
            dims
        }
    }
}

/// Bring a raw mask into the intensity image's frame.
///
/// Applies the rotation, then the vertical flip, then the horizontal flip.
/// The input is never modified.
///
/// # Example
///
/// ```ignore
/// use masktiff_core::align::{align_mask, Alignment, QuarterTurns};
///
/// let mask = PixelGrid::from_rows(&[[1.0, 2.0], [3.0, 4.0]])?;
/// let aligned = align_mask(&mask, Alignment::new(QuarterTurns::One, false, false));
/// assert_eq!(aligned.values(), &[2.0, 4.0, 1.0, 3.0]);
/// ```
pub fn align_mask(mask: &PixelGrid, alignment: Alignment) -> PixelGrid {
    log::debug!(
        "Aligning {} mask: {} quarter turn(s), flip_v={}, flip_h={}",
        mask.dims(),
        alignment.rotation.count(),
        alignment.flip_vertical,
        alignment.flip_horizontal
    );

    let mut aligned = rotate_quarter_turns(mask, alignment.rotation);
    if alignment.flip_vertical {
        aligned = flip_vertical(&aligned);
    }
    if alignment.flip_horizontal {
        aligned = flip_horizontal(&aligned);
    }
    aligned
}
