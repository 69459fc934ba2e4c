//! Lossless rotation by whole quarter turns.
//!
//! Each output pixel is read from exactly one source pixel, so values are
//! carried over bit for bit. No interpolation is involved and mask values
//! stay binary.
//!
//! For a source grid with `R` rows and `C` columns, the counter-clockwise
//! mappings from destination `(i, j)` to source are:
//! ```text
//! k = 1:  src = (j,         C - 1 - i)    output is C x R
//! k = 2:  src = (R - 1 - i, C - 1 - j)    output is R x C
//! k = 3:  src = (R - 1 - j, i)            output is C x R
//! ```
//! A single quarter turn equals a transpose followed by reversing the row order.

use super::QuarterTurns;
use crate::grid::PixelGrid;

/// Rotate a grid counter-clockwise by whole quarter turns.
///
/// `QuarterTurns::Zero` returns a copy. One and three turns swap rows and
/// columns; two turns keep the dimensions.
pub fn rotate_quarter_turns(grid: &PixelGrid, turns: QuarterTurns) -> PixelGrid {
    // Fast path: no rotation needed
    if turns == QuarterTurns::Zero {
        return grid.clone();
    }

    let src_dims = grid.dims();
    let (rows, cols) = (src_dims.rows, src_dims.cols);
    let dst_dims = if turns.swaps_dimensions() {
        src_dims.transposed()
    } else {
        src_dims
    };

    let src = grid.values();
    let mut output = Vec::with_capacity(dst_dims.area());

    for i in 0..dst_dims.rows {
        for j in 0..dst_dims.cols {
            let (src_row, src_col) = match turns {
                QuarterTurns::Zero => (i, j),
                QuarterTurns::One => (j, cols - 1 - i),
                QuarterTurns::Two => (rows - 1 - i, cols - 1 - j),
                QuarterTurns::Three => (rows - 1 - j, i),
            };
            output.push(src[src_row * cols + src_col]);
        }
    }

    PixelGrid::from_raw(dst_dims, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
