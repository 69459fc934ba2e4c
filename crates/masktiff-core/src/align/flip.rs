//! Mirror flips along either grid axis.

use crate::grid::PixelGrid;

/// Reverse the order of rows (top becomes bottom).
pub fn flip_vertical(grid: &PixelGrid) -> PixelGrid {
    let mut output = Vec::with_capacity(grid.len());
    for row in grid.iter_rows().rev() {
        output.extend_from_slice(row);
    }
    PixelGrid::from_raw(grid.dims(), output)
}

/// Reverse each row (left becomes right).
pub fn flip_horizontal(grid: &PixelGrid) -> PixelGrid {
    let mut output = Vec::with_capacity(grid.len());
    for row in grid.iter_rows() {
        output.extend(row.iter().rev());
    }
    PixelGrid::from_raw(grid.dims(), output)
}
