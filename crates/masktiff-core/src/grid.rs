//! Two-dimensional numeric pixel grids.
//!
//! Both the diffraction intensities and the mask are held as a [`PixelGrid`]:
//! row-major `f64` samples with explicit row and column counts. Integer
//! detector data widens losslessly, and the `-1` sentinel fits without a
//! separate signed representation.

use std::fmt;

use image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

use crate::MaskError;

/// Grid dimensions as (rows, cols).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Dimensions with rows and columns exchanged.
    #[inline]
    pub fn transposed(self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Total number of pixels. Only for dimensions of an existing grid.
    #[inline]
    pub fn area(self) -> usize {
        self.rows * self.cols
    }

    /// Total number of pixels, or `None` if it overflows `usize`.
    #[inline]
    pub fn checked_area(self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }

    fn area_or_err(self) -> Result<usize, MaskError> {
        self.checked_area().ok_or(MaskError::GridTooLarge {
            rows: self.rows,
            cols: self.cols,
        })
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A row-major 2D array of `f64` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    dims: Dims,
    values: Vec<f64>,
}

impl PixelGrid {
    /// Create a grid from dimensions and row-major values.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::GridTooLarge` if `rows * cols` overflows, and
    /// `MaskError::InvalidGrid` if `values.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, MaskError> {
        let dims = Dims::new(rows, cols);
        let expected = dims.area_or_err()?;
        if values.len() != expected {
            return Err(MaskError::InvalidGrid {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { dims, values })
    }

    /// Create a grid with every pixel set to `value`.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::GridTooLarge` if `rows * cols` overflows.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Result<Self, MaskError> {
        let dims = Dims::new(rows, cols);
        let len = dims.area_or_err()?;
        Ok(Self {
            dims,
            values: vec![value; len],
        })
    }

    /// Create a grid from nested rows. All rows must share one length.
    ///
    /// # Errors
    ///
    /// Returns `MaskError::InvalidGrid` for ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MaskError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let values: Vec<f64> = rows
            .iter()
            .flat_map(|r| r.as_ref().iter().copied())
            .collect();
        Self::new(rows.len(), cols, values)
    }

    /// Internal constructor for buffers whose length is known to be correct.
    pub(crate) fn from_raw(dims: Dims, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), dims.area(), "Grid buffer size mismatch");
        Self { dims, values }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Row-major sample values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the grid has no pixels.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample at (row, col), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.dims.rows || col >= self.dims.cols {
            return None;
        }
        self.values.get(row * self.dims.cols + col).copied()
    }

    /// Borrow one row of samples.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dims.cols;
        &self.values[start..start + self.dims.cols]
    }

    /// Iterate over rows of samples.
    pub fn iter_rows(&self) -> impl DoubleEndedIterator<Item = &[f64]> {
        // chunks_exact panics on zero; an empty-column grid yields no rows
        self.values.chunks_exact(self.dims.cols.max(1))
    }

    /// Return a new grid with `f` applied to every sample.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self::from_raw(self.dims, self.values.iter().map(|&v| f(v)).collect())
    }

    /// Convert to a single-channel `f32` image buffer (width = cols, height = rows).
    ///
    /// Returns `None` if either dimension does not fit in `u32`.
    pub fn to_luma32f(&self) -> Option<ImageBuffer<Luma<f32>, Vec<f32>>> {
        let width = u32::try_from(self.dims.cols).ok()?;
        let height = u32::try_from(self.dims.rows).ok()?;
        let data: Vec<f32> = self.values.iter().map(|&v| v as f32).collect();
        ImageBuffer::from_raw(width, height, data)
    }

    /// Create a grid from a single-channel `f32` image buffer.
    pub fn from_luma32f(img: ImageBuffer<Luma<f32>, Vec<f32>>) -> Self {
        let (width, height) = img.dimensions();
        let values = img.into_raw().into_iter().map(f64::from).collect();
        Self::from_raw(Dims::new(height as usize, width as usize), values)
    }
}
