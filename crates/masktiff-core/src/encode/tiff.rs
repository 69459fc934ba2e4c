//! Grayscale TIFF encoding for export.
//!
//! This module writes corrected grids as single-channel TIFFs using the
//! `tiff` crate. The sample format is configurable because MAUD and other
//! readers differ in what they accept; every format can carry the `-1`
//! sentinel.

use std::io::Cursor;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tiff::encoder::{colortype, TiffEncoder};

use crate::grid::PixelGrid;

/// Errors that can occur during TIFF encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Rows or columns are zero, or too large for a TIFF
    #[error("Invalid dimensions: rows ({rows}) and cols ({cols}) must be non-zero and fit in 32 bits")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A sample cannot be represented in the chosen sample format
    #[error("Value {value} cannot be stored in the chosen TIFF sample format")]
    ValueOutOfRange { value: f64 },

    /// TIFF encoding failed
    #[error("TIFF encoding failed: {0}")]
    EncodingFailed(String),
}

/// Sample format of the written TIFF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TiffSampleFormat {
    /// 32-bit IEEE float (default).
    ///
    /// Integers above 2^24 in magnitude lose precision. Finite values beyond
    /// the `f32` range are rejected rather than written as infinity.
    #[default]
    Float32,
    /// 64-bit IEEE float, lossless for every grid value.
    Float64,
    /// Signed 32-bit integer. Values are rounded to the nearest integer.
    Int32,
}

impl TiffSampleFormat {
    /// Convert a u8 code to a sample format.
    ///
    /// Values:
    /// - 0 = Float32
    /// - 1 = Float64
    /// - 2 = Int32
    ///
    /// Any other value defaults to Float32.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => TiffSampleFormat::Float64,
            2 => TiffSampleFormat::Int32,
            _ => TiffSampleFormat::Float32,
        }
    }
}

fn to_f32_samples(values: &[f64]) -> Result<Vec<f32>, EncodeError> {
    values
        .iter()
        .map(|&v| {
            let narrowed = v as f32;
            if v.is_finite() && !narrowed.is_finite() {
                Err(EncodeError::ValueOutOfRange { value: v })
            } else {
                Ok(narrowed)
            }
        })
        .collect()
}

fn to_i32_samples(values: &[f64]) -> Result<Vec<i32>, EncodeError> {
    values
        .iter()
        .map(|&v| {
            let rounded = v.round();
            if rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
                Ok(rounded as i32)
            } else {
                Err(EncodeError::ValueOutOfRange { value: v })
            }
        })
        .collect()
}

/// Encode a grid as a single-channel TIFF.
///
/// # Arguments
///
/// * `grid` - Samples to write (rows become TIFF scanlines)
/// * `format` - Sample format of the output file
///
/// # Returns
///
/// TIFF-encoded bytes on success, or an error if encoding fails.
///
/// # Example
///
/// ```ignore
/// use masktiff_core::encode::{encode_tiff, TiffSampleFormat};
///
/// let grid = PixelGrid::filled(100, 100, -1.0).unwrap();
/// let tiff = encode_tiff(&grid, TiffSampleFormat::Int32).unwrap();
/// assert_eq!(&tiff[0..4], b"II*\0");
/// ```
pub fn encode_tiff(grid: &PixelGrid, format: TiffSampleFormat) -> Result<Vec<u8>, EncodeError> {
    let invalid = || EncodeError::InvalidDimensions {
        rows: grid.rows(),
        cols: grid.cols(),
    };

    // Validate dimensions
    if grid.is_empty() {
        return Err(invalid());
    }
    let width = u32::try_from(grid.cols()).map_err(|_| invalid())?;
    let height = u32::try_from(grid.rows()).map_err(|_| invalid())?;

    // Create output buffer
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder =
            TiffEncoder::new(&mut buffer).map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        let written = match format {
            TiffSampleFormat::Float32 => {
                let data = to_f32_samples(grid.values())?;
                encoder.write_image::<colortype::Gray32Float>(width, height, &data)
            }
            TiffSampleFormat::Float64 => {
                encoder.write_image::<colortype::Gray64Float>(width, height, grid.values())
            }
            TiffSampleFormat::Int32 => {
                let data = to_i32_samples(grid.values())?;
                encoder.write_image::<colortype::GrayI32>(width, height, &data)
            }
        };
        written.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    }

    log::debug!(
        "Encoded {} grid as {:?} TIFF ({} bytes)",
        grid.dims(),
        format,
        buffer.get_ref().len()
    );
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_tiff;

    #[test]
    fn test_encode_tiff_header() {
        let grid = PixelGrid::filled(4, 5, 10.0).unwrap();
        let bytes = encode_tiff(&grid, TiffSampleFormat::Float32).unwrap();

        // Little-endian TIFF magic
        assert_eq!(&bytes[0..4], b"II*\0");
    }

    #[test]
    fn test_sentinel_survives_every_format() {
        let grid = PixelGrid::from_rows(&[[-1.0, 12.0], [7.0, -1.0]]).unwrap();

        for format in [
            TiffSampleFormat::Float32,
            TiffSampleFormat::Float64,
            TiffSampleFormat::Int32,
        ] {
            let bytes = encode_tiff(&grid, format).unwrap();
            let decoded = decode_tiff(&bytes).unwrap();
            assert_eq!(decoded, grid, "format {format:?}");
        }
    }

    #[test]
    fn test_float32_rejects_values_beyond_f32_range() {
        let grid = PixelGrid::from_rows(&[[1e39, 16_777_217.0, -1.0]]).unwrap();
        assert!(matches!(
            encode_tiff(&grid, TiffSampleFormat::Float32),
            Err(EncodeError::ValueOutOfRange { value }) if value == 1e39
        ));

        // Float64 keeps both the large value and the odd integer
        let bytes = encode_tiff(&grid, TiffSampleFormat::Float64).unwrap();
        assert_eq!(decode_tiff(&bytes).unwrap(), grid);
    }

    #[test]
    fn test_float32_rounds_large_integers_and_keeps_infinities() {
        let grid = PixelGrid::from_rows(&[[16_777_217.0, f64::INFINITY, -1.0]]).unwrap();
        let bytes = encode_tiff(&grid, TiffSampleFormat::Float32).unwrap();
        let decoded = decode_tiff(&bytes).unwrap();
        assert_eq!(decoded.values(), &[16_777_216.0, f64::INFINITY, -1.0]);
    }

    #[test]
    fn test_float64_is_lossless() {
        let grid = PixelGrid::from_rows(&[[0.1, 1e-12, 123_456_789.123]]).unwrap();
        let bytes = encode_tiff(&grid, TiffSampleFormat::Float64).unwrap();
        assert_eq!(decode_tiff(&bytes).unwrap(), grid);
    }

    #[test]
    fn test_int32_rounds() {
        let grid = PixelGrid::from_rows(&[[1.4, 1.6, -2.6]]).unwrap();
        let bytes = encode_tiff(&grid, TiffSampleFormat::Int32).unwrap();
        assert_eq!(decode_tiff(&bytes).unwrap().values(), &[1.0, 2.0, -3.0]);
    }

    #[test]
    fn test_int32_rejects_out_of_range() {
        let grid = PixelGrid::from_rows(&[[0.0, 1e12]]).unwrap();
        assert!(matches!(
            encode_tiff(&grid, TiffSampleFormat::Int32),
            Err(EncodeError::ValueOutOfRange { .. })
        ));

        let grid = PixelGrid::from_rows(&[[f64::NAN]]).unwrap();
        assert!(matches!(
            encode_tiff(&grid, TiffSampleFormat::Int32),
            Err(EncodeError::ValueOutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty_grid_rejected() {
        let grid = PixelGrid::new(0, 10, vec![]).unwrap();
        assert!(matches!(
            encode_tiff(&grid, TiffSampleFormat::Float32),
            Err(EncodeError::InvalidDimensions { rows: 0, cols: 10 })
        ));
    }

    #[test]
    fn test_format_from_code() {
        assert_eq!(TiffSampleFormat::from_code(0), TiffSampleFormat::Float32);
        assert_eq!(TiffSampleFormat::from_code(1), TiffSampleFormat::Float64);
        assert_eq!(TiffSampleFormat::from_code(2), TiffSampleFormat::Int32);
        // Unknown values default to Float32
        assert_eq!(TiffSampleFormat::from_code(9), TiffSampleFormat::Float32);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
