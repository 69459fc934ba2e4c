//! Fit2D binary mask decoding.
//!
//! Layout of a `.mask` file as written by Fit2D:
//! ```text
//! offset  0, 4, 8, 12   ASCII 'M', 'A', 'S', 'K' (one per 32-bit word)
//! offset 16             width  (little-endian i32)
//! offset 20             height (little-endian i32)
//! offset 1024           bit-packed rows, LSB first, each row padded to 32 bits
//! ```

use super::DecodeError;
use crate::grid::{Dims, PixelGrid};

const HEADER_LEN: usize = 1024;
const MAGIC: [(usize, u8); 4] = [(0, b'M'), (4, b'A'), (8, b'S'), (12, b'K')];

/// Check the four magic letters at the start of a Fit2D mask.
pub(crate) fn has_fit2d_magic(bytes: &[u8]) -> bool {
    bytes.len() >= 24 && MAGIC.iter().all(|&(offset, letter)| bytes[offset] == letter)
}

fn read_dimension(bytes: &[u8], offset: usize) -> Result<usize, DecodeError> {
    let raw = bytes
        .get(offset..offset + 4)
        .ok_or_else(|| DecodeError::CorruptedFile("Truncated Fit2D header".to_string()))?;
    let value = i32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| DecodeError::CorruptedFile(format!("Invalid Fit2D dimension: {value}")))
}

/// Decode a Fit2D `.mask` file into a 0/1 grid.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the magic letters are missing and
/// `DecodeError::CorruptedFile` if the header or bit payload is truncated.
pub fn decode_fit2d_mask(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    if !has_fit2d_magic(bytes) {
        return Err(DecodeError::InvalidFormat);
    }

    let width = read_dimension(bytes, 16)?;
    let height = read_dimension(bytes, 20)?;

    let bytes_per_row = width.div_ceil(32) * 4;
    let too_large =
        || DecodeError::CorruptedFile(format!("Fit2D mask too large: {width}x{height}"));
    let payload_len = bytes_per_row.checked_mul(height).ok_or_else(too_large)?;
    let payload_end = HEADER_LEN.checked_add(payload_len).ok_or_else(too_large)?;
    let payload = bytes.get(HEADER_LEN..payload_end).ok_or_else(|| {
        DecodeError::CorruptedFile(format!(
            "Fit2D mask payload truncated: expected {} bytes after header, got {}",
            payload_len,
            bytes.len().saturating_sub(HEADER_LEN)
        ))
    })?;

    let dims = Dims::new(height, width);
    let mut values = Vec::with_capacity(dims.checked_area().ok_or_else(too_large)?);
    for row in payload.chunks_exact(bytes_per_row) {
        values.extend((0..width).map(|col| {
            let bit = (row[col / 8] >> (col % 8)) & 1;
            f64::from(bit)
        }));
    }

    log::debug!("Decoded Fit2D mask: {}x{}", height, width);
    Ok(PixelGrid::from_raw(dims, values))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a Fit2D mask file from 0/1 rows.
    pub(crate) fn build_fit2d(rows: &[&[u8]]) -> Vec<u8> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let bytes_per_row = width.div_ceil(32) * 4;

        let mut out = vec![0u8; HEADER_LEN];
        for &(offset, letter) in &MAGIC {
            out[offset] = letter;
        }
        out[16..20].copy_from_slice(&(width as i32).to_le_bytes());
        out[20..24].copy_from_slice(&(height as i32).to_le_bytes());

        for row in rows {
            let mut packed = vec![0u8; bytes_per_row];
            for (col, &bit) in row.iter().enumerate() {
                if bit != 0 {
                    packed[col / 8] |= 1 << (col % 8);
                }
            }
            out.extend_from_slice(&packed);
        }
        out
    }

    #[test]
    fn test_decode_small_mask() {
        let bytes = build_fit2d(&[&[1, 0, 0], &[0, 1, 1]]);
        let grid = decode_fit2d_mask(&bytes).unwrap();

        assert_eq!(grid.dims(), Dims::new(2, 3));
        assert_eq!(grid.values(), &[1.0, 0.0, 0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_decode_row_spanning_multiple_words() {
        let mut row = vec![0u8; 40];
        row[0] = 1;
        row[31] = 1;
        row[32] = 1;
        row[39] = 1;
        let bytes = build_fit2d(&[row.as_slice(), &[0u8; 40]]);

        // 40 columns pad to two 32-bit words per row
        assert_eq!(bytes.len(), HEADER_LEN + 2 * 8);

        let grid = decode_fit2d_mask(&bytes).unwrap();
        assert_eq!(grid.dims(), Dims::new(2, 40));
        for col in 0..40 {
            let expected = if [0, 31, 32, 39].contains(&col) { 1.0 } else { 0.0 };
            assert_eq!(grid.get(0, col), Some(expected), "column {col}");
            assert_eq!(grid.get(1, col), Some(0.0));
        }
    }

    #[test]
    fn test_missing_magic() {
        let mut bytes = build_fit2d(&[&[1]]);
        bytes[4] = b'X';
        assert!(matches!(
            decode_fit2d_mask(&bytes),
            Err(DecodeError::InvalidFormat)
        ));
    }

    #[test]
    fn test_truncated_payload() {
        let mut bytes = build_fit2d(&[&[1, 0], &[0, 1]]);
        bytes.truncate(HEADER_LEN + 4);
        assert!(matches!(
            decode_fit2d_mask(&bytes),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_non_positive_dimension() {
        let mut bytes = build_fit2d(&[&[1, 0]]);
        bytes[16..20].copy_from_slice(&0i32.to_le_bytes());
        assert!(matches!(
            decode_fit2d_mask(&bytes),
            Err(DecodeError::CorruptedFile(_))
        ));

        bytes[16..20].copy_from_slice(&(-4i32).to_le_bytes());
        assert!(matches!(
            decode_fit2d_mask(&bytes),
            Err(DecodeError::CorruptedFile(_))
        ));
    }
}
