//! Core types for image decoding.

use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The file decodes, but not to a single-channel grid.
    #[error("Unsupported pixel layout: {0}")]
    UnsupportedLayout(String),
}

/// Container formats recognised by [`super::decode_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Bit-packed Fit2D `.mask` file.
    Fit2dMask,
    /// TIFF, little or big endian.
    Tiff,
    /// Any other raster the `image` crate can read (PNG).
    Raster,
}

impl SourceFormat {
    /// Identify the container from its leading bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if super::fit2d::has_fit2d_magic(bytes) {
            return Some(SourceFormat::Fit2dMask);
        }
        if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            return Some(SourceFormat::Tiff);
        }
        if image::guess_format(bytes).is_ok() {
            return Some(SourceFormat::Raster);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_tiff_both_byte_orders() {
        assert_eq!(SourceFormat::detect(b"II*\0rest"), Some(SourceFormat::Tiff));
        assert_eq!(SourceFormat::detect(b"MM\0*rest"), Some(SourceFormat::Tiff));
    }

    #[test]
    fn test_detect_png() {
        let png_magic = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(SourceFormat::detect(&png_magic), Some(SourceFormat::Raster));
    }

    #[test]
    fn test_detect_fit2d() {
        let mut header = vec![0u8; 32];
        header[0] = b'M';
        header[4] = b'A';
        header[8] = b'S';
        header[12] = b'K';
        assert_eq!(SourceFormat::detect(&header), Some(SourceFormat::Fit2dMask));
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(SourceFormat::detect(b"not an image"), None);
        assert_eq!(SourceFormat::detect(&[]), None);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::UnsupportedLayout("RGB(8)".to_string());
        assert_eq!(err.to_string(), "Unsupported pixel layout: RGB(8)");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
