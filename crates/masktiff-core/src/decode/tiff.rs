//! Grayscale TIFF decoding for detector images.

use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::{ColorType, TiffError};

use super::DecodeError;
use crate::grid::{Dims, PixelGrid};

/// TIFF sample types that widen to `f64`.
trait TiffSample: Copy {
    fn to_f64(self) -> f64;
}

macro_rules! impl_tiff_sample {
    ($($t:ty),*) => {
        $(
            impl TiffSample for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_tiff_sample!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

fn widen<T: TiffSample>(buf: &[T]) -> Vec<f64> {
    buf.iter().map(|&v| v.to_f64()).collect()
}

/// Decode a single-channel TIFF into a grid of raw sample values.
///
/// Samples are taken as stored: no normalisation, no scaling. Unsigned,
/// signed and floating-point sample formats are all accepted.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedLayout` for colour or multi-sample TIFFs
/// and `DecodeError::CorruptedFile` if the TIFF structure cannot be read.
pub fn decode_tiff(bytes: &[u8]) -> Result<PixelGrid, DecodeError> {
    // Detector frames can be large; lift the default buffer limits
    let mut decoder = Decoder::new(Cursor::new(bytes))
        .map_err(|e| DecodeError::CorruptedFile(format!("Failed to create TIFF decoder: {e}")))?
        .with_limits(Limits::unlimited());

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| DecodeError::CorruptedFile(format!("Failed to get TIFF dimensions: {e}")))?;

    // Layouts the decoder cannot name (gray + alpha, 2-sample RGB) are unsupported, not corrupt
    let color_type = decoder.colortype().map_err(|e| match e {
        TiffError::UnsupportedError(inner) => DecodeError::UnsupportedLayout(inner.to_string()),
        other => DecodeError::CorruptedFile(format!("Failed to get TIFF color type: {other}")),
    })?;

    if !matches!(color_type, ColorType::Gray(_)) {
        return Err(DecodeError::UnsupportedLayout(format!("{color_type:?}")));
    }

    let image_data = decoder
        .read_image()
        .map_err(|e| DecodeError::CorruptedFile(format!("Failed to read TIFF image data: {e}")))?;

    let values = match image_data {
        DecodingResult::U8(buf) => widen(&buf),
        DecodingResult::U16(buf) => widen(&buf),
        DecodingResult::U32(buf) => widen(&buf),
        DecodingResult::U64(buf) => widen(&buf),
        DecodingResult::I8(buf) => widen(&buf),
        DecodingResult::I16(buf) => widen(&buf),
        DecodingResult::I32(buf) => widen(&buf),
        DecodingResult::I64(buf) => widen(&buf),
        DecodingResult::F32(buf) => widen(&buf),
        DecodingResult::F64(buf) => widen(&buf),
    };

    let grid = sized_grid(width, height, values)?;
    log::debug!("Decoded TIFF: {} {:?}", grid.dims(), color_type);
    Ok(grid)
}

/// Wrap decoded samples in a grid, checking them against the header size.
fn sized_grid(width: u32, height: u32, values: Vec<f64>) -> Result<PixelGrid, DecodeError> {
    let dims = Dims::new(height as usize, width as usize);
    match dims.checked_area() {
        Some(area) if area == values.len() => Ok(PixelGrid::from_raw(dims, values)),
        _ => Err(DecodeError::CorruptedFile(format!(
            "TIFF sample count {} does not match {} image",
            values.len(),
            dims
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiff::encoder::{colortype, TiffEncoder};
    use tiff::tags::{PhotometricInterpretation, SampleFormat};

    fn encode_with<C: colortype::ColorType>(width: u32, height: u32, data: &[C::Inner]) -> Vec<u8>
    where
        [C::Inner]: tiff::encoder::TiffValue,
    {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut encoder = TiffEncoder::new(&mut buffer).unwrap();
            encoder.write_image::<C>(width, height, data).unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_decode_u16() {
        let bytes = encode_with::<colortype::Gray16>(3, 2, &[0, 1, 2, 300, 4000, 65535]);
        let grid = decode_tiff(&bytes).unwrap();

        assert_eq!(grid.dims(), Dims::new(2, 3));
        assert_eq!(grid.values(), &[0.0, 1.0, 2.0, 300.0, 4000.0, 65535.0]);
    }

    #[test]
    fn test_decode_signed_i32() {
        let bytes = encode_with::<colortype::GrayI32>(2, 1, &[-1, 123_456]);
        let grid = decode_tiff(&bytes).unwrap();
        assert_eq!(grid.values(), &[-1.0, 123_456.0]);
    }

    #[test]
    fn test_decode_f32() {
        let bytes = encode_with::<colortype::Gray32Float>(2, 2, &[-1.0, 0.5, 2.25, 1e6]);
        let grid = decode_tiff(&bytes).unwrap();
        assert_eq!(grid.values(), &[-1.0, 0.5, 2.25, 1e6]);
    }

    #[test]
    fn test_rgb_is_rejected() {
        let bytes = encode_with::<colortype::RGB8>(1, 1, &[1, 2, 3]);
        assert!(matches!(
            decode_tiff(&bytes),
            Err(DecodeError::UnsupportedLayout(_))
        ));
    }

    /// Two 8-bit samples per pixel, written as BlackIsZero gray plus alpha.
    struct GrayAlpha8;

    impl colortype::ColorType for GrayAlpha8 {
        type Inner = u8;
        const TIFF_VALUE: PhotometricInterpretation = PhotometricInterpretation::BlackIsZero;
        const BITS_PER_SAMPLE: &'static [u16] = &[8, 8];
        const SAMPLE_FORMAT: &'static [SampleFormat] = &[SampleFormat::Uint, SampleFormat::Uint];
    }

    #[test]
    fn test_gray_alpha_is_unsupported_layout() {
        let bytes = encode_with::<GrayAlpha8>(2, 1, &[10, 255, 20, 255]);
        assert!(matches!(
            decode_tiff(&bytes),
            Err(DecodeError::UnsupportedLayout(_))
        ));
    }

    #[test]
    fn test_sample_count_must_match_header() {
        assert!(matches!(
            sized_grid(3, 2, vec![0.0; 5]),
            Err(DecodeError::CorruptedFile(_))
        ));
        // Two samples per pixel slipping through would double the count
        assert!(matches!(
            sized_grid(2, 1, vec![0.0; 4]),
            Err(DecodeError::CorruptedFile(_))
        ));

        let grid = sized_grid(3, 2, vec![1.0; 6]).unwrap();
        assert_eq!(grid.dims(), Dims::new(2, 3));
    }

    #[test]
    fn test_garbage_is_corrupted() {
        assert!(matches!(
            decode_tiff(b"II*\0garbage"),
            Err(DecodeError::CorruptedFile(_))
        ));
    }
}
