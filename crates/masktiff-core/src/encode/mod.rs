//! Image encoding for MaskTiff.
//!
//! This module provides functionality for:
//! - Encoding corrected grids as single-channel TIFF files
//!
//! # Architecture
//!
//! Encoders return bytes; where they are written is up to the caller.
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use masktiff_core::encode::{encode_tiff, TiffSampleFormat};
//!
//! let tiff_bytes = encode_tiff(&corrected, TiffSampleFormat::Float32).unwrap();
//! std::fs::write("frame_0001_masked.tif", tiff_bytes).unwrap();
//! ```

mod tiff;

pub use self::tiff::{encode_tiff, EncodeError, TiffSampleFormat};
