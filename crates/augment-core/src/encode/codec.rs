//! Container encoding and the base64 transport encoding.
//!
//! Images are always re-encoded into the container they were decoded from;
//! the caller passes the detected [`ImageFormat`] back in.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::{DecodedImage, DEFAULT_MAX_OUTPUT_PIXELS};
use crate::format::ImageFormat;

/// Default JPEG quality, matching the usual library default for re-encoding.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The container encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: ImageFormat, message: String },
}

/// Options applied to the produced image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// JPEG quality (1-100). Ignored for PNG and BMP.
    pub jpeg_quality: u8,
    /// Largest `width * height` a transform may produce.
    pub max_output_pixels: u64,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_output_pixels: DEFAULT_MAX_OUTPUT_PIXELS,
        }
    }
}

/// Encode an RGB image into the given container format.
///
/// # Errors
///
/// Returns an error if the image is empty, its buffer does not match its
/// dimensions, or the underlying encoder fails.
///
/// # Example
///
/// ```ignore
/// use augment_core::encode::{encode_image, EncodeOptions};
/// use augment_core::format::ImageFormat;
///
/// let png = encode_image(&image, ImageFormat::Png, &EncodeOptions::default())?;
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_image(
    image: &DecodedImage,
    format: ImageFormat,
    options: &EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let pixels = image.pixels.as_slice();

    let result = match format {
        ImageFormat::Jpeg => {
            let quality = options.jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut buffer, quality).write_image(
                pixels,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        ImageFormat::Png => {
            PngEncoder::new(&mut buffer).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        ImageFormat::Bmp => {
            BmpEncoder::new(&mut buffer).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}

/// Encode raw bytes with the standard padded base64 alphabet.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
