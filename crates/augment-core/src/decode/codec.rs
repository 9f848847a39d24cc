//! Transport decoding and container decoding.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageReader;

use super::{DecodeError, DecodedImage};
use crate::format::ImageFormat;

/// Decode a base64 payload into raw container bytes.
///
/// ASCII whitespace (line breaks from wrapped encoders, stray spaces) is
/// ignored before decoding.
///
/// # Errors
///
/// Returns `DecodeError::InvalidBase64` if the text is not valid standard
/// base64.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

/// Decode container bytes of a known format into RGB pixels.
///
/// Alpha and palette images are flattened to three channels.
///
/// # Errors
///
/// Returns `DecodeError::CorruptedFile` if the bytes carry the right
/// signature but cannot be decoded.
pub fn decode_image(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.to_image_format());

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let rgb_img = img.into_rgb8();
    tracing::debug!(
        width = rgb_img.width(),
        height = rgb_img.height(),
        %format,
        "Decoded image"
    );
    Ok(DecodedImage::from_rgb_image(rgb_img))
}
