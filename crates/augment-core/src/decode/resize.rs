//! Image resizing.
//!
//! Nearest, linear, cubic and Lanczos modes use the `image` crate's
//! resamplers. Area mode is implemented here as a separable box filter,
//! since the `image` crate has no pixel-area resampler.

use super::{DecodeError, DecodedImage, Interpolation};

/// Default cap on `width * height` of a resize target (50 megapixels).
pub const DEFAULT_MAX_OUTPUT_PIXELS: u64 = 50_000_000;

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `interpolation` - Interpolation mode to use
///
/// # Returns
///
/// A new `DecodedImage` with exactly the specified dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// `DecodeError::TooLarge` if the target exceeds
/// [`DEFAULT_MAX_OUTPUT_PIXELS`], and `DecodeError::CorruptedFile` if the
/// pixel buffer does not match the source dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> Result<DecodedImage, DecodeError> {
    resize_within(image, width, height, interpolation, DEFAULT_MAX_OUTPUT_PIXELS)
}

/// [`resize`] with an explicit cap on the number of output pixels.
///
/// The cap is checked before any buffer is allocated.
pub fn resize_within(
    image: &DecodedImage,
    width: u32,
    height: u32,
    interpolation: Interpolation,
    max_pixels: u64,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    check_output_size(width, height, max_pixels)?;

    tracing::debug!(
        from_w = image.width,
        from_h = image.height,
        to_w = width,
        to_h = height,
        mode = interpolation.name(),
        "Resizing image"
    );

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let upscaling = width >= image.width && height >= image.height;
    let filter = match interpolation.to_image_filter() {
        Some(filter) => filter,
        // Area on an enlargement degenerates to bilinear sampling
        None if upscaling => image::imageops::FilterType::Triangle,
        None => return resize_area(image, width, height),
    };

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter);

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Reject targets whose pixel count or RGB buffer size is out of budget.
fn check_output_size(width: u32, height: u32, max_pixels: u64) -> Result<(), DecodeError> {
    let too_large = DecodeError::TooLarge {
        width,
        height,
        max_pixels,
    };

    let pixels = u64::from(width)
        .checked_mul(u64::from(height))
        .ok_or_else(|| too_large.clone())?;
    if pixels > max_pixels {
        return Err(too_large);
    }

    // The RGB buffer must also be addressable on this platform
    usize::try_from(pixels)
        .ok()
        .and_then(|p| p.checked_mul(3))
        .map(|_| ())
        .ok_or(too_large)
}

/// Resample by pixel-area relation.
///
/// Each destination pixel is the coverage-weighted mean of the source pixels
/// its footprint overlaps; partially covered source pixels contribute in
/// proportion to the covered fraction.
fn resize_area(image: &DecodedImage, width: u32, height: u32) -> Result<DecodedImage, DecodeError> {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    if image.pixels.len() != src_w * src_h * 3 || src_w == 0 || src_h == 0 {
        return Err(DecodeError::CorruptedFile(
            "Pixel buffer does not match image dimensions".to_string(),
        ));
    }
    let (dst_w, dst_h) = (width as usize, height as usize);

    let x_weights = area_weights(src_w, dst_w);
    let y_weights = area_weights(src_h, dst_h);

    // Horizontal pass: src_h rows of dst_w pixels
    let mut rows = vec![0.0f64; src_h * dst_w * 3];
    for y in 0..src_h {
        let src_row = &image.pixels[y * src_w * 3..(y + 1) * src_w * 3];
        let tmp_row = &mut rows[y * dst_w * 3..(y + 1) * dst_w * 3];
        for (dx, taps) in x_weights.iter().enumerate() {
            for &(sx, w) in taps {
                for c in 0..3 {
                    tmp_row[dx * 3 + c] += src_row[sx * 3 + c] as f64 * w;
                }
            }
        }
    }

    // Vertical pass
    let mut output = vec![0u8; dst_w * dst_h * 3];
    for (dy, taps) in y_weights.iter().enumerate() {
        for dx in 0..dst_w {
            let mut acc = [0.0f64; 3];
            for &(sy, w) in taps {
                let idx = (sy * dst_w + dx) * 3;
                for c in 0..3 {
                    acc[c] += rows[idx + c] * w;
                }
            }
            let out_idx = (dy * dst_w + dx) * 3;
            for c in 0..3 {
                output[out_idx + c] = acc[c].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    Ok(DecodedImage::new(width, height, output))
}

/// Per-destination-index source taps for a box filter along one axis.
///
/// Weights of each tap list sum to 1.
fn area_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = start + scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);

            (first..last)
                .filter_map(|s| {
                    let overlap = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (overlap > 1e-12).then(|| (s, overlap / scale))
                })
                .collect()
        })
        .collect()
}
